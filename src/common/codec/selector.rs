use std::fmt::{Display, Formatter};

use crate::common::error::{QRError, QRResult};
use crate::common::mask::MaskPattern;
use crate::common::metadata::{CodewordLayout, ECLevel, Version};

use super::Mode;

// Symbol specification
//------------------------------------------------------------------------------

// Everything the later stages need to know about the symbol being built
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SymbolSpec {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mode: Mode,
    pub char_cnt_bits: usize,
    pub layout: CodewordLayout,
    pub char_capacity: usize,
    // Set once the mask is chosen
    pub mask: Option<MaskPattern>,
}

impl SymbolSpec {
    pub fn new(version: Version, ec_level: ECLevel, mode: Mode) -> QRResult<Self> {
        let char_cnt_bits = version.char_cnt_bits(mode)?;
        let char_capacity = version.char_capacity(ec_level, mode)?;
        let layout = version.codeword_layout(ec_level);
        Ok(Self { version, ec_level, mode, char_cnt_bits, layout, char_capacity, mask: None })
    }

    pub fn width(&self) -> usize {
        self.version.width()
    }

    pub fn data_bit_capacity(&self) -> usize {
        self.layout.data_codewords << 3
    }

    pub fn total_codewords(&self) -> usize {
        self.layout.total_codewords()
    }
}

impl Display for SymbolSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Version {}, Size {}x{}, EC level {}, Mode {}",
            self.version,
            self.width(),
            self.width(),
            self.ec_level,
            self.mode
        )?;
        if let Some(mask) = self.mask {
            write!(f, ", Mask {mask}")?;
        }
        Ok(())
    }
}

// Selection
//------------------------------------------------------------------------------

pub fn select(data: &str) -> QRResult<SymbolSpec> {
    select_with(data, None, None)
}

// Smallest version first, strongest error correction within a version. A fixed
// version or level narrows the scan to that value.
pub fn select_with(
    data: &str,
    version: Option<Version>,
    ec_level: Option<ECLevel>,
) -> QRResult<SymbolSpec> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }

    let mode = Mode::classify(data);
    let len = data.len();
    let versions: Vec<Version> = match version {
        Some(v) => vec![v],
        None => Version::all().collect(),
    };
    let levels: Vec<ECLevel> = match ec_level {
        Some(l) => vec![l],
        None => ECLevel::BY_TOLERANCE.to_vec(),
    };

    for &ver in &versions {
        for &ecl in &levels {
            if ver.char_capacity(ecl, mode)? >= len {
                return SymbolSpec::new(ver, ecl, mode);
            }
        }
    }
    Err(QRError::DataTooLong)
}
