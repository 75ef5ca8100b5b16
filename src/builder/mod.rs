mod ec;
mod qr;
mod render;

pub use qr::{Module, QR};
pub use render::{DEFAULT_MODULE_SIZE, DEFAULT_QUIET_ZONE};

use log::{debug, info};

use crate::common::{
    codec::{encode, encode_prefix, select_with},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

// Last pipeline step carried out by `build`. Stopping early leaves the symbol
// unmasked, and anything after the stage is left unallocated.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum Stage {
    ModeIndicator,
    CharCount,
    Data,
    ErrorCorrection,
    Mask,
}

pub struct QRBuilder<'a> {
    data: &'a str,
    version: Option<Version>,
    ec_level: Option<ECLevel>,
    mask: Option<MaskPattern>,
    until: Stage,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, version: None, ec_level: None, mask: None, until: Stage::Mask }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn unset_ec_level(&mut self) -> &mut Self {
        self.ec_level = None;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn until(&mut self, stage: Stage) -> &mut Self {
        self.until = stage;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("Auto".to_string(), |v| v.to_string());
        let ecl = self.ec_level.map_or("Auto".to_string(), |e| format!("{e:?}"));
        let mask = self.mask.map_or("Auto".to_string(), |m| m.index().to_string());
        format!("{{ Version: {ver}, Ec level: {ecl}, Mask: {mask} }}")
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::mask::MaskPattern;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_metadata() {
        let mut qr_builder = QRBuilder::new("Hello, world!");
        assert_eq!(qr_builder.metadata(), "{ Version: Auto, Ec level: Auto, Mask: Auto }");
        qr_builder
            .version(Version::new(1).unwrap())
            .ec_level(ECLevel::L)
            .mask(MaskPattern::Fields);
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Mask: 5 }");
        qr_builder.unset_version().unset_ec_level();
        assert_eq!(qr_builder.metadata(), "{ Version: Auto, Ec level: Auto, Mask: 5 }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        info!("Generating QR {}...", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        info!("Selecting symbol...");
        let spec = select_with(self.data, self.version, self.ec_level)?;
        info!("Selected {spec}");

        info!("Encoding data...");
        let payload = match self.until {
            Stage::ModeIndicator => encode_prefix(self.data, &spec, false)?,
            Stage::CharCount => encode_prefix(self.data, &spec, true)?,
            Stage::Data => encode(self.data, &spec)?,
            Stage::ErrorCorrection | Stage::Mask => {
                let encoded_data = encode(self.data, &spec)?;

                info!("Constructing payload with ecc & interleaving...");
                let (data_blocks, ecc_blocks) = ec::ecc(encoded_data.data(), &spec.layout);
                ec::structure(&data_blocks, &ecc_blocks, spec.total_codewords())
            }
        };

        info!("Drawing functional patterns...");
        let mut qr = QR::new(spec);
        qr.draw_all_function_patterns();

        info!("Drawing encoding region...");
        qr.draw_encoding_region(payload);

        if self.until < Stage::Mask {
            info!("Stopped after stage {:?}, symbol is unmasked", self.until);
            return Ok(qr);
        }

        let mask = match self.mask {
            Some(m) => {
                info!("Applying mask {m}...");
                qr.apply_mask(m);
                m
            }
            None => {
                info!("Finding & applying best mask...");
                apply_best_mask(&mut qr)
            }
        };
        debug!("Mask {mask} applied");

        let w = qr.width();
        let total_modules = w * w;
        let dark_modules = qr.count_dark_modules();
        let data_cap = spec.layout.data_codewords;

        info!("QR generated successfully: {}", qr.metadata());
        info!(
            "Data capacity: {data_cap}, Ecc per block: {}, Blocks: {}",
            spec.layout.ecc_per_block,
            spec.layout.block_count()
        );
        info!(
            "Dark modules: {dark_modules}, Light modules: {}, Balance: {}%",
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }
}
