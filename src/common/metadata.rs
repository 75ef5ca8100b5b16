use std::fmt::{Display, Formatter};
use std::ops::{Deref, Not};

use super::codec::Mode;
use super::error::{QRError, QRResult};
use super::version_db::{
    ALIGNMENT_PATTERN_POSITIONS, CAPACITIES, CODEWORD_LAYOUTS, FORMAT_INFOS, MAX_SUPPORTED_VERSION,
};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Version {
    pub fn new(version: usize) -> QRResult<Self> {
        if !(1..=MAX_SUPPORTED_VERSION).contains(&version) {
            return Err(QRError::InvalidVersion);
        }
        Ok(Self(version))
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=MAX_SUPPORTED_VERSION).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn codeword_layout(self, ecl: ECLevel) -> CodewordLayout {
        CODEWORD_LAYOUTS[self.0 - 1][ecl as usize]
    }

    pub fn total_codewords(self) -> usize {
        // Independent of the ec level
        self.codeword_layout(ECLevel::L).total_codewords()
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.codeword_layout(ecl).data_codewords << 3
    }

    // Character capacity in the given mode
    pub fn char_capacity(self, ecl: ECLevel, mode: Mode) -> QRResult<usize> {
        let cap = &CAPACITIES[self.0 - 1][ecl as usize];
        match mode {
            Mode::Numeric => Ok(cap.numeric),
            Mode::Alphanumeric => Ok(cap.alphanumeric),
            Mode::Byte => Ok(cap.byte),
            Mode::Kanji => Ok(cap.kanji),
            Mode::Eci => Err(QRError::UnsupportedMode("ECI")),
        }
    }

    pub fn char_cnt_bits(self, mode: Mode) -> QRResult<usize> {
        let bracket = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let bits = match mode {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Eci => return Err(QRError::UnsupportedMode("ECI")),
        };
        Ok(bits[bracket])
    }

    pub fn remainder_bits(self) -> usize {
        let w = self.width();
        let func_modules = {
            let finders = 3 * 64;
            let timing = 2 * (w - 16);
            let align_cnt = self.alignment_pattern().len();
            let aligns = match align_cnt {
                0 => 0,
                n => (n * n - 3) * 25 - 2 * (n - 2) * 5,
            };
            let format = 31;
            let version = if self.0 >= 7 { 36 } else { 0 };
            finders + timing + aligns + format + version
        };
        w * w - func_modules - (self.total_codewords() << 3)
    }

    // 18 bit version information, only present from version 7
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined from version 7");
        let data = (self.0 as u32) << 12;
        let mut rem = data;
        for i in (12..18).rev() {
            if rem & (1 << i) != 0 {
                rem ^= VERSION_INFO_GEN << (i - 12);
            }
        }
        data | rem
    }
}

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // Strongest error correction first
    pub const BY_TOLERANCE: [ECLevel; 4] = [ECLevel::H, ECLevel::Q, ECLevel::M, ECLevel::L];

    // Two bit indicator used in format information
    pub const fn format_bits(self) -> u16 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    pub fn tolerance(self) -> &'static str {
        match self {
            ECLevel::L => "7%",
            ECLevel::M => "15%",
            ECLevel::Q => "25%",
            ECLevel::H => "30%",
        }
    }
}

impl Display for ECLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, self.tolerance())
    }
}

// Format information
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const FORMAT_MASK: u16 = 0b101_0100_0001_0010;

pub const FORMAT_INFO_GEN: u16 = 0b101_0011_0111;

pub const VERSION_INFO_BIT_LEN: usize = 18;

pub const VERSION_INFO_GEN: u32 = 0b1_1111_0010_0101;

// Unmasked BCH(15, 5) codeword for a level and mask index
pub const fn bch_format_info(ecl: ECLevel, mask: u8) -> u16 {
    let data = (ecl.format_bits() << 3) | mask as u16;
    let mut rem = data << 10;
    let mut i = 14;
    while i >= 10 {
        if rem & (1 << i) != 0 {
            rem ^= FORMAT_INFO_GEN << (i - 10);
        }
        i -= 1;
    }
    (data << 10) | rem
}

// Format information as written in the symbol
pub fn format_info(ecl: ECLevel, mask: u8) -> u16 {
    debug_assert!(mask < 8, "Invalid mask index {mask}");
    FORMAT_INFOS[ecl as usize][mask as usize] ^ FORMAT_MASK
}

#[cfg(test)]
mod format_info_tests {
    use super::{format_info, ECLevel};

    #[test]
    fn test_format_info() {
        let exp = [
            (ECLevel::L, [0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976]),
            (ECLevel::M, [0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0]),
            (ECLevel::Q, [0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED]),
            (ECLevel::H, [0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B]),
        ];
        for (ecl, infos) in exp {
            for (mask, info) in infos.into_iter().enumerate() {
                assert_eq!(format_info(ecl, mask as u8), info, "{ecl:?} mask {mask}");
            }
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Color::Dark => dark,
            Color::Light => light,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Color::Dark
        } else {
            Color::Light
        }
    }
}

// Codeword layout
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CodewordLayout {
    // Total data codewords across all blocks
    pub data_codewords: usize,
    pub ecc_per_block: usize,
    pub group1_blocks: usize,
    pub group1_size: usize,
    pub group2_blocks: usize,
    pub group2_size: usize,
}

impl CodewordLayout {
    pub const fn new(
        data_codewords: usize,
        ecc_per_block: usize,
        (group1_blocks, group1_size): (usize, usize),
        (group2_blocks, group2_size): (usize, usize),
    ) -> Self {
        Self { data_codewords, ecc_per_block, group1_blocks, group1_size, group2_blocks, group2_size }
    }

    pub fn block_count(&self) -> usize {
        self.group1_blocks + self.group2_blocks
    }

    pub fn total_codewords(&self) -> usize {
        self.data_codewords + self.ecc_per_block * self.block_count()
    }
}
