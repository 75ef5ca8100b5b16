use super::metadata::{bch_format_info, CodewordLayout, ECLevel};

// Static capacity data for versions 1 to 7. Each per level row is ordered L, M, Q, H.

pub const MAX_SUPPORTED_VERSION: usize = 7;

// Character capacity
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Capacity {
    pub numeric: usize,
    pub alphanumeric: usize,
    pub byte: usize,
    pub kanji: usize,
}

const fn cap(numeric: usize, alphanumeric: usize, byte: usize, kanji: usize) -> Capacity {
    Capacity { numeric, alphanumeric, byte, kanji }
}

pub static CAPACITIES: [[Capacity; 4]; MAX_SUPPORTED_VERSION] = [
    [cap(41, 25, 17, 10), cap(34, 20, 14, 8), cap(27, 16, 11, 7), cap(17, 10, 7, 4)],
    [cap(77, 47, 32, 20), cap(63, 38, 26, 16), cap(48, 29, 20, 12), cap(34, 20, 14, 8)],
    [cap(127, 77, 53, 32), cap(101, 61, 42, 26), cap(77, 47, 32, 20), cap(58, 35, 24, 15)],
    [cap(187, 114, 78, 48), cap(149, 90, 62, 38), cap(111, 67, 46, 28), cap(82, 50, 34, 21)],
    [cap(255, 154, 106, 65), cap(202, 122, 84, 52), cap(144, 87, 60, 37), cap(106, 64, 44, 27)],
    [cap(322, 195, 134, 82), cap(255, 154, 106, 65), cap(178, 108, 74, 45), cap(139, 84, 58, 36)],
    [cap(370, 224, 154, 95), cap(293, 178, 122, 75), cap(207, 125, 86, 53), cap(154, 93, 64, 39)],
];

// Codeword layout: data codewords, ecc per block, (blocks, size) for both groups
//------------------------------------------------------------------------------

const fn layout(
    data: usize,
    ecc: usize,
    group1: (usize, usize),
    group2: (usize, usize),
) -> CodewordLayout {
    CodewordLayout::new(data, ecc, group1, group2)
}

pub static CODEWORD_LAYOUTS: [[CodewordLayout; 4]; MAX_SUPPORTED_VERSION] = [
    [
        layout(19, 7, (1, 19), (0, 0)),
        layout(16, 10, (1, 16), (0, 0)),
        layout(13, 13, (1, 13), (0, 0)),
        layout(9, 17, (1, 9), (0, 0)),
    ],
    [
        layout(34, 10, (1, 34), (0, 0)),
        layout(28, 16, (1, 28), (0, 0)),
        layout(22, 22, (1, 22), (0, 0)),
        layout(16, 28, (1, 16), (0, 0)),
    ],
    [
        layout(55, 15, (1, 55), (0, 0)),
        layout(44, 26, (1, 44), (0, 0)),
        layout(34, 18, (2, 17), (0, 0)),
        layout(26, 22, (2, 13), (0, 0)),
    ],
    [
        layout(80, 20, (1, 80), (0, 0)),
        layout(64, 18, (2, 32), (0, 0)),
        layout(48, 26, (2, 24), (0, 0)),
        layout(36, 16, (4, 9), (0, 0)),
    ],
    [
        layout(108, 26, (1, 108), (0, 0)),
        layout(86, 24, (2, 43), (0, 0)),
        layout(62, 18, (2, 15), (2, 16)),
        layout(46, 22, (2, 11), (2, 12)),
    ],
    [
        layout(136, 18, (2, 68), (0, 0)),
        layout(108, 16, (4, 27), (0, 0)),
        layout(76, 24, (4, 19), (0, 0)),
        layout(60, 28, (4, 15), (0, 0)),
    ],
    [
        layout(156, 20, (2, 78), (0, 0)),
        layout(124, 18, (4, 31), (0, 0)),
        layout(88, 18, (2, 14), (4, 15)),
        layout(66, 26, (4, 13), (1, 14)),
    ],
];

// Alignment pattern centres
//------------------------------------------------------------------------------

pub static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; MAX_SUPPORTED_VERSION] =
    [&[], &[6, 18], &[6, 22], &[6, 26], &[6, 30], &[6, 34], &[6, 22, 38]];

// Unmasked format information, indexed by level then mask
//------------------------------------------------------------------------------

const fn format_infos_for(ecl: ECLevel) -> [u16; 8] {
    let mut res = [0; 8];
    let mut m = 0;
    while m < 8 {
        res[m] = bch_format_info(ecl, m as u8);
        m += 1;
    }
    res
}

pub static FORMAT_INFOS: [[u16; 8]; 4] = [
    format_infos_for(ECLevel::L),
    format_infos_for(ECLevel::M),
    format_infos_for(ECLevel::Q),
    format_infos_for(ECLevel::H),
];
