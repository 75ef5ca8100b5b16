pub mod encoder;
pub mod selector;
pub mod types;

pub use encoder::*;
pub use selector::*;
pub use types::*;

// Alternating pad codewords filling unused data capacity
pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
