//! # qrcraft
//!
//! A Rust library for generating QR codes (versions 1 to 7) with Reed-Solomon error
//! correction and penalty-scored data masking.
//!
//! ## Features
//!
//! - **Mode selection**: Numeric, alphanumeric or byte mode is picked from the input
//! - **Symbol selection**: Smallest version and strongest error correction that fits the data
//! - **Reed-Solomon Error Correction**: Levels L, M, Q and H with block interleaving
//! - **Mask selection**: All eight masks are scored in parallel and the lowest penalty wins
//! - **Rendering**: Grayscale PNG output or a plain terminal string
//!
//! ## Quick Start
//!
//! ```rust
//! use qrcraft::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Version, error correction level and mask are chosen automatically
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let img = qr.render(10, 4); // 10 px per module, 4 module quiet zone
//! # let _ = img;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrcraft::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD")
//!     .version(Version::new(2)?)    // Smallest fitting version if not provided
//!     .ec_level(ECLevel::Q)         // Strongest fitting level if not provided
//!     .mask(MaskPattern::Diamonds)  // Lowest penalty mask if not provided
//!     .build()?;
//!
//! println!("{}", qr.to_str(2));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, Stage, DEFAULT_MODULE_SIZE, DEFAULT_QUIET_ZONE, QR};
pub use common::codec::{select, select_with, Mode, SymbolSpec};
pub use common::error::{QRError, QRResult};
pub use common::mask::{compute_penalty, select_mask, MaskPattern, Penalty};
pub use common::metadata::{Color, ECLevel, Version};
