pub mod bit_utils;
pub mod codec;
pub mod error;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;
pub mod version_db;

