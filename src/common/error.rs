use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum QRError {
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long: no compatible version and error correction level")]
    DataTooLong,
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Unsupported encoding mode: {0}")]
    UnsupportedMode(&'static str),
    #[error("Invalid masking pattern: {0}")]
    InvalidMaskingPattern(u8),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type QRResult<T> = Result<T, QRError>;
