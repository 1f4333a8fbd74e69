use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("data too long for every version at the requested error correction level")]
    DataTooLong,
    #[error("unsupported character {0:?} for the selected encoding mode")]
    UnsupportedCharacter(char),
    #[error("invalid version {0}, expected 1-40")]
    InvalidVersion(u8),
    #[error("invalid masking pattern {0}, expected 0-7")]
    InvalidMaskPattern(u8),
}

pub type QRResult<T> = Result<T, QRError>;
