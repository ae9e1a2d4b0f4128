use std::str::Utf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Unrecognized magic, expected RaS3 or 3SaR")]
    UnrecognizedMagic,
    #[error("Truncated page header, only {remaining} bytes left")]
    TruncatedHeader { remaining: usize },
    #[error("Invalid geometry {width}x{height} at {bits_per_pixel} bits per pixel")]
    InvalidGeometry {
        width: u32,
        height: u32,
        bits_per_pixel: u32,
    },
    #[error("Payload overrun, page needs {expected} bytes but only {remaining} are left")]
    PayloadOverrun { expected: usize, remaining: usize },
    #[error("Invalid string")]
    InvalidText(#[from] Utf8Error),
    #[error("String too long ({len} bytes)")]
    TextTooLong { len: usize },
    #[error("Payload has {actual} bytes, header declares {expected}")]
    PayloadMismatch { expected: usize, actual: usize },
    #[error("Limit exceeded")]
    LimitExceeded,
}
