//! Error types shared by the archive decoder and the comic parser.
//!
//! Only the decoder layer surfaces these. The public entry points
//! ([`ComicParser::parse`](crate::ComicParser::parse) and
//! [`CoverExtractor::extract_cover`](crate::CoverExtractor::extract_cover))
//! log them and degrade to an absent result instead.

use thiserror::Error;

/// The archive as a whole cannot be opened or listed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not a valid ZIP archive")]
    NotAnArchive,

    #[error("malformed archive: {0}")]
    Malformed(String),

    #[error("archive is truncated: {0}")]
    Truncated(#[from] std::io::Error),

    #[error("session is already closed")]
    SessionClosed,
}

/// A single entry could not be extracted.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported compression method {0}")]
    UnsupportedMethod(u16),

    #[error("entry is encrypted")]
    Encrypted,

    #[error("entry size {size} exceeds the limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("CRC mismatch: expected {expected:08x}, got {actual:08x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("entry data is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error while extracting: {0}")]
    Io(#[from] std::io::Error),

    #[error("session is already closed")]
    SessionClosed,
}

impl From<DecodeError> for ExtractError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::SessionClosed => ExtractError::SessionClosed,
            DecodeError::Truncated(e) => ExtractError::Io(e),
            other => ExtractError::Corrupt(other.to_string()),
        }
    }
}
