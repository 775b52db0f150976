//! Codec error type.

use minipack_buffers::BufferError;
use thiserror::Error;

/// Everything that can go wrong while encoding or decoding.
///
/// All variants are terminal: nothing is retried and no partial value is
/// ever returned alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    /// The header byte does not belong to any supported type.
    #[error("invalid header byte 0x{byte:02x} at offset {offset}")]
    Format { byte: u8, offset: usize },
    /// A read ran past the end of the input.
    #[error("unexpected end of input at offset {offset}")]
    Range { offset: usize },
    #[error("invalid UTF-8 string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    /// Containers are nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimit { limit: usize },
    /// The value has no representation in the wire format.
    #[error("unsupported value: {0}")]
    Unsupported(String),
    #[error("trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: usize },
}

impl MsgPackError {
    /// Maps a failed buffer read that started at `offset`.
    pub(crate) fn from_buffer(err: BufferError, offset: usize) -> Self {
        match err {
            BufferError::EndOfBuffer => MsgPackError::Range { offset },
            BufferError::InvalidUtf8 => MsgPackError::InvalidUtf8 { offset },
        }
    }
}
