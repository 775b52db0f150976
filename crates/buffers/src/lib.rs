//! Byte buffers backing the minipack codec.
//!
//! - [`Writer`] is the growable sink used while encoding.
//! - [`Reader`] is the bounds-checked source used while decoding.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Errors raised by [`Reader`] when the input cannot satisfy a read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
