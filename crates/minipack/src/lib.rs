//! Compact, self-describing binary codec using the MessagePack wire format.
//!
//! Two boundary operations cover most uses:
//!
//! ```
//! use minipack::{decode, encode, Value};
//!
//! let value = Value::Arr(vec![Value::from(1), Value::from("A"), Value::Nil]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x93, 0x01, 0xa1, 0x41, 0xc0]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```
//!
//! Integers are true 64-bit values. Numbers with no fractional part are
//! always written as integers, so `Value::Float(3.0)` encodes as `0x03`.
//! Container nesting is capped on both sides (see [`config`]).

pub mod cli;
pub mod config;
pub mod constants;
mod decoder;
mod encoder;
mod error;
mod json;
mod util;
mod value;

pub use config::{DecoderConfig, EncoderConfig};
pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;
pub use json::BINARY_DATA_URI_PREFIX;
pub use util::{decode, decode_all, decode_with_consumed, encode, validate};
pub use value::Value;
