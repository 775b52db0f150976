//! Header byte markers of the wire format.

/// Positive fixint upper bound (`0x00..=0x7f`).
pub const POS_FIXINT_MAX: u8 = 0x7f;
/// Fixmap prefix, count in the low nibble.
pub const FIXMAP: u8 = 0x80;
/// Fixarray prefix, count in the low nibble.
pub const FIXARR: u8 = 0x90;
/// Fixstr prefix, byte length in the low five bits.
pub const FIXSTR: u8 = 0xa0;

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;

pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;

pub const ARR16: u8 = 0xdc;
pub const ARR32: u8 = 0xdd;

pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// Negative fixint lower bound (`0xe0..=0xff` is `-32..=-1`).
pub const NEG_FIXINT_MIN: u8 = 0xe0;
