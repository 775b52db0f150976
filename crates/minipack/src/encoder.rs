//! `MsgPackEncoder` writes a [`Value`] tree using the smallest header that
//! fits each node.

use minipack_buffers::Writer;

use crate::config::EncoderConfig;
use crate::constants::*;
use crate::{MsgPackError, Value};

/// Recursive encoder backed by a reusable [`Writer`].
///
/// ```
/// use minipack::{MsgPackEncoder, Value};
///
/// let mut encoder = MsgPackEncoder::new();
/// let value = Value::Arr(vec![Value::from(1), Value::from(2), Value::from(3)]);
/// let bytes = encoder.encode(&value).unwrap();
/// assert_eq!(bytes, [0x93, 0x01, 0x02, 0x03]);
/// ```
pub struct MsgPackEncoder {
    pub writer: Writer,
    config: EncoderConfig,
    depth: usize,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self {
            writer: Writer::with_capacity(config.initial_capacity),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes one value and returns exactly the bytes written.
    ///
    /// The sink is rewound first, so an encoder can be reused across calls
    /// and a failed call leaves nothing behind for the next one.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, MsgPackError> {
        self.writer.reset();
        self.depth = 0;
        self.write_any(value)?;
        Ok(self.writer.flush())
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), MsgPackError> {
        match value {
            Value::Nil => self.write_nil(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Integer(i) => self.write_integer(*i),
            Value::UInteger(u) => self.write_u_integer(*u),
            Value::Float(f) => self.write_float(*f),
            Value::Str(s) => self.write_str(s)?,
            Value::Bin(b) => self.write_bin(b)?,
            Value::Arr(items) => self.write_arr(items)?,
            Value::Map(pairs) => self.write_map(pairs)?,
        }
        Ok(())
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    /// Writes a float, unless it has no fractional part and fits 64 bits, in
    /// which case it goes out as an integer.
    pub fn write_float(&mut self, float: f64) {
        match Value::number(float) {
            Value::Integer(i) => self.write_integer(i),
            Value::UInteger(u) => self.write_u_integer(u),
            _ => {
                let single = float as f32;
                if self.config.compact_floats && single as f64 == float {
                    self.writer.u8f32(FLOAT32, single);
                } else {
                    self.writer.u8f64(FLOAT64, float);
                }
            }
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        if uint <= POS_FIXINT_MAX as u64 {
            self.writer.u8(uint as u8);
        } else if uint <= 0xff {
            self.writer.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            self.writer.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            self.writer.u8u32(UINT32, uint as u32);
        } else {
            self.writer.u8u64(UINT64, uint);
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
        } else if int >= -0x20 {
            // negative fixint: 0xe0..=0xff
            self.writer.u8(int as u8);
        } else if int >= i8::MIN as i64 {
            self.writer.u8u8(INT8, int as u8);
        } else if int >= i16::MIN as i64 {
            self.writer.u8u16(INT16, int as u16);
        } else if int >= i32::MIN as i64 {
            self.writer.u8u32(INT32, int as u32);
        } else {
            self.writer.u8u64(INT64, int as u64);
        }
    }

    pub fn write_str_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 0x1f {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= 0xff {
            self.writer.u8u8(STR8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, length_u32("string", length)?);
        }
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), MsgPackError> {
        self.write_str_hdr(s.len())?;
        self.writer.utf8(s);
        Ok(())
    }

    pub fn write_bin_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 0xff {
            self.writer.u8u8(BIN8, length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(BIN16, length as u16);
        } else {
            self.writer.u8u32(BIN32, length_u32("binary", length)?);
        }
        Ok(())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> Result<(), MsgPackError> {
        self.write_bin_hdr(buf.len())?;
        self.writer.buf(buf);
        Ok(())
    }

    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 0xf {
            self.writer.u8(FIXARR | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(ARR16, length as u16);
        } else {
            self.writer.u8u32(ARR32, length_u32("array", length)?);
        }
        Ok(())
    }

    pub fn write_arr(&mut self, items: &[Value]) -> Result<(), MsgPackError> {
        self.enter()?;
        let res = self.write_arr_items(items);
        self.depth -= 1;
        res
    }

    fn write_arr_items(&mut self, items: &[Value]) -> Result<(), MsgPackError> {
        self.write_arr_hdr(items.len())?;
        items.iter().try_for_each(|item| self.write_any(item))
    }

    pub fn write_map_hdr(&mut self, length: usize) -> Result<(), MsgPackError> {
        if length <= 0xf {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, length_u32("map", length)?);
        }
        Ok(())
    }

    /// Writes pairs in the order given; keys are not sorted.
    pub fn write_map(&mut self, pairs: &[(Value, Value)]) -> Result<(), MsgPackError> {
        self.enter()?;
        let res = self.write_map_pairs(pairs);
        self.depth -= 1;
        res
    }

    fn write_map_pairs(&mut self, pairs: &[(Value, Value)]) -> Result<(), MsgPackError> {
        self.write_map_hdr(pairs.len())?;
        for (key, val) in pairs {
            self.write_any(key)?;
            self.write_any(val)?;
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<(), MsgPackError> {
        if self.depth >= self.config.max_depth {
            return Err(MsgPackError::DepthLimit {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

fn length_u32(kind: &str, length: usize) -> Result<u32, MsgPackError> {
    u32::try_from(length).map_err(|_| {
        MsgPackError::Unsupported(format!(
            "{kind} length {length} does not fit a 32-bit length field"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(value: Value) -> Vec<u8> {
        MsgPackEncoder::new().encode(&value).unwrap()
    }

    #[test]
    fn unsigned_size_classes() {
        assert_eq!(enc(Value::Integer(0)), [0x00]);
        assert_eq!(enc(Value::Integer(127)), [0x7f]);
        assert_eq!(enc(Value::Integer(128)), [0xcc, 0x80]);
        assert_eq!(enc(Value::Integer(255)), [0xcc, 0xff]);
        assert_eq!(enc(Value::Integer(256)), [0xcd, 0x01, 0x00]);
        assert_eq!(enc(Value::Integer(65535)), [0xcd, 0xff, 0xff]);
        assert_eq!(enc(Value::Integer(65536)), [0xce, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            enc(Value::Integer(0xffff_ffff)),
            [0xce, 0xff, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            enc(Value::Integer(0x1_0000_0000)),
            [0xcf, 0, 0, 0, 0x01, 0, 0, 0, 0]
        );
        assert_eq!(
            enc(Value::UInteger(u64::MAX)),
            [0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn negative_size_classes() {
        assert_eq!(enc(Value::Integer(-1)), [0xff]);
        assert_eq!(enc(Value::Integer(-32)), [0xe0]);
        assert_eq!(enc(Value::Integer(-33)), [0xd0, 0xdf]);
        assert_eq!(enc(Value::Integer(-128)), [0xd0, 0x80]);
        assert_eq!(enc(Value::Integer(-129)), [0xd1, 0xff, 0x7f]);
        assert_eq!(enc(Value::Integer(-32768)), [0xd1, 0x80, 0x00]);
        assert_eq!(enc(Value::Integer(-32769)), [0xd2, 0xff, 0xff, 0x7f, 0xff]);
        assert_eq!(
            enc(Value::Integer(i32::MIN as i64)),
            [0xd2, 0x80, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            enc(Value::Integer(i32::MIN as i64 - 1)),
            [0xd3, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            enc(Value::Integer(i64::MIN)),
            [0xd3, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn integral_float_is_written_as_integer() {
        assert_eq!(enc(Value::Float(3.0)), [0x03]);
        assert_eq!(enc(Value::Float(-1.0)), [0xff]);
        assert_eq!(enc(Value::Float(300.0)), [0xcd, 0x01, 0x2c]);
    }

    #[test]
    fn fractional_float_is_float64_by_default() {
        let bytes = enc(Value::Float(1.5));
        assert_eq!(bytes[0], 0xcb);
        assert_eq!(&bytes[1..], &1.5f64.to_be_bytes());
    }

    #[test]
    fn compact_floats_use_float32_when_exact() {
        let mut encoder = MsgPackEncoder::with_config(EncoderConfig {
            compact_floats: true,
            ..EncoderConfig::default()
        });
        let bytes = encoder.encode(&Value::Float(1.5)).unwrap();
        assert_eq!(bytes, [0xca, 0x3f, 0xc0, 0x00, 0x00]);
        let bytes = encoder.encode(&Value::Float(0.1)).unwrap();
        assert_eq!(bytes[0], 0xcb);
        assert_eq!(bytes.len(), 9);
    }

    #[test]
    fn string_size_classes() {
        assert_eq!(enc(Value::from("")), [0xa0]);
        assert_eq!(enc(Value::from("A")), [0xa1, 0x41]);
        assert_eq!(enc(Value::from("a".repeat(31)))[0], 0xbf);
        assert_eq!(&enc(Value::from("a".repeat(32)))[..2], &[0xd9, 32]);
        assert_eq!(&enc(Value::from("a".repeat(255)))[..2], &[0xd9, 0xff]);
        assert_eq!(&enc(Value::from("a".repeat(256)))[..3], &[0xda, 0x01, 0x00]);
        assert_eq!(&enc(Value::from("a".repeat(65535)))[..3], &[0xda, 0xff, 0xff]);
        assert_eq!(
            &enc(Value::from("a".repeat(65536)))[..5],
            &[0xdb, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn string_header_counts_utf8_bytes() {
        // 11 three-byte characters: 33 bytes, past the fixstr limit.
        let s = "€".repeat(11);
        let bytes = enc(Value::from(s.as_str()));
        assert_eq!(&bytes[..2], &[0xd9, 33]);
        assert_eq!(&bytes[2..], s.as_bytes());
    }

    #[test]
    fn binary_size_classes() {
        assert_eq!(enc(Value::bin(Vec::<u8>::new())), [0xc4, 0x00]);
        assert_eq!(enc(Value::bin(vec![7u8])), [0xc4, 0x01, 0x07]);
        assert_eq!(&enc(Value::bin(vec![0u8; 255]))[..2], &[0xc4, 0xff]);
        assert_eq!(&enc(Value::bin(vec![0u8; 256]))[..3], &[0xc5, 0x01, 0x00]);
        assert_eq!(
            &enc(Value::bin(vec![0u8; 65536]))[..5],
            &[0xc6, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn container_size_classes() {
        assert_eq!(enc(Value::Arr(vec![])), [0x90]);
        assert_eq!(enc(Value::Map(vec![])), [0x80]);

        let arr_15 = enc(Value::Arr(vec![Value::Nil; 15]));
        assert_eq!(arr_15[0], 0x9f);
        assert_eq!(arr_15.len(), 16);
        let arr_16 = enc(Value::Arr(vec![Value::Nil; 16]));
        assert_eq!(&arr_16[..3], &[0xdc, 0x00, 0x10]);
        let arr_65536 = enc(Value::Arr(vec![Value::Nil; 65536]));
        assert_eq!(&arr_65536[..5], &[0xdd, 0x00, 0x01, 0x00, 0x00]);

        let map_16 = Value::Map(
            (0..16)
                .map(|i| (Value::Integer(i), Value::Nil))
                .collect(),
        );
        assert_eq!(&enc(map_16)[..3], &[0xde, 0x00, 0x10]);
    }

    #[test]
    fn map_keeps_insertion_order() {
        let v = Value::object([("b", Value::from(2)), ("a", Value::from(1))]);
        assert_eq!(enc(v), [0x82, 0xa1, b'b', 0x02, 0xa1, b'a', 0x01]);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut encoder = MsgPackEncoder::with_config(EncoderConfig {
            max_depth: 2,
            ..EncoderConfig::default()
        });
        let ok = Value::Arr(vec![Value::Arr(vec![])]);
        assert_eq!(encoder.encode(&ok).unwrap(), [0x91, 0x90]);
        let too_deep = Value::Arr(vec![Value::Arr(vec![Value::Arr(vec![])])]);
        assert_eq!(
            encoder.encode(&too_deep),
            Err(MsgPackError::DepthLimit { limit: 2 })
        );
        assert_eq!(encoder.encode(&ok).unwrap(), [0x91, 0x90]);
    }

    #[test]
    fn failed_child_restores_depth() {
        let mut encoder = MsgPackEncoder::with_config(EncoderConfig {
            max_depth: 2,
            ..EncoderConfig::default()
        });
        let too_deep = Value::Map(vec![(
            Value::Nil,
            Value::Arr(vec![Value::Arr(vec![])]),
        )]);
        assert!(encoder.write_any(&too_deep).is_err());
        assert_eq!(encoder.depth, 0);
        encoder.writer.reset();
        encoder
            .write_any(&Value::Arr(vec![Value::Arr(vec![])]))
            .unwrap();
        assert_eq!(encoder.writer.as_slice(), [0x91, 0x90]);
    }

    #[test]
    fn lengths_past_u32_are_unsupported() {
        assert_eq!(length_u32("string", u32::MAX as usize), Ok(u32::MAX));
        assert!(matches!(
            length_u32("string", u32::MAX as usize + 1),
            Err(MsgPackError::Unsupported(msg)) if msg.contains("string")
        ));
    }

    #[test]
    fn unnormalized_uinteger_roundtrips() {
        let bytes = enc(Value::UInteger(5));
        assert_eq!(bytes, [0x05]);
        assert_eq!(crate::decode(&bytes), Ok(Value::UInteger(5)));
    }

    #[test]
    fn payloads_grow_a_tiny_sink() {
        let mut encoder = MsgPackEncoder::with_config(EncoderConfig {
            initial_capacity: 0,
            ..EncoderConfig::default()
        });
        let bytes = encoder.encode(&Value::from("abc")).unwrap();
        assert_eq!(bytes, [0xa3, b'a', b'b', b'c']);
        let bytes = encoder.encode(&Value::bin(vec![9u8; 300])).unwrap();
        assert_eq!(&bytes[..3], &[0xc5, 0x01, 0x2c]);
        assert_eq!(bytes.len(), 303);
    }

    #[test]
    fn encoder_is_reusable_and_grows() {
        let mut encoder = MsgPackEncoder::with_config(EncoderConfig {
            initial_capacity: 1,
            ..EncoderConfig::default()
        });
        let big = Value::from("x".repeat(1000));
        assert_eq!(encoder.encode(&big).unwrap().len(), 1003);
        assert_eq!(encoder.encode(&Value::Nil).unwrap(), [0xc0]);
    }
}
