//! One-shot helpers over [`MsgPackEncoder`] and [`MsgPackDecoder`].

use tracing::debug;

use crate::{MsgPackDecoder, MsgPackEncoder, MsgPackError, Value};

/// Encodes `value` with default settings.
///
/// ```
/// use minipack::{encode, Value};
///
/// let value = Value::object([("a", Value::from(1))]);
/// assert_eq!(encode(&value).unwrap(), [0x81, 0xa1, 0x61, 0x01]);
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, MsgPackError> {
    let mut encoder = MsgPackEncoder::new();
    encoder
        .encode(value)
        .inspect_err(|err| debug!(error = %err, "encode failed"))
}

/// Decodes the value at offset 0. Bytes after it are ignored.
pub fn decode(blob: &[u8]) -> Result<Value, MsgPackError> {
    decode_with_consumed(blob).map(|(value, _)| value)
}

/// Decodes the value at offset 0 and reports how many bytes it used.
pub fn decode_with_consumed(blob: &[u8]) -> Result<(Value, usize), MsgPackError> {
    let mut decoder = MsgPackDecoder::new(blob);
    let value = decoder
        .read_any()
        .inspect_err(|err| debug!(error = %err, len = blob.len(), "decode failed"))?;
    Ok((value, decoder.position()))
}

/// Decodes a concatenation of values until the input is exhausted.
pub fn decode_all(blob: &[u8]) -> Result<Vec<Value>, MsgPackError> {
    let mut decoder = MsgPackDecoder::new(blob);
    let mut values = Vec::new();
    while !decoder.is_empty() {
        let value = decoder
            .read_any()
            .inspect_err(|err| debug!(error = %err, index = values.len(), "stream decode failed"))?;
        values.push(value);
    }
    Ok(values)
}

/// Checks that `blob` holds exactly one well-formed value.
pub fn validate(blob: &[u8]) -> Result<(), MsgPackError> {
    let mut decoder = MsgPackDecoder::new(blob);
    decoder.skip_any()?;
    if !decoder.is_empty() {
        return Err(MsgPackError::TrailingBytes {
            offset: decoder.position(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ignores_trailing_bytes() {
        assert_eq!(decode(&[0x01, 0x02]), Ok(Value::Integer(1)));
        assert_eq!(decode_with_consumed(&[0xa1, b'x', 0x02]), Ok((Value::from("x"), 2)));
    }

    #[test]
    fn decode_all_reads_stream() {
        assert_eq!(
            decode_all(&[0x01, 0xc0, 0x90]),
            Ok(vec![Value::Integer(1), Value::Nil, Value::Arr(vec![])])
        );
        assert_eq!(decode_all(&[]), Ok(vec![]));
        assert_eq!(
            decode_all(&[0x01, 0xcd, 0x00]),
            Err(MsgPackError::Range { offset: 2 })
        );
    }

    #[test]
    fn validate_requires_exactly_one_value() {
        assert_eq!(validate(&[0x92, 0x01, 0x02]), Ok(()));
        assert_eq!(
            validate(&[0x01, 0x02]),
            Err(MsgPackError::TrailingBytes { offset: 1 })
        );
        assert_eq!(validate(&[]), Err(MsgPackError::Range { offset: 0 }));
    }
}
