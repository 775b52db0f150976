//! Recursive-descent `MsgPackDecoder` over a borrowed byte slice.

use minipack_buffers::{BufferError, Reader};

use crate::config::DecoderConfig;
use crate::constants::*;
use crate::{MsgPackError, Value};

/// Decodes values from `input`, one [`read_any`](Self::read_any) call per
/// top-level value.
///
/// Nesting depth in the input maps to call depth here, so containers deeper
/// than [`DecoderConfig::max_depth`] are rejected with
/// [`MsgPackError::DepthLimit`] instead of exhausting the stack.
pub struct MsgPackDecoder<'a> {
    pub reader: Reader<'a>,
    max_depth: usize,
    depth: usize,
}

#[inline]
fn lift<T>(offset: usize, res: Result<T, BufferError>) -> Result<T, MsgPackError> {
    res.map_err(|err| MsgPackError::from_buffer(err, offset))
}

impl<'a> MsgPackDecoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, DecoderConfig::default())
    }

    pub fn with_config(input: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            reader: Reader::new(input),
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    /// Runs one fixed-width read, reporting failures at the current offset.
    #[inline]
    fn scalar<T>(
        &mut self,
        read: impl FnOnce(&mut Reader<'a>) -> Result<T, BufferError>,
    ) -> Result<T, MsgPackError> {
        let at = self.reader.position();
        lift(at, read(&mut self.reader))
    }

    /// Reads a length or count field of `width` bytes.
    fn size(&mut self, width: usize) -> Result<usize, MsgPackError> {
        match width {
            1 => self.scalar(Reader::u8).map(usize::from),
            2 => self.scalar(Reader::u16).map(usize::from),
            4 => self.scalar(Reader::u32).map(|n| n as usize),
            _ => unreachable!("length fields are 1, 2 or 4 bytes wide"),
        }
    }

    /// Reads one complete value at the cursor.
    pub fn read_any(&mut self) -> Result<Value, MsgPackError> {
        let offset = self.reader.position();
        let byte = self.scalar(Reader::u8)?;
        match byte {
            0x00..=POS_FIXINT_MAX => Ok(Value::Integer(byte as i64)),
            0x80..=0x8f => self.read_map((byte & 0x0f) as usize),
            0x90..=0x9f => self.read_arr((byte & 0x0f) as usize),
            0xa0..=0xbf => self.read_str((byte & 0x1f) as usize),
            NIL => Ok(Value::Nil),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 | BIN16 | BIN32 => {
                let size = self.size(1 << (byte - BIN8))?;
                self.read_bin(size)
            }
            FLOAT32 => self.scalar(Reader::f32).map(|f| Value::Float(f as f64)),
            FLOAT64 => self.scalar(Reader::f64).map(Value::Float),
            UINT8 => self.scalar(Reader::u8).map(Value::from),
            UINT16 => self.scalar(Reader::u16).map(Value::from),
            UINT32 => self.scalar(Reader::u32).map(Value::from),
            UINT64 => self.scalar(Reader::u64).map(Value::from),
            INT8 => self.scalar(Reader::i8).map(Value::from),
            INT16 => self.scalar(Reader::i16).map(Value::from),
            INT32 => self.scalar(Reader::i32).map(Value::from),
            INT64 => self.scalar(Reader::i64).map(Value::from),
            STR8 | STR16 | STR32 => {
                let size = self.size(1 << (byte - STR8))?;
                self.read_str(size)
            }
            ARR16 | ARR32 => {
                let size = self.size(2 << (byte - ARR16))?;
                self.read_arr(size)
            }
            MAP16 | MAP32 => {
                let size = self.size(2 << (byte - MAP16))?;
                self.read_map(size)
            }
            NEG_FIXINT_MIN..=0xff => Ok(Value::Integer(byte as i64 - 256)),
            _ => Err(MsgPackError::Format { byte, offset }),
        }
    }

    fn read_str(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let s = self.scalar(|reader| reader.utf8(size))?;
        Ok(Value::Str(s.to_owned()))
    }

    fn read_bin(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let bytes = self.scalar(|reader| reader.buf(size))?;
        Ok(Value::Bin(bytes.to_vec()))
    }

    fn read_arr(&mut self, size: usize) -> Result<Value, MsgPackError> {
        self.enter()?;
        let res = self.read_arr_items(size);
        self.depth -= 1;
        res
    }

    fn read_arr_items(&mut self, size: usize) -> Result<Value, MsgPackError> {
        // Every element takes at least one byte.
        let mut arr = Vec::with_capacity(size.min(self.reader.size()));
        for _ in 0..size {
            arr.push(self.read_any()?);
        }
        Ok(Value::Arr(arr))
    }

    fn read_map(&mut self, size: usize) -> Result<Value, MsgPackError> {
        self.enter()?;
        let res = self.read_map_pairs(size);
        self.depth -= 1;
        res
    }

    fn read_map_pairs(&mut self, size: usize) -> Result<Value, MsgPackError> {
        let mut pairs = Vec::with_capacity(size.min(self.reader.size() / 2));
        for _ in 0..size {
            let key = self.read_any()?;
            let val = self.read_any()?;
            pairs.push((key, val));
        }
        Ok(Value::Map(pairs))
    }

    /// Walks over one value without materializing it and returns how many
    /// bytes it occupies.
    pub fn skip_any(&mut self) -> Result<usize, MsgPackError> {
        let start = self.reader.position();
        let byte = self.scalar(Reader::u8)?;
        match byte {
            0x00..=POS_FIXINT_MAX | NEG_FIXINT_MIN..=0xff => {}
            NIL | FALSE | TRUE => {}
            0x80..=0x8f => self.skip_items((byte & 0x0f) as usize * 2)?,
            0x90..=0x9f => self.skip_items((byte & 0x0f) as usize)?,
            0xa0..=0xbf => self.skip_str((byte & 0x1f) as usize)?,
            BIN8 | BIN16 | BIN32 => {
                let size = self.size(1 << (byte - BIN8))?;
                self.skip(size)?;
            }
            STR8 | STR16 | STR32 => {
                let size = self.size(1 << (byte - STR8))?;
                self.skip_str(size)?;
            }
            FLOAT32 => self.skip(4)?,
            FLOAT64 => self.skip(8)?,
            UINT8..=UINT64 => self.skip(1 << (byte - UINT8))?,
            INT8..=INT64 => self.skip(1 << (byte - INT8))?,
            ARR16 | ARR32 => {
                let size = self.size(2 << (byte - ARR16))?;
                self.skip_items(size)?;
            }
            MAP16 | MAP32 => {
                let size = self.size(2 << (byte - MAP16))?;
                self.skip_items(size.saturating_mul(2))?;
            }
            _ => return Err(MsgPackError::Format { byte, offset: start }),
        }
        Ok(self.reader.position() - start)
    }

    fn skip(&mut self, n: usize) -> Result<(), MsgPackError> {
        self.scalar(|reader| reader.skip(n))
    }

    fn skip_str(&mut self, size: usize) -> Result<(), MsgPackError> {
        self.scalar(|reader| reader.utf8(size)).map(|_| ())
    }

    fn skip_items(&mut self, count: usize) -> Result<(), MsgPackError> {
        self.enter()?;
        let res = (0..count).try_for_each(|_| self.skip_any().map(|_| ()));
        self.depth -= 1;
        res
    }

    fn enter(&mut self) -> Result<(), MsgPackError> {
        if self.depth >= self.max_depth {
            return Err(MsgPackError::DepthLimit {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }
}
