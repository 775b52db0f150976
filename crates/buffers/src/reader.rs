//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A bounds-checked reader over an immutable byte slice.
///
/// The cursor only moves forward, and a failed read leaves it where it was.
///
/// # Example
///
/// ```
/// use minipack_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u16(), Ok(0x0203));
/// assert!(reader.u16().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    uint8: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `uint8`.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.size() < n {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(bytes)
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by `length` bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.check(length)?;
        self.x += length;
        Ok(())
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.take::<1>().map(|[b]| b)
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        self.take().map(i8::from_be_bytes)
    }

    /// Reads an unsigned 16-bit big-endian integer.
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.take().map(u16::from_be_bytes)
    }

    /// Reads a signed 16-bit big-endian integer.
    #[inline]
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        self.take().map(i16::from_be_bytes)
    }

    /// Reads an unsigned 32-bit big-endian integer.
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.take().map(u32::from_be_bytes)
    }

    /// Reads a signed 32-bit big-endian integer.
    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.take().map(i32::from_be_bytes)
    }

    /// Reads an unsigned 64-bit big-endian integer as two 32-bit halves.
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.check(8)?;
        let high = self.u32()? as u64;
        let low = self.u32()? as u64;
        Ok((high << 32) | low)
    }

    /// Reads a signed 64-bit big-endian integer.
    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        self.take().map(i64::from_be_bytes)
    }

    /// Reads a 32-bit big-endian float.
    #[inline]
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        self.take().map(f32::from_be_bytes)
    }

    /// Reads a 64-bit big-endian float.
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        self.take().map(f64::from_be_bytes)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    /// Reads a UTF-8 string of `size` bytes. The cursor does not move when
    /// the bytes are not valid UTF-8.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let s = str::from_utf8(&self.uint8[self.x..self.x + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.x += size;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u8(), Ok(0x02));
        assert_eq!(reader.u8(), Ok(0x03));
        assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 3);
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16(), Ok(0x0102));
        assert_eq!(reader.u16(), Ok(0x0304));
    }

    #[test]
    fn test_u16_partial() {
        let data = [0x01u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_i8_negative() {
        let data = [0xfeu8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i8(), Ok(-2i8));
    }

    #[test]
    fn test_i16_negative() {
        let mut writer = crate::Writer::new();
        writer.i16(-1000i16);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i16(), Ok(-1000i16));
    }

    #[test]
    fn test_u32_end_of_buffer() {
        let data = [0x01u8, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_i32_negative() {
        let mut writer = crate::Writer::new();
        writer.i32(-123456);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i32(), Ok(-123456i32));
    }

    #[test]
    fn test_u64_composes_halves() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64(), Ok((1u64 << 32) + 2));
    }

    #[test]
    fn test_u64_max_is_exact() {
        let data = [0xffu8; 8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64(), Ok(u64::MAX));
    }

    #[test]
    fn test_u64_end_of_buffer() {
        let data = [0u8; 7];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_i64_negative() {
        let mut writer = crate::Writer::new();
        writer.i64(-9_999_999_999i64);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i64(), Ok(-9_999_999_999i64));
    }

    #[test]
    fn test_f32() {
        let mut writer = crate::Writer::new();
        writer.f32(1.5f32);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f32(), Ok(1.5f32));
    }

    #[test]
    fn test_f64() {
        let mut writer = crate::Writer::new();
        writer.f64(std::f64::consts::PI);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f64(), Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_buf() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(3), Ok([1u8, 2, 3].as_ref()));
        assert_eq!(reader.x, 3);
        assert_eq!(reader.buf(5), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 3);
        assert_eq!(reader.size(), 2);
    }

    #[test]
    fn test_utf8() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.utf8(5), Ok("hello"));
        assert_eq!(reader.utf8(6), Ok(" world"));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_utf8_invalid() {
        let data = [0xffu8, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf8(2), Err(BufferError::InvalidUtf8));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_peek_and_skip() {
        let data = [0x55u8, 0x66];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.peek(), Ok(0x55));
        assert_eq!(reader.x, 0);
        assert_eq!(reader.skip(1), Ok(()));
        assert_eq!(reader.peek(), Ok(0x66));
        assert_eq!(reader.skip(2), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_position_never_passes_end() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(2), Ok([1u8, 2].as_ref()));
        assert_eq!(reader.skip(1), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_peek_empty() {
        let data: [u8; 0] = [];
        let reader = Reader::new(&data);
        assert_eq!(reader.peek(), Err(BufferError::EndOfBuffer));
    }
}
