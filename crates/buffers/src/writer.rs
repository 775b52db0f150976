//! Binary buffer writer with doubling growth.

use tracing::trace;

/// Default capacity of a freshly created [`Writer`] (64 KiB).
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// A binary buffer writer that grows automatically as needed.
///
/// The writer owns a backing buffer whose length is the capacity, and a
/// cursor `x` marking the end of the written prefix. `0 <= x <= capacity`
/// always holds. Capacity only grows, and always by doubling.
///
/// # Example
///
/// ```
/// use minipack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying byte buffer. Its length is the capacity.
    pub uint8: Vec<u8>,
    /// Current cursor position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new writer with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: vec![0u8; capacity],
            x: 0,
        }
    }

    /// Total size of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.uint8.len()
    }

    /// Number of bytes written since the last reset.
    pub fn len(&self) -> usize {
        self.x
    }

    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    /// Ensures at least `size` free bytes at the cursor, doubling the
    /// capacity until they fit.
    pub fn ensure_capacity(&mut self, size: usize) {
        let capacity = self.uint8.len();
        if capacity - self.x >= size {
            return;
        }
        let mut new_capacity = capacity.max(1);
        while new_capacity - self.x < size {
            new_capacity = new_capacity.saturating_mul(2);
        }
        self.grow(new_capacity);
    }

    fn grow(&mut self, new_capacity: usize) {
        trace!(from = self.uint8.len(), to = new_capacity, "writer grow");
        let mut new_buf = vec![0u8; new_capacity];
        new_buf[..self.x].copy_from_slice(&self.uint8[..self.x]);
        self.uint8 = new_buf;
    }

    /// Returns the writable region starting at the cursor, at least `size`
    /// bytes long. The caller must [`advance`](Self::advance) by exactly the
    /// number of bytes it wrote.
    pub fn prepare(&mut self, size: usize) -> &mut [u8] {
        self.ensure_capacity(size);
        &mut self.uint8[self.x..]
    }

    /// Moves the cursor forward after a direct write into a prepared region.
    #[inline]
    pub fn advance(&mut self, size: usize) {
        debug_assert!(self.x + size <= self.uint8.len());
        self.x += size;
    }

    /// Rewinds the cursor to zero. Capacity is kept.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Swaps in a fresh zeroed buffer of the given size.
    pub fn new_buffer(&mut self, size: usize) {
        self.uint8 = vec![0u8; size];
        self.x = 0;
    }

    /// Returns an exact-length copy of the written data and rewinds the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let result = self.uint8[..self.x].to_vec();
        self.x = 0;
        result
    }

    /// Borrowed view of the written data.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    #[inline]
    fn put<const N: usize>(&mut self, bytes: [u8; N]) {
        self.prepare(N)[..N].copy_from_slice(&bytes);
        self.x += N;
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put([val]);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.put(val.to_be_bytes());
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.put(val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.put(val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.put(val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.put(val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.put(val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.put(val.to_be_bytes());
    }

    /// Writes a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.put(val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.put(val.to_be_bytes());
    }

    /// Writes two bytes: a marker followed by a one-byte payload.
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.put([marker, val]);
    }

    /// Writes a marker followed by a u16 (big-endian).
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        let [a, b] = val.to_be_bytes();
        self.put([marker, a, b]);
    }

    /// Writes a marker followed by a u32 (big-endian).
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        let buf = self.prepare(5);
        buf[0] = marker;
        buf[1..5].copy_from_slice(&val.to_be_bytes());
        self.x += 5;
    }

    /// Writes a marker followed by a u64 (big-endian).
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        let buf = self.prepare(9);
        buf[0] = marker;
        buf[1..9].copy_from_slice(&val.to_be_bytes());
        self.x += 9;
    }

    /// Writes a marker followed by a f32 (big-endian).
    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.u8u32(marker, val.to_bits());
    }

    /// Writes a marker followed by a f64 (big-endian).
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.u8u64(marker, val.to_bits());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.prepare(length)[..length].copy_from_slice(buf);
        self.x += length;
    }

    /// Writes a UTF-8 string. Returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf(s.as_bytes());
        s.len()
    }
}
