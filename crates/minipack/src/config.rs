//! Encoder and decoder settings.

/// Maximum container nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Initial sink capacity used by [`EncoderConfig::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Bytes allocated up front for the output sink.
    pub initial_capacity: usize,
    /// Deepest container nesting the encoder will walk.
    pub max_depth: usize,
    /// Write `float32` instead of `float64` when the value survives the
    /// narrowing exactly.
    pub compact_floats: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            compact_floats: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest container nesting accepted from the input.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
