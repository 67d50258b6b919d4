/// Largest metadata blob accepted by default, matching the limit rpm itself
/// places on a header's data area.
pub const DEFAULT_MAX_DATA_SIZE: usize = 256 * 1024 * 1024;

/// Knobs for a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Upper bound on the metadata data blob, in bytes
    pub max_data_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_data_size: DEFAULT_MAX_DATA_SIZE,
        }
    }
}

impl DecodeOptions {
    pub fn max_data_size(mut self, bytes: usize) -> Self {
        self.max_data_size = bytes;
        self
    }
}
