use std::time::Duration;

pub const OUTPUT_DIR: &str = "Fetched_Images";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Applies to the declared length and to the bytes actually streamed.
pub const MAX_CONTENT_LENGTH: u64 = 50 * 1024 * 1024;

pub const CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_content_length: u64,
    pub chunk_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_content_length: MAX_CONTENT_LENGTH,
            chunk_size: CHUNK_SIZE,
        }
    }
}
