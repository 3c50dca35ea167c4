use crate::responder::{config::DEFAULT_CHUNK_SIZE, ResponderCfg};
use flate2::Compression;
use std::sync::Arc;

#[derive(Debug)]
#[non_exhaustive]
pub struct ResponderCfgBuilder {
    content_length: bool,
    compression: Compression,
    chunk_size: usize,
}

impl ResponderCfgBuilder {
    #[inline]
    pub fn content_length(mut self, enabled: bool) -> Self {
        self.content_length = enabled;
        self
    }

    /// DEFLATE level, clamped to `0..=9`.
    #[inline]
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression = Compression::new(level.min(9));
        self
    }

    /// Read size used when flushing a body. Zero is bumped to one.
    #[inline]
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    pub fn build(self) -> Arc<ResponderCfg> {
        Arc::new(ResponderCfg {
            content_length: self.content_length,
            compression: self.compression,
            chunk_size: self.chunk_size,
        })
    }
}

impl Default for ResponderCfgBuilder {
    #[inline]
    fn default() -> Self {
        Self {
            content_length: true,
            compression: Compression::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
