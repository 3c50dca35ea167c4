use crate::responder::ResponderCfgBuilder;
use flate2::Compression;

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ResponderCfg {
    pub(crate) content_length: bool,
    pub(crate) compression: Compression,
    pub(crate) chunk_size: usize,
}

impl ResponderCfg {
    #[inline]
    pub fn builder() -> ResponderCfgBuilder {
        ResponderCfgBuilder::default()
    }

    /// Whether `Content-Length` is appended for bodies of known size.
    #[inline]
    pub fn content_length(&self) -> bool {
        self.content_length
    }

    /// Level used by `with_deflate` when the caller passes none.
    #[inline]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// How many bytes a response writer asks the body for at a time.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}
