use crate::{
    common::Body,
    errors::ResponderResult,
    stream::{BufferStream, FileStream},
};
use std::{fs::File, path::Path};

/// Builds body streams for the responder.
pub trait StreamFactory {
    /// Creates a stream holding a copy of `content`.
    fn create_stream(&self, content: &[u8]) -> ResponderResult<Body>;

    /// Opens `path` for reading.
    fn create_stream_from_file(&self, path: &Path) -> ResponderResult<Body>;

    /// Wraps an already open OS handle.
    fn create_stream_from_resource(&self, file: File) -> Body;
}

/// Backs bodies with [`BufferStream`] and [`FileStream`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStreamFactory;

impl StreamFactory for DefaultStreamFactory {
    #[inline]
    fn create_stream(&self, content: &[u8]) -> ResponderResult<Body> {
        Ok(Body::new(BufferStream::from_slice(content)?))
    }

    #[inline]
    fn create_stream_from_file(&self, path: &Path) -> ResponderResult<Body> {
        Ok(Body::new(FileStream::open(path)?))
    }

    #[inline]
    fn create_stream_from_resource(&self, file: File) -> Body {
        Body::new(FileStream::from_file(file))
    }
}
