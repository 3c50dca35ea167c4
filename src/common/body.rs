use crate::{
    common::StreamId,
    stream::{BodyStream, BufferStream},
};
use bytes::Bytes;
use std::{
    fmt,
    io::{self, Write},
    sync::{Arc, Mutex, MutexGuard},
};

/// Shared handle to the stream behind a response body.
///
/// Cloning is cheap, and clones observe the same stream (and the same read
/// position).
#[derive(Clone)]
pub struct Body(Arc<Mutex<Box<dyn BodyStream>>>);

impl Body {
    pub fn new<S: BodyStream + 'static>(stream: S) -> Self {
        Self(Arc::new(Mutex::new(Box::new(stream))))
    }

    #[inline]
    pub fn empty() -> Self {
        Self::new(BufferStream::new())
    }

    /// Locks the stream for direct access to the whole capability set.
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn BodyStream>> {
        // a panicking producer must not take the body down with it
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[inline]
    pub fn read(&self, max_bytes: usize, sink: &mut dyn Write) -> io::Result<Bytes> {
        self.lock().read(max_bytes, sink)
    }

    #[inline]
    pub fn contents(&self) -> io::Result<Bytes> {
        self.lock().contents()
    }

    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        self.lock().to_bytes()
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.lock().size()
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.lock().eof()
    }

    /// Id of the deferred producer behind the body, if any.
    #[inline]
    pub fn stream_id(&self) -> Option<StreamId> {
        self.lock().stream_id()
    }

    #[inline]
    pub fn is_same(&self, other: &Body) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Body {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: BodyStream + 'static> From<S> for Body {
    #[inline]
    fn from(stream: S) -> Self {
        Self::new(stream)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.lock();
        let mut d = f.debug_struct("Body");
        if let Some(id) = s.stream_id() {
            d.field("stream", &id);
        }
        d.field("size", &s.size())
            .field("seekable", &s.is_seekable())
            .field("eof", &s.eof())
            .finish()
    }
}
