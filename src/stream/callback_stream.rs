use crate::{
    common::StreamId,
    stream::{BodyStream, Metadata},
};
use bytes::Bytes;
use std::{
    fmt,
    fs::File,
    io::{self, SeekFrom, Write},
};
use tracing::{debug, error, trace};

pub type Producer = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + Send>;

/// A stream whose content is produced by a callback on first read.
///
/// The producer writes straight onto the sink handed to [`BodyStream::read`],
/// so a streaming archive writer can emit output as it goes instead of
/// buffering the whole archive. It runs at most once: the first `read` takes
/// it, and every later read returns nothing.
///
/// Only `read` triggers the producer. [`BodyStream::contents`] and
/// [`BodyStream::to_bytes`] always return an empty buffer.
///
/// No operation of this stream ever fails.
pub struct CallbackStream {
    id: StreamId,
    producer: Option<Producer>,
    invoked: bool,
}

impl CallbackStream {
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        Self {
            id: StreamId::next(),
            producer: Some(Box::new(producer)),
            invoked: false,
        }
    }

    #[inline]
    pub fn id(&self) -> StreamId {
        self.id
    }

    #[inline]
    pub fn is_invoked(&self) -> bool {
        self.invoked
    }
}

impl fmt::Debug for CallbackStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackStream")
            .field("id", &self.id)
            .field("has_producer", &self.producer.is_some())
            .field("invoked", &self.invoked)
            .finish()
    }
}

impl BodyStream for CallbackStream {
    fn read(&mut self, _max_bytes: usize, sink: &mut dyn Write) -> io::Result<Bytes> {
        if self.invoked {
            trace!(id = %self.id, "producer already invoked");
            return Ok(Bytes::new());
        }
        let producer = match self.producer.take() {
            Some(p) => p,
            None => {
                trace!(id = %self.id, "no producer held");
                return Ok(Bytes::new());
            }
        };

        self.invoked = true;
        trace!(id = %self.id, "invoking producer");
        match producer(sink) {
            Ok(()) => debug!(id = %self.id, "producer finished"),
            // the transport is mid-body here, there is nobody to report to
            Err(e) => error!(id = %self.id, err = %e, "producer failed"),
        }

        Ok(Bytes::new())
    }

    #[inline]
    fn contents(&mut self) -> io::Result<Bytes> {
        Ok(Bytes::new())
    }

    #[inline]
    fn to_bytes(&mut self) -> Bytes {
        Bytes::new()
    }

    #[inline]
    fn size(&self) -> Option<u64> {
        None
    }

    #[inline]
    fn tell(&self) -> io::Result<u64> {
        Ok(0)
    }

    #[inline]
    fn eof(&self) -> bool {
        self.invoked
    }

    #[inline]
    fn is_seekable(&self) -> bool {
        false
    }

    #[inline]
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }

    #[inline]
    fn rewind(&mut self) -> bool {
        false
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }

    #[inline]
    fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
        Ok(0)
    }

    #[inline]
    fn is_readable(&self) -> bool {
        true
    }

    #[inline]
    fn metadata(&self) -> Metadata {
        Metadata::new()
    }

    #[inline]
    fn metadata_value(&self, _key: &str) -> Option<String> {
        None
    }

    #[inline]
    fn close(&mut self) {}

    #[inline]
    fn stream_id(&self) -> Option<StreamId> {
        Some(self.id)
    }

    fn detach(&mut self) -> Option<File> {
        if self.producer.take().is_some() {
            trace!(id = %self.id, "producer detached");
        }
        None
    }
}
