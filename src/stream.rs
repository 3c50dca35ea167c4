//! Byte streams that can back a response body.
//!
//! [`BodyStream`] is the capability set the response layer relies on. The
//! [`CallbackStream`] is the interesting implementation: it holds no bytes at
//! all, and instead runs a one-shot producer the first time it is read.

use crate::common::StreamId;
use bytes::Bytes;
use std::{
    collections::HashMap,
    fs::File,
    io::{self, SeekFrom, Write},
};
use tracing::warn;

mod buffer_stream;
mod callback_stream;
mod factory;
mod file_stream;
mod offset_sink;

pub use buffer_stream::*;
pub use callback_stream::*;
pub use factory::*;
pub use file_stream::*;
pub use offset_sink::*;

/// Stream metadata, keyed by `uri`, `mode` and `seekable`.
pub type Metadata = HashMap<&'static str, String>;

pub trait BodyStream: Send {
    /// Reads up to `max_bytes` bytes.
    ///
    /// `sink` is the destination the caller will eventually write the
    /// returned bytes to. Streams that produce their output as a side effect
    /// write to it directly and return nothing.
    fn read(&mut self, max_bytes: usize, sink: &mut dyn Write) -> io::Result<Bytes>;

    /// Returns the remaining contents.
    fn contents(&mut self) -> io::Result<Bytes>;

    /// Returns the whole stream from the beginning, or nothing when that is
    /// not possible. Never fails.
    fn to_bytes(&mut self) -> Bytes {
        if self.is_seekable() {
            if let Err(e) = self.seek(SeekFrom::Start(0)) {
                warn!(err = %e, "failed to rewind stream");
                return Bytes::new();
            }
        }
        match self.contents() {
            Ok(b) => b,
            Err(e) => {
                warn!(err = %e, "failed to read stream contents");
                Bytes::new()
            }
        }
    }

    fn size(&self) -> Option<u64>;

    fn tell(&self) -> io::Result<u64>;

    fn eof(&self) -> bool;

    fn is_seekable(&self) -> bool;

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64>;

    fn rewind(&mut self) -> bool {
        self.is_seekable() && self.seek(SeekFrom::Start(0)).is_ok()
    }

    fn is_writable(&self) -> bool;

    fn write(&mut self, data: &[u8]) -> io::Result<usize>;

    fn is_readable(&self) -> bool;

    fn metadata(&self) -> Metadata;

    fn metadata_value(&self, key: &str) -> Option<String> {
        self.metadata().remove(key)
    }

    fn close(&mut self);

    /// Id of the deferred producer behind this stream, if there is one.
    #[inline]
    fn stream_id(&self) -> Option<StreamId> {
        None
    }

    /// Separates the underlying OS resource, if any. The stream is unusable
    /// afterwards.
    fn detach(&mut self) -> Option<File>;
}
