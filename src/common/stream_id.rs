use cds::aformat;
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

static NEXT_STREAM_ID: AtomicUsize = AtomicUsize::new(1);

/// Process-unique number of a deferred stream.
///
/// The producer logs it when it runs and the response writer records it on
/// its span, so a flush can be matched with the producer run it triggered.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StreamId(usize);

impl StreamId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STREAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(aformat!(24, "s{:x}", self.0)?.as_str())
    }
}

impl fmt::Debug for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(aformat!(40, "StreamId({})", self.0)?.as_str())
    }
}
