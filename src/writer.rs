//! Flushing a [`Response`] onto an outbound byte sink.

use crate::{common::Response, responder::ResponderCfg};
use bytes::BytesMut;
use std::{
    fmt::Write as _,
    io::{self, Write},
};
use tracing::{field, instrument, trace, warn, Span};

const HEAD_BUF_CAP: usize = 512;

/// Writes responses onto `W`.
///
/// The body is pulled chunk by chunk with the sink handed to every read, so a
/// deferred body writes its output straight onto `W` while it is produced.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    sink: W,
    wbuf: BytesMut,
    chunk_size: usize,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_chunk_size(sink, 8 * 1024)
    }

    pub fn from_cfg(sink: W, cfg: &ResponderCfg) -> Self {
        Self::with_chunk_size(sink, cfg.chunk_size())
    }

    pub fn with_chunk_size(sink: W, chunk_size: usize) -> Self {
        Self {
            sink,
            wbuf: BytesMut::with_capacity(HEAD_BUF_CAP),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Sends the head, then the body from its first byte.
    ///
    /// A seekable body is rewound first, so a body that was already read
    /// (or sent) is still delivered whole.
    #[instrument(
        name = "response",
        skip_all,
        fields(status = %response.status().as_u16(), stream = tracing::field::Empty),
        err
    )]
    pub fn send(&mut self, response: &Response) -> io::Result<()> {
        let body = response.body();
        {
            let mut s = body.lock();
            if let Some(id) = s.stream_id() {
                Span::current().record("stream", &field::display(id));
            }
            if s.is_seekable() && !s.rewind() {
                warn!("failed to rewind body, sending from the current position");
            }
        }

        self.send_head(response)?;

        let mut total = 0usize;
        while !body.eof() {
            let chunk = body.read(self.chunk_size, &mut self.sink)?;
            if chunk.is_empty() {
                break;
            }
            self.sink.write_all(&chunk)?;
            total += chunk.len();
        }
        trace!(buffered = total, "body sent");

        self.sink.flush()
    }

    fn send_head(&mut self, response: &Response) -> io::Result<()> {
        self.wbuf.clear();
        write!(
            self.wbuf,
            "{:?} {}\r\n",
            response.version(),
            response.status()
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        write_headers_map(&mut self.wbuf, response.headers());
        self.wbuf.extend_from_slice(b"\r\n");
        trace!(len = self.wbuf.len(), "sending head");
        self.sink.write_all(&self.wbuf)
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn write_headers_map(buf: &mut BytesMut, headers: &http::HeaderMap) {
    for (k, v) in headers.iter() {
        buf.extend_from_slice(k.as_str().as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
}
