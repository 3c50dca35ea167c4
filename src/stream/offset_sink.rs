use std::io::{self, Seek, SeekFrom, Write};

/// Forward-only writer that counts the bytes passed through it.
///
/// Archive writers that need `Seek` only to learn their current offset can
/// write through this straight onto a transport sink, with no need to buffer
/// the archive. A seek that would move the position fails with
/// [`io::ErrorKind::Unsupported`].
#[derive(Debug)]
pub struct OffsetSink<W> {
    inner: W,
    offset: u64,
}

impl<W: Write> OffsetSink<W> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self { inner, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for OffsetSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.offset += n as u64;
        Ok(n)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Seek for OffsetSink<W> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Current(0) => Ok(self.offset),
            SeekFrom::Start(p) if p == self.offset => Ok(self.offset),
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "sink only moves forward",
            )),
        }
    }
}
