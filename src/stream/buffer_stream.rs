use crate::{
    errors::ResponderResult,
    stream::{BodyStream, Metadata},
};
use bytes::Bytes;
use std::{
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom, Write},
};

/// A seekable, writable in-memory stream.
#[derive(Debug, Default, Clone)]
pub struct BufferStream {
    cursor: Cursor<Vec<u8>>,
    detached: bool,
}

impl BufferStream {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `content` into a fresh buffer positioned at the start.
    ///
    /// Fails instead of aborting when the allocation cannot be satisfied.
    pub fn from_slice(content: &[u8]) -> ResponderResult<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(content.len())?;
        buf.extend_from_slice(content);
        Ok(Self {
            cursor: Cursor::new(buf),
            detached: false,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.cursor.into_inner()
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.len()
            .saturating_sub(self.cursor.position().min(usize::MAX as u64) as usize)
    }

    fn take(&mut self, n: usize) -> io::Result<Bytes> {
        let n = n.min(self.remaining());
        let mut out = vec![0u8; n];
        self.cursor.read_exact(&mut out)?;
        Ok(Bytes::from(out))
    }
}

impl BodyStream for BufferStream {
    #[inline]
    fn read(&mut self, max_bytes: usize, _sink: &mut dyn Write) -> io::Result<Bytes> {
        self.take(max_bytes)
    }

    #[inline]
    fn contents(&mut self) -> io::Result<Bytes> {
        self.take(usize::MAX)
    }

    fn size(&self) -> Option<u64> {
        if self.detached {
            None
        } else {
            Some(self.len() as u64)
        }
    }

    #[inline]
    fn tell(&self) -> io::Result<u64> {
        Ok(self.cursor.position())
    }

    #[inline]
    fn eof(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn is_seekable(&self) -> bool {
        !self.detached
    }

    #[inline]
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }

    #[inline]
    fn is_writable(&self) -> bool {
        !self.detached
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.detached {
            return Err(io::Error::new(io::ErrorKind::Other, "stream is detached"));
        }
        self.cursor.write(data)
    }

    #[inline]
    fn is_readable(&self) -> bool {
        !self.detached
    }

    fn metadata(&self) -> Metadata {
        if self.detached {
            return Metadata::new();
        }
        Metadata::from([
            ("uri", "memory".to_owned()),
            ("mode", "w+b".to_owned()),
            ("seekable", "true".to_owned()),
        ])
    }

    #[inline]
    fn close(&mut self) {
        self.detach();
    }

    fn detach(&mut self) -> Option<File> {
        self.cursor = Cursor::default();
        self.detached = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_in_chunks() {
        let mut s = BufferStream::from_slice(b"0123456789").unwrap();
        let mut sink = io::sink();

        assert_eq!(s.size(), Some(10));
        assert!(!s.eof());
        assert_eq!(&s.read(4, &mut sink).unwrap()[..], b"0123");
        assert_eq!(s.tell().unwrap(), 4);
        assert_eq!(&s.read(100, &mut sink).unwrap()[..], b"456789");
        assert!(s.eof());
        assert!(s.read(4, &mut sink).unwrap().is_empty());
    }

    #[test]
    fn test_to_bytes_rewinds() {
        let mut s = BufferStream::from_slice(b"hello").unwrap();
        s.read(3, &mut io::sink()).unwrap();

        assert_eq!(&s.contents().unwrap()[..], b"lo");
        assert_eq!(&s.to_bytes()[..], b"hello");
        assert!(s.rewind());
        assert_eq!(s.tell().unwrap(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut s = BufferStream::new();
        assert!(s.is_empty());
        assert_eq!(s.write(b"abc").unwrap(), 3);
        assert_eq!(s.size(), Some(3));
        assert!(s.eof());
        s.seek(SeekFrom::Start(1)).unwrap();
        assert_eq!(&s.contents().unwrap()[..], b"bc");
        assert_eq!(s.into_inner(), b"abc");
    }

    #[test]
    fn test_detach() {
        let mut s = BufferStream::from_slice(b"abc").unwrap();
        assert_eq!(s.metadata_value("uri").as_deref(), Some("memory"));

        assert!(s.detach().is_none());
        assert_eq!(s.size(), None);
        assert!(!s.is_readable());
        assert!(!s.rewind());
        assert!(s.write(b"x").is_err());
        assert!(s.metadata().is_empty());
    }
}
