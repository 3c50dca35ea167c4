use crate::{
    errors::{ResponderError, ResponderResult},
    stream::{BodyStream, Metadata},
};
use bytes::{BufMut, Bytes, BytesMut};
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};
use tracing::trace;

const READ_CAP: usize = 8 * 1024;

/// A read-only stream over an open file.
#[derive(Debug)]
pub struct FileStream {
    file: Option<File>,
    uri: Option<PathBuf>,
    eof: bool,
}

impl FileStream {
    pub fn open<P: AsRef<Path>>(path: P) -> ResponderResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ResponderError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), "opened file stream");
        Ok(Self {
            file: Some(file),
            uri: Some(path.to_path_buf()),
            eof: false,
        })
    }

    /// Wraps a handle that is already open, keeping its current position.
    #[inline]
    pub fn from_file(file: File) -> Self {
        Self {
            file: Some(file),
            uri: None,
            eof: false,
        }
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stream is detached"))
    }
}

impl BodyStream for FileStream {
    fn read(&mut self, max_bytes: usize, _sink: &mut dyn Write) -> io::Result<Bytes> {
        if max_bytes == 0 {
            return Ok(Bytes::new());
        }
        let mut buf = vec![0u8; max_bytes.min(READ_CAP)];
        let n = self.file()?.read(&mut buf)?;
        if n == 0 {
            self.eof = true;
        }
        buf.truncate(n);
        Ok(Bytes::from(buf))
    }

    fn contents(&mut self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new().writer();
        io::copy(self.file()?, &mut buf)?;
        self.eof = true;
        Ok(buf.into_inner().freeze())
    }

    fn size(&self) -> Option<u64> {
        self.file.as_ref()?.metadata().ok().map(|m| m.len())
    }

    fn tell(&self) -> io::Result<u64> {
        match self.file.as_ref() {
            // `Seek` is implemented for `&File`
            Some(mut f) => f.stream_position(),
            None => Err(io::Error::new(io::ErrorKind::Other, "stream is detached")),
        }
    }

    #[inline]
    fn eof(&self) -> bool {
        self.file.is_none() || self.eof
    }

    #[inline]
    fn is_seekable(&self) -> bool {
        self.file.is_some()
    }

    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let p = self.file()?.seek(pos)?;
        self.eof = false;
        Ok(p)
    }

    #[inline]
    fn is_writable(&self) -> bool {
        false
    }

    fn write(&mut self, _data: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file stream is not writable",
        ))
    }

    #[inline]
    fn is_readable(&self) -> bool {
        self.file.is_some()
    }

    fn metadata(&self) -> Metadata {
        if self.file.is_none() {
            return Metadata::new();
        }
        let mut m = Metadata::from([
            ("mode", "rb".to_owned()),
            ("seekable", "true".to_owned()),
        ]);
        if let Some(uri) = &self.uri {
            m.insert("uri", uri.display().to_string());
        }
        m
    }

    #[inline]
    fn close(&mut self) {
        self.detach();
    }

    fn detach(&mut self) -> Option<File> {
        self.eof = true;
        self.file.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_file(content: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_open_missing() {
        let err = FileStream::open("/definitely/not/here.zip").unwrap_err();
        assert!(matches!(err, ResponderError::Open { ref path, .. } if path == Path::new("/definitely/not/here.zip")));
    }

    #[test]
    fn test_read_until_eof() {
        let tmp = temp_file(b"0123456789");
        let mut s = FileStream::open(tmp.path()).unwrap();
        let mut sink = io::sink();

        assert_eq!(s.size(), Some(10));
        assert!(!s.eof());
        assert_eq!(&s.read(6, &mut sink).unwrap()[..], b"012345");
        assert_eq!(s.tell().unwrap(), 6);
        assert_eq!(&s.read(6, &mut sink).unwrap()[..], b"6789");
        assert!(s.read(6, &mut sink).unwrap().is_empty());
        assert!(s.eof());

        assert!(s.rewind());
        assert!(!s.eof());
        assert_eq!(&s.to_bytes()[..], b"0123456789");
    }

    #[test]
    fn test_from_file_and_detach() {
        let tmp = temp_file(b"abc");
        let mut s = FileStream::from_file(File::open(tmp.path()).unwrap());

        assert!(s.metadata_value("uri").is_none());
        assert_eq!(s.metadata_value("mode").as_deref(), Some("rb"));
        assert!(!s.is_writable());
        assert!(s.write(b"x").is_err());

        let f = s.detach();
        assert!(f.is_some());
        assert!(s.eof());
        assert_eq!(s.size(), None);
        assert!(s.tell().is_err());
        assert!(s.metadata().is_empty());
    }
}
