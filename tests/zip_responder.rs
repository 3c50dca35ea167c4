use http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use s_zip::StreamingZipWriter;
use std::{
    fs::File,
    io::{self, Cursor, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use zip_responder::{
    responder::ZipResponder,
    stream::{BodyStream, CallbackStream, OffsetSink},
    writer::ResponseWriter,
    Disposition, Response,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test.zip")
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn zip_err(e: s_zip::SZipError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

/// Builds a small archive in memory, for the buffered sources.
fn build_archive(entries: &[(&str, &str)]) -> io::Result<Vec<u8>> {
    let mut zip = StreamingZipWriter::from_writer(Cursor::new(Vec::new())).map_err(zip_err)?;
    for (name, data) in entries {
        zip.start_entry(name).map_err(zip_err)?;
        zip.write_data(data.as_bytes()).map_err(zip_err)?;
    }
    Ok(zip.finish().map_err(zip_err)?.into_inner())
}

/// Streams an archive onto `sink` as it is built, for deferred sources.
fn stream_archive(sink: &mut dyn Write, entries: &[(&str, &str)]) -> io::Result<()> {
    let mut zip = StreamingZipWriter::from_writer(OffsetSink::new(sink)).map_err(zip_err)?;
    for (name, data) in entries {
        zip.start_entry(name).map_err(zip_err)?;
        zip.write_data(data.as_bytes()).map_err(zip_err)?;
    }
    zip.finish().map_err(zip_err)?.flush()
}

fn assert_zip_headers(res: &Response) {
    assert_eq!(res.header_line(CONTENT_TYPE), "application/zip");
    assert_eq!(
        res.header_line(CONTENT_DISPOSITION),
        "attachment; filename*=UTF-8''download.zip"
    );
    assert_eq!(res.status(), http::StatusCode::OK);
}

#[test]
fn test_zip_file() {
    let res = ZipResponder::new()
        .with_zip_file(&Response::new(), fixture(), "download.zip", Disposition::Attachment)
        .unwrap();

    assert_zip_headers(&res);
    assert_eq!(res.body_size(), Some(298));
    assert_eq!(res.header_line(CONTENT_LENGTH), "298");
    assert!(count(&res.body().to_bytes(), b"file1.txt") > 0);
}

#[test]
fn test_zip_resource() {
    let file = File::open(fixture()).unwrap();
    let res = ZipResponder::new().with_zip_resource(
        &Response::new(),
        file,
        "download.zip",
        Disposition::Attachment,
    );

    assert_zip_headers(&res);
    assert_eq!(res.header_line(CONTENT_LENGTH), "298");
    assert!(count(&res.body().to_bytes(), b"file1.txt") > 0);
}

#[test]
fn test_zip_string() {
    let archive = build_archive(&[("test.txt", "File content")]).unwrap();
    let res = ZipResponder::new()
        .with_zip_string(&Response::new(), &archive, "download.zip", Disposition::Attachment)
        .unwrap();

    assert_zip_headers(&res);
    assert_eq!(res.body_size(), Some(archive.len() as u64));
    assert_eq!(res.header_line(CONTENT_LENGTH), archive.len().to_string());
    assert!(count(&res.body().to_bytes(), b"test.txt") > 0);
}

#[test]
fn test_zip_callback_stream() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let stream = CallbackStream::new(move |sink: &mut dyn Write| {
        c.fetch_add(1, Ordering::SeqCst);
        stream_archive(
            sink,
            &[
                ("test.txt", "my file content"),
                ("test2.txt", "my file content 2"),
                ("test3.txt", "my file content 4"),
            ],
        )
    });

    let res = ZipResponder::new().with_zip_stream(
        &Response::new(),
        stream,
        "download.zip",
        Disposition::Attachment,
    );

    assert_zip_headers(&res);
    assert_eq!(res.body_size(), None);
    assert!(!res.has_header(CONTENT_LENGTH));
    assert!(!res.body().eof());
    assert!(res.body().to_bytes().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let mut transport = Vec::new();
    let out = res.body().read(4096, &mut transport).unwrap();
    assert!(out.is_empty());
    assert!(res.body().eof());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(transport.starts_with(b"PK"));
    assert_eq!(count(&transport, b"test.txt"), 2);
    assert_eq!(count(&transport, b"test2.txt"), 2);
    assert_eq!(count(&transport, b"test3.txt"), 2);

    let mut more = Vec::new();
    assert!(res.body().read(4096, &mut more).unwrap().is_empty());
    assert!(more.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_flush_streams_archive_after_head() {
    let stream = CallbackStream::new(|sink: &mut dyn Write| {
        stream_archive(sink, &[("report.csv", "a,b\n1,2\n")])
    });
    let responder = ZipResponder::new();
    let res = responder.with_zip_stream(
        &Response::new(),
        stream,
        "reports/Q3 report.zip",
        Disposition::Inline,
    );

    let mut w = ResponseWriter::from_cfg(Vec::new(), &responder.cfg());
    w.send(&res).unwrap();
    let wire = w.into_inner();

    let (head, body) = split_head(&wire);
    let head = String::from_utf8_lossy(head);
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("content-disposition: inline; filename*=UTF-8''Q3%20report.zip\r\n"));
    assert!(!head.contains("content-length"));
    assert!(body.starts_with(b"PK"));
    assert_eq!(count(body, b"report.csv"), 2);
}

fn split_head(wire: &[u8]) -> (&[u8], &[u8]) {
    let split = wire
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("head terminator")
        + 4;
    wire.split_at(split)
}

#[test]
fn test_zip_file_sent_whole_after_read() {
    let responder = ZipResponder::new();
    let res = responder
        .with_zip_file(&Response::new(), fixture(), "download.zip", Disposition::Attachment)
        .unwrap();
    assert_eq!(res.body().to_bytes().len(), 298);

    for _ in 0..2 {
        let mut w = ResponseWriter::from_cfg(Vec::new(), &responder.cfg());
        w.send(&res).unwrap();
        let wire = w.into_inner();
        let (head, body) = split_head(&wire);
        assert!(String::from_utf8_lossy(head).contains("content-length: 298\r\n"));
        assert_eq!(body.len(), 298);
        assert!(body.starts_with(b"PK"));
    }
}

#[test]
fn test_deflate_plain_body() {
    use flate2::read::DeflateDecoder;
    use io::Read;

    let base = Response::new().with_body(
        zip_responder::stream::BufferStream::from_slice(b"0123456789").unwrap(),
    );
    let res = ZipResponder::new().with_deflate(&base, None).unwrap();
    assert_eq!(res.header_line("Content-Encoding"), "deflate");

    let compressed = res.body().to_bytes();
    let mut plain = Vec::new();
    DeflateDecoder::new(&compressed[..])
        .read_to_end(&mut plain)
        .unwrap();
    assert_eq!(plain, b"0123456789");
    assert_eq!(base.body().lock().size(), Some(10));
}
