//! HTTP responses that deliver ZIP archives.
//!
//! A [`ZipResponder`](responder::ZipResponder) takes a [`Response`] and a ZIP
//! source, and returns a new response carrying the download headers and the
//! body. The source is a file, a byte buffer, or any
//! [`BodyStream`](stream::BodyStream). That includes a
//! [`CallbackStream`](stream::CallbackStream), which generates the archive
//! only when the body is first read.
//!
//! ```no_run
//! use std::io::Write;
//! use zip_responder::{
//!     responder::ZipResponder, stream::CallbackStream, writer::ResponseWriter, Disposition,
//!     Response,
//! };
//!
//! let stream = CallbackStream::new(|sink: &mut dyn Write| {
//!     // hand `sink` to a streaming archive writer
//!     sink.write_all(b"PK\x05\x06\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0")
//! });
//! let res = ZipResponder::new().with_zip_stream(
//!     &Response::new(),
//!     stream,
//!     "download.zip",
//!     Disposition::Attachment,
//! );
//!
//! let mut w = ResponseWriter::new(std::io::stdout().lock());
//! w.send(&res)?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub(crate) mod common;
pub(crate) mod errors;
pub mod header;
pub mod responder;
pub mod stream;
pub mod writer;

pub use common::*;
pub use errors::{BadDispositionError, ResponderError, ResponderResult};
