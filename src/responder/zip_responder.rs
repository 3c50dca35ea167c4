use crate::{
    common::{Body, Disposition, Response},
    errors::{ResponderError, ResponderResult},
    header::zip_headers,
    responder::ResponderCfg,
    stream::{DefaultStreamFactory, StreamFactory},
};
use flate2::{write::DeflateEncoder, Compression};
use http::header::{HeaderValue, CONTENT_ENCODING, CONTENT_LENGTH};
use std::{
    fs::File,
    io::{SeekFrom, Write},
    path::Path,
    sync::Arc,
};
use tracing::{debug, instrument, trace};

/// Shapes responses that deliver a ZIP archive.
#[derive(Debug, Clone)]
pub struct ZipResponder<F = DefaultStreamFactory> {
    cfg: Arc<ResponderCfg>,
    factory: F,
}

impl ZipResponder {
    #[inline]
    pub fn new() -> Self {
        Self::with_cfg(ResponderCfg::builder().build())
    }

    #[inline]
    pub fn with_cfg(cfg: Arc<ResponderCfg>) -> Self {
        Self::with_factory(cfg, DefaultStreamFactory)
    }
}

impl Default for ZipResponder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StreamFactory> ZipResponder<F> {
    #[inline]
    pub fn with_factory(cfg: Arc<ResponderCfg>, factory: F) -> Self {
        Self { cfg, factory }
    }

    #[inline]
    pub fn cfg(&self) -> Arc<ResponderCfg> {
        self.cfg.clone()
    }

    /// Attaches the ZIP file at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), output = output_name), err)]
    pub fn with_zip_file<P: AsRef<Path>>(
        &self,
        response: &Response,
        path: P,
        output_name: &str,
        disposition: Disposition,
    ) -> ResponderResult<Response> {
        let body = self.factory.create_stream_from_file(path.as_ref())?;
        let res = self
            .with_zip_headers(response, output_name, disposition)
            .with_body(body);
        Ok(self.with_content_length(res))
    }

    /// Attaches an archive that is already in memory.
    #[instrument(skip_all, fields(len = content.as_ref().len(), output = output_name), err)]
    pub fn with_zip_string<C: AsRef<[u8]>>(
        &self,
        response: &Response,
        content: C,
        output_name: &str,
        disposition: Disposition,
    ) -> ResponderResult<Response> {
        let body = self.factory.create_stream(content.as_ref())?;
        let res = self
            .with_zip_headers(response, output_name, disposition)
            .with_body(body);
        Ok(self.with_content_length(res))
    }

    /// Attaches `stream` as it is.
    ///
    /// `Content-Length` is only added when the stream knows its size, which a
    /// [`CallbackStream`](crate::stream::CallbackStream) never does.
    #[instrument(skip_all, fields(output = output_name))]
    pub fn with_zip_stream<B: Into<Body>>(
        &self,
        response: &Response,
        stream: B,
        output_name: &str,
        disposition: Disposition,
    ) -> Response {
        let res = self
            .with_zip_headers(response, output_name, disposition)
            .with_body(stream);
        self.with_content_length(res)
    }

    /// Attaches an already open file handle.
    #[instrument(skip_all, fields(output = output_name))]
    pub fn with_zip_resource(
        &self,
        response: &Response,
        file: File,
        output_name: &str,
        disposition: Disposition,
    ) -> Response {
        let body = self.factory.create_stream_from_resource(file);
        self.with_zip_stream(response, body, output_name, disposition)
    }

    /// Sets the ZIP download headers, replacing earlier values.
    pub fn with_zip_headers(
        &self,
        response: &Response,
        output_name: &str,
        disposition: Disposition,
    ) -> Response {
        let mut res = response.clone();
        for (k, v) in zip_headers(output_name, disposition) {
            res = res.with_header(k, v);
        }
        res
    }

    /// Re-encodes the whole body with raw DEFLATE.
    ///
    /// Bodies that can neither be rewound nor sized are refused: reading them
    /// here would either drain them or trigger a deferred producer.
    #[instrument(skip(self, response), err)]
    pub fn with_deflate(
        &self,
        response: &Response,
        level: Option<u32>,
    ) -> ResponderResult<Response> {
        let plain = {
            let mut stream = response.body().lock();
            if !stream.is_seekable() && stream.size().is_none() {
                return Err(ResponderError::UnbufferedBody);
            }
            if stream.is_seekable() {
                stream.seek(SeekFrom::Start(0))?;
            }
            stream.contents()?
        };

        let level = level
            .map(|l| Compression::new(l.min(9)))
            .unwrap_or(self.cfg.compression);
        let mut enc = DeflateEncoder::new(Vec::with_capacity(plain.len() / 2 + 16), level);
        enc.write_all(&plain).map_err(ResponderError::Compression)?;
        let compressed = enc.finish().map_err(ResponderError::Compression)?;
        debug!(
            plain = plain.len(),
            compressed = compressed.len(),
            "deflated body"
        );

        let body = self.factory.create_stream(&compressed)?;
        let mut res = response
            .with_body(body)
            .with_header(CONTENT_ENCODING, HeaderValue::from_static("deflate"));
        if res.has_header(CONTENT_LENGTH) {
            res = res.with_header(CONTENT_LENGTH, HeaderValue::from(compressed.len() as u64));
        }
        Ok(res)
    }

    fn with_content_length(&self, response: Response) -> Response {
        if !self.cfg.content_length {
            return response;
        }
        if response.has_header(CONTENT_LENGTH) {
            trace!("Content-Length already set");
            return response;
        }
        match response.body_size() {
            Some(size) => {
                debug!(size = size, "appending Content-Length");
                response.with_header(CONTENT_LENGTH, HeaderValue::from(size))
            }
            None => {
                trace!("body size unknown, no Content-Length");
                response
            }
        }
    }
}
