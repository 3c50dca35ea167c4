use crate::common::Body;
use http::header::{AsHeaderName, HeaderMap, HeaderValue, IntoHeaderName};
use std::sync::Arc;

/// An immutable HTTP response.
///
/// Every `with_*` method leaves `self` untouched and returns a new value.
/// Fields that did not change are shared with the original, so chaining is
/// cheap. The body handle is always shared.
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: http::StatusCode,
    version: http::Version,
    headers: Arc<HeaderMap>,
    body: Body,
}

impl Response {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn status(&self) -> http::StatusCode {
        self.status
    }

    #[inline]
    pub fn version(&self) -> http::Version {
        self.version
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[inline]
    pub fn body_size(&self) -> Option<u64> {
        self.body.size()
    }

    #[inline]
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    #[inline]
    pub fn has_header<K: AsHeaderName>(&self, name: K) -> bool {
        self.headers.contains_key(name)
    }

    /// All values of `name` joined with `", "`, or an empty string.
    pub fn header_line<K: AsHeaderName>(&self, name: K) -> String {
        let mut line = String::new();
        for v in self.headers.get_all(name) {
            if !line.is_empty() {
                line.push_str(", ");
            }
            line.push_str(&String::from_utf8_lossy(v.as_bytes()));
        }
        line
    }

    pub fn with_status(&self, status: http::StatusCode) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    pub fn with_version(&self, version: http::Version) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    /// Replaces every value of `name` with `val`.
    pub fn with_header<K: IntoHeaderName>(&self, name: K, val: HeaderValue) -> Self {
        let mut res = self.clone();
        Arc::make_mut(&mut res.headers).insert(name, val);
        res
    }

    pub fn with_added_header<K: IntoHeaderName>(&self, name: K, val: HeaderValue) -> Self {
        let mut res = self.clone();
        Arc::make_mut(&mut res.headers).append(name, val);
        res
    }

    pub fn without_header<K: AsHeaderName>(&self, name: K) -> Self {
        let mut res = self.clone();
        Arc::make_mut(&mut res.headers).remove(name);
        res
    }

    pub fn with_body<B: Into<Body>>(&self, body: B) -> Self {
        Self {
            body: body.into(),
            ..self.clone()
        }
    }
}
