use crate::{common::Disposition, header::content_disposition};
use http::header::HeaderValue;
use tracing::warn;

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// The headers a ZIP download carries, in the order they are set.
pub fn zip_headers(filename: &str, disposition: Disposition) -> [(&'static str, HeaderValue); 5] {
    [
        ("Content-Type", HeaderValue::from_static(ZIP_CONTENT_TYPE)),
        (
            "Content-Disposition",
            disposition_value(filename, disposition),
        ),
        ("Pragma", HeaderValue::from_static("public")),
        (
            "Cache-Control",
            HeaderValue::from_static("public, must-revalidate"),
        ),
        (
            "Content-Transfer-Encoding",
            HeaderValue::from_static("binary"),
        ),
    ]
}

fn disposition_value(filename: &str, disposition: Disposition) -> HeaderValue {
    match HeaderValue::try_from(content_disposition(filename, disposition)) {
        Ok(v) => v,
        Err(e) => {
            // unreachable in practice: the encoded value is plain ASCII
            warn!(err = %e, "invalid disposition value, dropping filename");
            HeaderValue::from_static(disposition.as_str())
        }
    }
}
