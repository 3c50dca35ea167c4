mod content_disposition;
mod zip_headers;

pub use content_disposition::*;
pub use zip_headers::*;
