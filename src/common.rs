mod body;
mod disposition;
mod http_response;
mod stream_id;

pub use body::*;
pub use disposition::*;
pub use http_response::*;
pub use stream_id::StreamId;
