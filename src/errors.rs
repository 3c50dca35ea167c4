use std::{collections::TryReserveError, io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone)]
#[error("bad content disposition")]
#[non_exhaustive]
pub struct BadDispositionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResponderError {
    #[error("failed to allocate in-memory stream: {0}")]
    ResourceCreation(#[from] TryReserveError),
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("deflate failed: {0}")]
    Compression(#[source] io::Error),
    #[error("body can neither be rewound nor sized, refusing to buffer it")]
    UnbufferedBody,
}

pub type ResponderResult<T> = Result<T, ResponderError>;
