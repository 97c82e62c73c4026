//! Error types
//!
//! One enum per layer. Handler errors never reach the client verbatim: the
//! router logs them and answers with an opaque 500.

use thiserror::Error;

/// Storage layer failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("invalid table name '{0}': use letters, digits and underscores only")]
    InvalidTable(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures while reading a form body
#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("content type {0:?} is not a form")]
    UnsupportedContentType(Option<String>),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),
}

/// Anything that turns a request into a 500
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Invalid timer configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),

    #[error("start hour {start} is after end hour {end}")]
    InvertedWindow { start: u32, end: u32 },

    #[error("interval of {0} minutes must be between 1 and 60 and divide 60")]
    BadInterval(u32),
}
