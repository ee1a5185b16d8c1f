//! Error types for Revela

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The data store fetch failed. This is the only error that reaches the
    /// caller as a hard failure; everything else degrades locally.
    #[error("Data store error: {0}")]
    Store(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
