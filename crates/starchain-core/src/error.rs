//! Core error types.

use thiserror::Error;

/// Errors from body encoding and decoding.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("body encoding failed: {0}")]
    BodyEncoding(String),

    #[error("body decoding failed: {0}")]
    BodyDecoding(String),
}
