//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Region rejected at registration time. Registry state is untouched.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Location sample rejected before evaluation. No membership state is touched.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    #[error("location sampler error: {0}")]
    Sampler(String),

    #[error("notification dispatch failed: {0}")]
    Dispatch(String),

    #[error("reminder store error: {0}")]
    Store(String),

    #[error("catalog fetch failed: {0}")]
    Fetch(String),

    #[error("catalog decode failed: {0}")]
    Decode(String),

    #[error("UI error: {0}")]
    Ui(String),
}
