//! Core error types

use thiserror::Error;

/// Errors raised while parsing core values from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown turn role: {0}")]
    UnknownRole(String),

    #[error("Unknown intent label: {0}")]
    UnknownIntent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
