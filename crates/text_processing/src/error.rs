//! Error types for text processing

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextProcessingError {
    #[error("Sentiment analysis failed: {0}")]
    Sentiment(String),

    #[error("Polarity out of range: {0}")]
    InvalidPolarity(f32),
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;
