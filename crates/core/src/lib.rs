//! Core types for the collection call simulator
//!
//! This crate provides the value types shared by every other crate:
//! - Conversation messages and speaker roles
//! - Borrower intent categories and classification results
//! - Sentiment labels and scores
//! - Strategy recommendations
//! - Error types

pub mod analysis;
pub mod conversation;
pub mod error;

pub use analysis::{BorrowerIntent, IntentResult, SentimentLabel, SentimentResult, StrategyRecord};
pub use conversation::{borrower_messages, Message, TurnRole};
pub use error::{Error, Result};
