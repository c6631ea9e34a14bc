//! Conversation types: speaker roles and transcript messages

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Speaker of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// Call metadata (connection banner, client id, DPD)
    System,
    /// Collections agent
    Agent,
    /// Borrower on the other end of the call
    Borrower,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::Agent => "agent",
            TurnRole::Borrower => "borrower",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(TurnRole::System),
            "agent" => Ok(TurnRole::Agent),
            "borrower" => Ok(TurnRole::Borrower),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// A single message in the call transcript
///
/// Messages are created once per turn and never mutated. An ordered
/// sequence of them forms the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it
    pub role: TurnRole,
    /// What was said
    pub content: String,
}

impl Message {
    /// Create a new message
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(TurnRole::System, content)
    }

    /// Create an agent message
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Agent, content)
    }

    /// Create a borrower message
    pub fn borrower(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Borrower, content)
    }

    pub fn is_borrower(&self) -> bool {
        self.role == TurnRole::Borrower
    }

    /// Word count of the content
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Borrower-only view of a transcript, in order
pub fn borrower_messages(history: &[Message]) -> impl Iterator<Item = &Message> {
    history.iter().filter(|m| m.is_borrower())
}
