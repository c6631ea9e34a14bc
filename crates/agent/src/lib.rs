//! Collections Agent
//!
//! Features:
//! - Reply composition from curated fragment tables
//! - Canned replies for job-loss and medical hardship
//! - Negotiation strategy per borrower intent
//! - Call sessions that tie analysis and replies to a transcript

pub mod response;
pub mod session;
pub mod strategy;

pub use response::ResponseComposer;
pub use session::{CallSession, TurnAnalysis, TurnOutcome};
pub use strategy::StrategyAdvisor;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
