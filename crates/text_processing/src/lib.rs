//! Text processing for borrower utterances
//!
//! This crate provides the two rule-based analyzers of the simulator:
//! - **Sentiment Scoring**: lexicon polarity mapped to a label and confidence
//! - **Intent Classification**: keyword-weighted ability vs. willingness scoring
//!
//! Both analyzers are pure: they read the caller's transcript and never
//! mutate it, hold no per-call state, and can be shared across threads.
//!
//! # Example
//!
//! ```
//! use collection_sim_core::{BorrowerIntent, Message, SentimentLabel};
//! use collection_sim_text_processing::{IntentClassifier, SentimentScorer};
//!
//! let history = vec![Message::borrower("I lost my job and cannot pay")];
//! let intent = IntentClassifier::new().classify(&history);
//! assert_eq!(intent.label, BorrowerIntent::AbilityIssue);
//!
//! let sentiment = SentimentScorer::new().score("ok");
//! assert_eq!(sentiment.label, SentimentLabel::Neutral);
//! ```

pub mod intent;
pub mod sentiment;

mod error;

pub use error::{Result, TextProcessingError};

pub use intent::{IntentClassifier, IntentScores};
pub use sentiment::{LexiconAnalyzer, PolarityAnalyzer, SentimentScorer};
