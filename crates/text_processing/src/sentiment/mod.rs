//! Sentiment scoring
//!
//! Maps a borrower utterance to a POSITIVE / NEGATIVE / NEUTRAL label with
//! a confidence in [0.5, 0.99]. Polarity comes from a pluggable
//! [`PolarityAnalyzer`]; the default is the word lexicon in [`lexicon`].
//!
//! Scoring never fails: short input and analyzer errors both produce the
//! neutral result.

pub mod lexicon;

pub use lexicon::LexiconAnalyzer;

use collection_sim_core::{SentimentLabel, SentimentResult};
use std::sync::Arc;

use crate::Result;

/// Inputs shorter than this (after trimming, in characters) are neutral
pub const MIN_TEXT_CHARS: usize = 3;

/// Polarity above this is positive, below its negation is negative
pub const POLARITY_THRESHOLD: f32 = 0.1;

/// Cap on the reported confidence
pub const MAX_SCORE: f32 = 0.99;

/// Source of a signed polarity value in [-1.0, 1.0]
pub trait PolarityAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f32>;
}

/// Sentiment scorer
#[derive(Clone)]
pub struct SentimentScorer {
    analyzer: Arc<dyn PolarityAnalyzer>,
}

impl SentimentScorer {
    /// Create a scorer backed by the built-in lexicon
    pub fn new() -> Self {
        Self {
            analyzer: Arc::new(LexiconAnalyzer::new()),
        }
    }

    /// Create a scorer with a custom polarity analyzer
    pub fn with_analyzer(analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Score a single utterance
    pub fn score(&self, text: &str) -> SentimentResult {
        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return SentimentResult::neutral();
        }

        match self.analyzer.polarity(text) {
            Ok(polarity) if polarity.is_finite() => {
                let result = Self::from_polarity(polarity);
                tracing::debug!(
                    label = %result.label,
                    score = result.score,
                    polarity = result.polarity,
                    "Scored sentiment"
                );
                result
            },
            Ok(polarity) => {
                tracing::warn!(polarity, "Non-finite polarity, defaulting to neutral");
                SentimentResult::neutral()
            },
            Err(e) => {
                tracing::warn!(error = %e, "Sentiment analysis failed, defaulting to neutral");
                SentimentResult::neutral()
            },
        }
    }

    /// Map a polarity value to a label and confidence
    ///
    /// Polarity is clamped to [-1, 1] and rounded to two decimals first;
    /// label and score are derived from the rounded value so the reported
    /// polarity always agrees with the label.
    pub fn from_polarity(polarity: f32) -> SentimentResult {
        let polarity = round2(polarity.clamp(-1.0, 1.0));

        let (label, score) = if polarity > POLARITY_THRESHOLD {
            (SentimentLabel::Positive, 0.5 + polarity * 0.5)
        } else if polarity < -POLARITY_THRESHOLD {
            (SentimentLabel::Negative, 0.5 + polarity.abs() * 0.5)
        } else {
            (SentimentLabel::Neutral, 0.5)
        };

        SentimentResult {
            label,
            score: score.min(MAX_SCORE),
            polarity,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
