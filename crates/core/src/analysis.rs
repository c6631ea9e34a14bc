//! Analysis result types
//!
//! Values produced per borrower turn: the intent category and its
//! rationale, the sentiment of the latest message, and the strategy
//! recommended for the agent.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Why the borrower is not paying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowerIntent {
    /// Borrower lacks the financial capacity to pay (distress)
    AbilityIssue,
    /// Borrower has capacity but refuses or avoids paying (strategic)
    WillingnessIssue,
    /// Signals are absent or balanced; ask diagnostic questions
    DiscoveryNeeded,
}

impl BorrowerIntent {
    pub const ALL: [BorrowerIntent; 3] = [
        BorrowerIntent::AbilityIssue,
        BorrowerIntent::WillingnessIssue,
        BorrowerIntent::DiscoveryNeeded,
    ];

    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowerIntent::AbilityIssue => "ability_issue",
            BorrowerIntent::WillingnessIssue => "willingness_issue",
            BorrowerIntent::DiscoveryNeeded => "discovery_needed",
        }
    }

    /// Label shown to the trainee
    pub fn display_name(&self) -> &'static str {
        match self {
            BorrowerIntent::AbilityIssue => "Ability Issue (Distress)",
            BorrowerIntent::WillingnessIssue => "Willingness Issue (Strategic)",
            BorrowerIntent::DiscoveryNeeded => "Discovery Needed",
        }
    }

    /// Fixed rationale attached to every classification with this label
    pub fn explanation(&self) -> &'static str {
        match self {
            BorrowerIntent::AbilityIssue => "Detected financial constraint language.",
            BorrowerIntent::WillingnessIssue => "Detected refusal/avoidance language.",
            BorrowerIntent::DiscoveryNeeded => "Neutral or unclear response.",
        }
    }

    /// Confidence emitted for this label. Only two values exist.
    pub fn confidence(&self) -> f32 {
        match self {
            BorrowerIntent::AbilityIssue | BorrowerIntent::WillingnessIssue => 0.85,
            BorrowerIntent::DiscoveryNeeded => 0.5,
        }
    }

    /// Map a free-form label to an intent, falling back to discovery
    ///
    /// Accepts identifiers ("ability_issue"), display names
    /// ("Ability Issue (Distress)") and anything else that mentions
    /// "ability" or "willingness".
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("ability") && !lower.contains("willingness") {
            BorrowerIntent::AbilityIssue
        } else if lower.contains("willingness") {
            BorrowerIntent::WillingnessIssue
        } else {
            BorrowerIntent::DiscoveryNeeded
        }
    }
}

impl std::fmt::Display for BorrowerIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for BorrowerIntent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ability_issue" | "ability" => Ok(BorrowerIntent::AbilityIssue),
            "willingness_issue" | "willingness" => Ok(BorrowerIntent::WillingnessIssue),
            "discovery_needed" | "discovery" => Ok(BorrowerIntent::DiscoveryNeeded),
            other => Err(Error::UnknownIntent(other.to_string())),
        }
    }
}

/// Intent classification output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntentResult {
    pub label: BorrowerIntent,
    /// 0.85 for a decided label, 0.5 for discovery
    pub confidence: f32,
    pub explanation: &'static str,
}

impl IntentResult {
    /// Build the fixed result for a label
    pub fn for_intent(label: BorrowerIntent) -> Self {
        Self {
            label,
            confidence: label.confidence(),
            explanation: label.explanation(),
        }
    }
}

impl From<BorrowerIntent> for IntentResult {
    fn from(label: BorrowerIntent) -> Self {
        Self::for_intent(label)
    }
}

/// Sentiment polarity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment of a single utterance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Confidence in the label, always within [0.5, 0.99]
    pub score: f32,
    /// Lexical polarity in [-1.0, 1.0], rounded to two decimals
    pub polarity: f32,
}

impl SentimentResult {
    /// The default result for degenerate input or analyzer failure
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
            polarity: 0.0,
        }
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Negotiation strategy recommended for an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyRecord {
    pub action: &'static str,
    pub script: &'static str,
    pub tone: &'static str,
    pub economic_principle: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_fixed_outputs() {
        let result = IntentResult::for_intent(BorrowerIntent::AbilityIssue);
        assert_eq!(result.confidence, 0.85);
        assert_eq!(result.explanation, "Detected financial constraint language.");

        let result: IntentResult = BorrowerIntent::DiscoveryNeeded.into();
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.explanation, "Neutral or unclear response.");
    }

    #[test]
    fn test_lenient_label_parsing() {
        assert_eq!(
            BorrowerIntent::from_label("Ability Issue (Distress)"),
            BorrowerIntent::AbilityIssue
        );
        assert_eq!(
            BorrowerIntent::from_label("willingness_issue"),
            BorrowerIntent::WillingnessIssue
        );
        assert_eq!(
            BorrowerIntent::from_label("something else entirely"),
            BorrowerIntent::DiscoveryNeeded
        );
        assert_eq!(BorrowerIntent::from_label(""), BorrowerIntent::DiscoveryNeeded);
    }

    #[test]
    fn test_strict_label_parsing() {
        assert_eq!(
            "discovery".parse::<BorrowerIntent>().unwrap(),
            BorrowerIntent::DiscoveryNeeded
        );
        assert!("maybe".parse::<BorrowerIntent>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_lenient_parser() {
        for intent in BorrowerIntent::ALL {
            assert_eq!(BorrowerIntent::from_label(&intent.to_string()), intent);
        }
    }

    #[test]
    fn test_neutral_sentiment() {
        let neutral = SentimentResult::default();
        assert_eq!(neutral.label, SentimentLabel::Neutral);
        assert_eq!(neutral.score, 0.5);
        assert_eq!(neutral.polarity, 0.0);
    }
}
