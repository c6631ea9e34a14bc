//! Borrower intent classification
//!
//! Separates borrowers who *cannot* pay (ability issue) from borrowers who
//! *will not* pay (willingness issue) using weighted keyword matching over
//! the most recent borrower messages.
//!
//! # Example
//!
//! ```
//! use collection_sim_core::{BorrowerIntent, Message};
//! use collection_sim_text_processing::intent::IntentClassifier;
//!
//! let history = vec![
//!     Message::agent("We need a commitment on the date."),
//!     Message::borrower("I will not pay, stop calling me"),
//! ];
//! let result = IntentClassifier::new().classify(&history);
//!
//! assert_eq!(result.label, BorrowerIntent::WillingnessIssue);
//! assert_eq!(result.confidence, 0.85);
//! ```

use collection_sim_core::{borrower_messages, BorrowerIntent, IntentResult, Message};
use serde::Serialize;

/// Number of recent borrower messages considered by default
pub const DEFAULT_WINDOW: usize = 3;

/// Weight of each keyword found in the window
pub const KEYWORD_WEIGHT: u32 = 2;

/// Bonus for an explicit statement in the latest borrower message
pub const OVERRIDE_BONUS: u32 = 5;

/// Financial distress vocabulary
pub const ABILITY_KEYWORDS: &[&str] = &[
    "lost job",
    "hospital",
    "medical",
    "broke",
    "no money",
    "salary",
    "check",
    "wait",
    "please",
    "help",
    "constraints",
    "tight",
    "struggle",
    "financial",
    "afford",
    "cannot pay",
    "can't pay",
    "unable",
];

/// Refusal and avoidance vocabulary
pub const WILLINGNESS_KEYWORDS: &[&str] = &[
    "busy",
    "stop",
    "lawyer",
    "sue",
    "care",
    "won't",
    "will not",
    "scam",
    "harass",
    "don't want",
    "why should i",
    "refuse",
];

/// Phrases in the latest message that state inability outright
pub const ABILITY_OVERRIDES: &[&str] = &["cannot pay", "can't pay", "unable", "broke"];

/// Phrases in the latest message that state refusal outright
pub const WILLINGNESS_OVERRIDES: &[&str] = &["won't pay", "will not", "refuse"];

/// Raw keyword scores behind a classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntentScores {
    pub ability: u32,
    pub willingness: u32,
    /// Ability keywords present in the window
    pub matched_ability: Vec<&'static str>,
    /// Willingness keywords present in the window
    pub matched_willingness: Vec<&'static str>,
    pub ability_override: bool,
    pub willingness_override: bool,
}

impl IntentScores {
    /// Label implied by the scores. Ties go to discovery.
    pub fn decide(&self) -> BorrowerIntent {
        use std::cmp::Ordering;

        match self.ability.cmp(&self.willingness) {
            Ordering::Greater => BorrowerIntent::AbilityIssue,
            Ordering::Less => BorrowerIntent::WillingnessIssue,
            Ordering::Equal => BorrowerIntent::DiscoveryNeeded,
        }
    }
}

/// Keyword-weighted intent classifier
///
/// Stateless apart from the window size; classification only reads the
/// transcript it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentClassifier {
    window: usize,
}

impl IntentClassifier {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    /// Consider the last `window` borrower messages (at least one)
    pub fn with_window(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Score a transcript without deciding
    ///
    /// Non-borrower messages are ignored. Each keyword counts once no
    /// matter how often it appears; matching is by substring.
    pub fn scores(&self, history: &[Message]) -> IntentScores {
        let recent: Vec<String> = borrower_messages(history)
            .map(|m| m.content.to_lowercase())
            .collect();

        let start = recent.len().saturating_sub(self.window);
        let window_text = recent[start..].join(" ");
        let last = recent.last().map(String::as_str).unwrap_or("");

        let matched_ability = matches(ABILITY_KEYWORDS, &window_text);
        let matched_willingness = matches(WILLINGNESS_KEYWORDS, &window_text);
        let ability_override = ABILITY_OVERRIDES.iter().any(|p| last.contains(p));
        let willingness_override = WILLINGNESS_OVERRIDES.iter().any(|p| last.contains(p));

        let ability = weighted(&matched_ability, ability_override);
        let willingness = weighted(&matched_willingness, willingness_override);

        IntentScores {
            ability,
            willingness,
            matched_ability,
            matched_willingness,
            ability_override,
            willingness_override,
        }
    }

    /// Classify the borrower's intent from the transcript
    pub fn classify(&self, history: &[Message]) -> IntentResult {
        let scores = self.scores(history);
        let label = scores.decide();

        tracing::debug!(
            ability = scores.ability,
            willingness = scores.willingness,
            matched_ability = ?scores.matched_ability,
            matched_willingness = ?scores.matched_willingness,
            label = label.as_str(),
            "Classified borrower intent"
        );

        IntentResult::for_intent(label)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(keywords: &[&'static str], text: &str) -> Vec<&'static str> {
    keywords
        .iter()
        .copied()
        .filter(|k| text.contains(k))
        .collect()
}

fn weighted(matched: &[&'static str], overridden: bool) -> u32 {
    let base = matched.len() as u32 * KEYWORD_WEIGHT;
    if overridden {
        base + OVERRIDE_BONUS
    } else {
        base
    }
}
