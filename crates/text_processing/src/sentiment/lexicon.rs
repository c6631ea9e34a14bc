//! Word-polarity lexicon analyzer
//!
//! Averages the polarity of every opinion word in the text. Intensifiers
//! scale the next opinion word; negators flip and damp it.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

use super::PolarityAnalyzer;
use crate::{Result, TextProcessingError};

/// Factor applied to an opinion word inside a negation scope
const NEGATION_FACTOR: f32 = -0.5;

/// Number of words a negator reaches forward
const NEGATION_SCOPE: usize = 3;

static POLARITY: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        // Positive
        ("good", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("glad", 0.5),
        ("fine", 0.4),
        ("nice", 0.6),
        ("better", 0.5),
        ("best", 1.0),
        ("wonderful", 1.0),
        ("excellent", 1.0),
        ("perfect", 1.0),
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("love", 0.5),
        ("pleased", 0.5),
        ("appreciate", 0.5),
        ("grateful", 0.7),
        ("thankful", 0.6),
        ("helpful", 0.5),
        ("kind", 0.6),
        ("sure", 0.5),
        ("hopeful", 0.5),
        ("willing", 0.25),
        ("easy", 0.43),
        ("fair", 0.7),
        ("reasonable", 0.2),
        ("relieved", 0.5),
        ("positive", 0.23),
        ("honest", 0.6),
        ("right", 0.29),
        ("stable", 0.3),
        // Negative
        ("bad", -0.7),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("horrible", -1.0),
        ("worst", -1.0),
        ("worse", -0.4),
        ("hate", -0.8),
        ("sorry", -0.5),
        ("sad", -0.5),
        ("angry", -0.5),
        ("upset", -0.5),
        ("worried", -0.4),
        ("anxious", -0.4),
        ("scared", -0.5),
        ("afraid", -0.6),
        ("stressed", -0.5),
        ("stressful", -0.5),
        ("difficult", -0.5),
        ("hard", -0.3),
        ("tough", -0.4),
        ("impossible", -0.67),
        ("poor", -0.4),
        ("broke", -0.4),
        ("sick", -0.71),
        ("ill", -0.5),
        ("unemployed", -0.3),
        ("desperate", -0.6),
        ("annoying", -0.8),
        ("annoyed", -0.6),
        ("frustrated", -0.7),
        ("frustrating", -0.7),
        ("ridiculous", -0.33),
        ("stupid", -0.8),
        ("useless", -0.5),
        ("unfair", -0.5),
        ("wrong", -0.5),
        ("fake", -0.5),
        ("crazy", -0.6),
        ("rude", -0.3),
        ("harassment", -0.6),
        ("late", -0.3),
        ("little", -0.19),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 1.3),
        ("so", 1.3),
        ("too", 1.2),
        ("quite", 1.1),
        ("extremely", 1.5),
        ("incredibly", 1.5),
        ("totally", 1.3),
        ("absolutely", 1.4),
        ("completely", 1.4),
    ]
    .into_iter()
    .collect()
});

const NEGATORS: &[&str] = &["not", "no", "never", "cannot", "none", "nothing", "nobody", "neither"];

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't") || word.ends_with("n\u{2019}t")
}

/// Lexicon-based polarity analyzer (English)
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Polarity of a single word, if it is an opinion word
    pub fn word_polarity(word: &str) -> Option<f32> {
        POLARITY.get(word.to_lowercase().as_str()).copied()
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> Result<f32> {
        let lower = text.to_lowercase();

        let mut values: Vec<f32> = Vec::new();
        let mut intensity = 1.0_f32;
        let mut negation_left = 0_usize;

        for word in lower.unicode_words() {
            if is_negator(word) {
                negation_left = NEGATION_SCOPE;
                continue;
            }

            if let Some(factor) = INTENSIFIERS.get(word) {
                intensity *= factor;
                continue;
            }

            match POLARITY.get(word) {
                Some(&base) => {
                    let mut value = base * intensity;
                    if negation_left > 0 {
                        value *= NEGATION_FACTOR;
                    }
                    values.push(value.clamp(-1.0, 1.0));
                    intensity = 1.0;
                    negation_left = 0;
                },
                None => {
                    intensity = 1.0;
                    negation_left = negation_left.saturating_sub(1);
                },
            }
        }

        if values.is_empty() {
            return Ok(0.0);
        }

        let mean = values.iter().sum::<f32>() / values.len() as f32;
        if !mean.is_finite() {
            return Err(TextProcessingError::InvalidPolarity(mean));
        }

        Ok(mean.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> f32 {
        LexiconAnalyzer::new().polarity(text).unwrap()
    }

    #[test]
    fn test_no_opinion_words() {
        assert_eq!(polarity("The payment is due on the fifth"), 0.0);
        assert_eq!(polarity(""), 0.0);
    }

    #[test]
    fn test_average_of_opinion_words() {
        // great (0.8) and bad (-0.7) average to 0.05
        let p = polarity("The offer is great but the timing is bad");
        assert!((p - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_intensifier_scales_next_word() {
        assert!(polarity("I am very happy") > polarity("I am happy"));
        // Clamped at the top of the range
        assert_eq!(polarity("extremely perfect"), 1.0);
    }

    #[test]
    fn test_negation_flips_and_damps() {
        let p = polarity("I am not happy");
        assert!((p + 0.4).abs() < 1e-6);

        let p = polarity("This isn't bad");
        assert!((p - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_negation_scope_expires() {
        // Too many neutral words separate the negator from the opinion word
        let p = polarity("not that I would say anything good");
        assert!((p - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(polarity("TERRIBLE"), -1.0);
        assert_eq!(LexiconAnalyzer::word_polarity("Great"), Some(0.8));
        assert_eq!(LexiconAnalyzer::word_polarity("loan"), None);
    }

    #[test]
    fn test_always_in_range() {
        for text in [
            "very very very very very great",
            "absolutely completely terrible awful horrible",
            "no no no no",
            "!!!",
        ] {
            let p = polarity(text);
            assert!((-1.0..=1.0).contains(&p), "{} -> {}", text, p);
        }
    }
}
