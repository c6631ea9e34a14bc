//! Negotiation strategy per borrower intent

use collection_sim_core::{BorrowerIntent, SentimentResult, StrategyRecord};

const RESTRUCTURING: StrategyRecord = StrategyRecord {
    action: "Restructuring & Support",
    script: "Offer empathy + payment plan restructuring (NPV maximization)",
    tone: "Supportive",
    economic_principle: "Preserve long-term value via temporary relief",
};

const ASSERTIVE_NEGOTIATION: StrategyRecord = StrategyRecord {
    action: "Assertive Negotiation",
    script: "Highlight credit score damage (CIBIL) & legal escalation",
    tone: "Firm but Professional",
    economic_principle: "Increase cost of default",
};

const ROOT_CAUSE_ANALYSIS: StrategyRecord = StrategyRecord {
    action: "Root Cause Analysis",
    script: "Ask diagnostic questions to categorize default type",
    tone: "Inquisitive",
    economic_principle: "Information asymmetry reduction",
};

/// Maps an intent to the strategy the agent should follow
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyAdvisor;

impl StrategyAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Recommended strategy for the intent
    ///
    /// Sentiment is accepted for callers that have it but does not change
    /// the recommendation.
    pub fn recommend(&self, intent: BorrowerIntent, _sentiment: &SentimentResult) -> StrategyRecord {
        match intent {
            BorrowerIntent::AbilityIssue => RESTRUCTURING,
            BorrowerIntent::WillingnessIssue => ASSERTIVE_NEGOTIATION,
            BorrowerIntent::DiscoveryNeeded => ROOT_CAUSE_ANALYSIS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_sim_core::SentimentLabel;

    #[test]
    fn test_strategy_table() {
        let advisor = StrategyAdvisor::new();
        let neutral = SentimentResult::neutral();

        let s = advisor.recommend(BorrowerIntent::AbilityIssue, &neutral);
        assert_eq!(s.action, "Restructuring & Support");
        assert_eq!(s.tone, "Supportive");

        let s = advisor.recommend(BorrowerIntent::WillingnessIssue, &neutral);
        assert_eq!(s.action, "Assertive Negotiation");
        assert_eq!(s.economic_principle, "Increase cost of default");

        let s = advisor.recommend(BorrowerIntent::DiscoveryNeeded, &neutral);
        assert_eq!(s.action, "Root Cause Analysis");
        assert_eq!(s.script, "Ask diagnostic questions to categorize default type");
    }

    #[test]
    fn test_sentiment_does_not_change_strategy() {
        let advisor = StrategyAdvisor::new();
        let negative = SentimentResult {
            label: SentimentLabel::Negative,
            score: 0.99,
            polarity: -1.0,
        };
        for intent in BorrowerIntent::ALL {
            assert_eq!(
                advisor.recommend(intent, &negative),
                advisor.recommend(intent, &SentimentResult::neutral())
            );
        }
    }
}
