//! Call Session
//!
//! One simulated collections call: the transcript plus the analyzers that
//! read it. The session is the only writer of the transcript; analyzers
//! only ever see a borrowed slice.

use chrono::{DateTime, Utc};
use collection_sim_config::{Scenario, ScenarioCatalog};
use collection_sim_core::{
    borrower_messages, IntentResult, Message, SentimentResult, StrategyRecord,
};
use collection_sim_text_processing::{IntentClassifier, SentimentScorer};
use serde::Serialize;

use crate::response::ResponseComposer;
use crate::strategy::StrategyAdvisor;
use crate::{AgentError, Result};

/// Agent reply to a borrower turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnOutcome {
    pub reply: String,
    pub intent: IntentResult,
}

/// Analysis panel for the latest borrower turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnAnalysis {
    /// Sentiment of the latest borrower message
    pub sentiment: SentimentResult,
    /// Intent over the recent borrower history
    pub intent: IntentResult,
    pub strategy: StrategyRecord,
}

/// A single simulated call
#[derive(Debug)]
pub struct CallSession {
    id: String,
    started_at: DateTime<Utc>,
    scenario: Option<String>,
    transcript: Vec<Message>,
    classifier: IntentClassifier,
    scorer: SentimentScorer,
    composer: ResponseComposer,
    advisor: StrategyAdvisor,
}

impl CallSession {
    /// Create an empty session
    pub fn new(composer: ResponseComposer) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            scenario: None,
            transcript: Vec::new(),
            classifier: IntentClassifier::new(),
            scorer: SentimentScorer::new(),
            composer,
            advisor: StrategyAdvisor::new(),
        }
    }

    /// Use a custom intent classifier
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use a custom sentiment scorer
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Key of the scenario the call was started from
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Replace the transcript with a scenario's starter messages
    pub fn start(&mut self, scenario: &Scenario) {
        self.transcript = scenario.starter.clone();
        self.scenario = Some(scenario.key.clone());
        tracing::info!(
            session_id = %self.id,
            scenario = %scenario.key,
            messages = self.transcript.len(),
            "Call started"
        );
    }

    /// Start from a scenario looked up by key
    pub fn start_by_key(&mut self, catalog: &ScenarioCatalog, key: &str) -> Result<()> {
        let scenario = catalog
            .get(key)
            .ok_or_else(|| AgentError::UnknownScenario(key.to_string()))?;
        self.start(scenario);
        Ok(())
    }

    /// Drop the whole transcript
    pub fn clear(&mut self) {
        self.transcript.clear();
        tracing::info!(session_id = %self.id, "Transcript cleared");
    }

    /// Take a borrower turn and answer it
    ///
    /// Blank input is ignored and leaves the transcript untouched.
    pub fn handle_borrower_input(&mut self, text: &str) -> Option<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(Message::borrower(text));

        let intent = self.classifier.classify(&self.transcript);
        let reply = self.composer.compose(intent.label, text);
        self.transcript.push(Message::agent(reply.clone()));

        tracing::info!(
            session_id = %self.id,
            intent = intent.label.as_str(),
            turns = self.transcript.len(),
            "Borrower turn handled"
        );

        Some(TurnOutcome { reply, intent })
    }

    /// Analysis of the latest borrower turn, if the borrower has spoken
    pub fn analyze(&self) -> Option<TurnAnalysis> {
        let last = borrower_messages(&self.transcript).last()?;

        let sentiment = self.scorer.score(&last.content);
        let intent = self.classifier.classify(&self.transcript);
        let strategy = self.advisor.recommend(intent.label, &sentiment);

        Some(TurnAnalysis {
            sentiment,
            intent,
            strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_sim_core::{BorrowerIntent, TurnRole};

    fn session() -> CallSession {
        CallSession::new(ResponseComposer::with_seed(11))
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = session();
        assert!(session.transcript().is_empty());
        assert!(session.scenario().is_none());
        assert!(session.analyze().is_none());
        assert!(uuid::Uuid::parse_str(session.id()).is_ok());
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut session = session();
        assert!(session.handle_borrower_input("   ").is_none());
        assert!(session.handle_borrower_input("").is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_turn_appends_borrower_and_agent() {
        let mut session = session();
        let outcome = session.handle_borrower_input("  I lost my job and cannot pay  ").unwrap();

        assert_eq!(outcome.intent.label, BorrowerIntent::AbilityIssue);
        assert_eq!(outcome.reply, crate::response::JOB_LOSS_REPLY);

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], Message::borrower("I lost my job and cannot pay"));
        assert_eq!(transcript[1].role, TurnRole::Agent);
        assert_eq!(transcript[1].content, outcome.reply);
    }

    #[test]
    fn test_analyze_uses_latest_borrower_message() {
        let mut session = session();
        session.handle_borrower_input("This is terrible, I am so worried");
        session.handle_borrower_input("I will not pay, stop calling");

        let analysis = session.analyze().unwrap();
        assert_eq!(analysis.intent.label, BorrowerIntent::WillingnessIssue);
        assert_eq!(analysis.strategy.action, "Assertive Negotiation");
        // The latest message has no opinion words
        assert_eq!(analysis.sentiment, SentimentResult::neutral());
    }

    #[test]
    fn test_start_and_clear() {
        let catalog = ScenarioCatalog::builtin();
        let mut session = session();

        session.start_by_key(catalog, "medical_emergency").unwrap();
        assert_eq!(session.scenario(), Some("medical_emergency"));
        assert_eq!(session.transcript().len(), 5);

        session.clear();
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_unknown_scenario() {
        let mut session = session();
        assert_eq!(
            session.start_by_key(ScenarioCatalog::builtin(), "lottery_win"),
            Err(AgentError::UnknownScenario("lottery_win".to_string()))
        );
        assert!(session.transcript().is_empty());
    }
}
