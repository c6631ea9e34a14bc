//! Integration tests for simulated collection calls
//!
//! These tests drive a call session from a built-in scenario through
//! borrower turns and check the analysis panel at each step.

use collection_sim_agent::response::{JOB_LOSS_REPLY, MEDICAL_HOLD_REPLY};
use collection_sim_agent::{CallSession, ResponseComposer};
use collection_sim_config::{ScenarioCatalog, QUICK_REPLIES};
use collection_sim_core::{BorrowerIntent, SentimentLabel};
use collection_sim_text_processing::IntentClassifier;

fn started(key: &str, seed: u64) -> CallSession {
    let mut session = CallSession::new(ResponseComposer::with_seed(seed));
    session.start_by_key(ScenarioCatalog::builtin(), key).unwrap();
    session
}

/// A hospital stay in the starter reads as a distress call
#[test]
fn test_medical_emergency_starter() {
    let session = started("medical_emergency", 1);

    let analysis = session.analyze().unwrap();
    assert_eq!(analysis.intent.label, BorrowerIntent::AbilityIssue);
    assert_eq!(analysis.strategy.action, "Restructuring & Support");
    assert_eq!(analysis.sentiment.label, SentimentLabel::Negative);
}

/// "wait" and "stop" cancel out until the borrower refuses outright
#[test]
fn test_strategic_default_escalates_to_willingness() {
    let mut session = started("strategic_default", 2);

    let analysis = session.analyze().unwrap();
    assert_eq!(analysis.intent.label, BorrowerIntent::DiscoveryNeeded);
    assert_eq!(analysis.strategy.action, "Root Cause Analysis");

    let outcome = session.handle_borrower_input("I refuse to pay this").unwrap();
    assert_eq!(outcome.intent.label, BorrowerIntent::WillingnessIssue);

    let analysis = session.analyze().unwrap();
    assert_eq!(analysis.intent.label, BorrowerIntent::WillingnessIssue);
    assert_eq!(analysis.strategy.tone, "Firm but Professional");
}

/// The job-loss starter alone is unclear; stating inability settles it
#[test]
fn test_job_loss_becomes_ability_issue() {
    let mut session = started("job_loss", 3);
    assert_eq!(
        session.analyze().unwrap().intent.label,
        BorrowerIntent::DiscoveryNeeded
    );

    let outcome = session
        .handle_borrower_input("I cannot pay until I find a new job")
        .unwrap();
    assert_eq!(outcome.intent.label, BorrowerIntent::AbilityIssue);
    assert_eq!(outcome.reply, JOB_LOSS_REPLY);
    assert_eq!(session.transcript().len(), 7);
}

#[test]
fn test_quick_replies() {
    let expected = [
        (BorrowerIntent::AbilityIssue, Some(JOB_LOSS_REPLY)),
        (BorrowerIntent::AbilityIssue, Some(MEDICAL_HOLD_REPLY)),
        (BorrowerIntent::WillingnessIssue, None),
        (BorrowerIntent::AbilityIssue, None),
    ];

    for (quick, (intent, canned)) in QUICK_REPLIES.iter().zip(expected) {
        let mut session = CallSession::new(ResponseComposer::with_seed(4));
        let outcome = session.handle_borrower_input(quick.text).unwrap();
        assert_eq!(outcome.intent.label, intent, "{}", quick.label);
        if let Some(reply) = canned {
            assert_eq!(outcome.reply, reply, "{}", quick.label);
        }
    }
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let turns = ["Why should I talk to you?", "I am busy", "Hmm, maybe later"];

    let mut a = started("strategic_default", 99);
    let mut b = started("strategic_default", 99);
    for turn in turns {
        assert_eq!(a.handle_borrower_input(turn), b.handle_borrower_input(turn));
    }
    assert_eq!(a.transcript(), b.transcript());
}

#[test]
fn test_analyze_does_not_touch_transcript() {
    let mut session = started("job_loss", 5);
    session.handle_borrower_input("Please, things are tight");

    let before = session.transcript().to_vec();
    let first = session.analyze();
    let second = session.analyze();
    assert_eq!(first, second);
    assert_eq!(session.transcript(), before.as_slice());
}

#[test]
fn test_history_window_setting() {
    let mut session = CallSession::new(ResponseComposer::with_seed(6))
        .with_classifier(IntentClassifier::with_window(1));
    session.handle_borrower_input("Talk to my lawyer");
    session.handle_borrower_input("ok");

    // Only "ok" is in the window
    assert_eq!(
        session.analyze().unwrap().intent.label,
        BorrowerIntent::DiscoveryNeeded
    );
}

#[test]
fn test_analysis_json_shape() {
    let mut session = started("medical_emergency", 7);
    session.handle_borrower_input("I am unable to pay, this is terrible");

    let analysis = session.analyze().unwrap();
    let json = serde_json::to_value(analysis).unwrap();

    assert_eq!(json["intent"]["label"], "ability_issue");
    assert_eq!(json["sentiment"]["label"], "NEGATIVE");
    assert_eq!(
        json["strategy"]["economic_principle"],
        "Preserve long-term value via temporary relief"
    );
}
