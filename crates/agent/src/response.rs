//! Agent reply composition
//!
//! Replies are built by picking one fragment from each of an intent's
//! ordered fragment lists and joining them. Two hardship triggers on the
//! ability path short-circuit to fixed replies.
//!
//! ## Usage
//!
//! ```
//! use collection_sim_agent::ResponseComposer;
//! use collection_sim_core::BorrowerIntent;
//!
//! let mut composer = ResponseComposer::with_seed(7);
//! let reply = composer.compose(BorrowerIntent::DiscoveryNeeded, "Hello?");
//! assert!(!reply.is_empty());
//! ```

use collection_sim_core::BorrowerIntent;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

// =============================================================================
// Canned replies
// =============================================================================

/// Reply for borrowers who mention losing their job
pub const JOB_LOSS_REPLY: &str = "I'm sorry to hear about the job loss. That is incredibly stressful. We have a hardship program for this exact situation - can we discuss pausing your payments for 90 days?";

/// Reply for borrowers who mention a medical situation
pub const MEDICAL_HOLD_REPLY: &str = "I hope your family recovers soon. Health is the priority here. I can put a 'Medical Hold' on your account for 30 days so you don't receive calls. Does that help?";

const JOB_LOSS_TRIGGERS: &[&str] = &["job", "unemployed"];
const MEDICAL_TRIGGERS: &[&str] = &["medical", "hospital"];

// =============================================================================
// Fragment tables
// =============================================================================

/// A named, ordered list of sentence fragments
#[derive(Debug, Clone, Copy)]
pub struct FragmentList {
    pub name: &'static str,
    pub fragments: &'static [&'static str],
}

const ABILITY_INTROS: &[&str] = &[
    "I hear you,",
    "I understand,",
    "Thank you for sharing that,",
    "I appreciate your honesty,",
    "I can see this is difficult,",
];

const ABILITY_EMPATHY: &[&str] = &[
    "financial constraints can be incredibly stressful.",
    "it sounds like you're going through a tough time right now.",
    "we know that unexpected expenses happen.",
    "your situation sounds challenging.",
    "managing finances during a crisis is never easy.",
];

const ABILITY_SOLUTIONS: &[&str] = &[
    "Let's look at a payment holiday for a few weeks.",
    "We can explore restructuring your loan to lower the EMI.",
    "Would a temporary freeze on interest help you get back on track?",
    "I can check if you qualify for our hardship assistance program.",
    "How about we pause payments for this month?",
];

const WILLINGNESS_INTROS: &[&str] = &[
    "I understand you have other priorities,",
    "I hear your frustration,",
    "I want to be transparent with you,",
    "I need to be direct,",
];

const WILLINGNESS_REALITY_CHECKS: &[&str] = &[
    "however, a default stays on your record for 7 years.",
    "but delaying this further will severely impact your CIBIL score.",
    "ignoring this won't make the debt go away.",
    "but this account is scheduled for legal escalation next week.",
    "consequences like legal notices are automated after 90 days.",
];

const WILLINGNESS_ACTIONS: &[&str] = &[
    "Can we clear just the minimum due today?",
    "Is there any partial amount you can pay right now to hold off action?",
    "Let's avoid that - can you commit to a date this week?",
    "I can hold off the legal team if you make a small payment today.",
    "Please make a payment today to protect your credit score.",
];

const DISCOVERY_INTROS: &[&str] = &[
    "I'd like to understand help,",
    "To find the best solution,",
    "I'm here to work with you,",
    "Help me understand,",
];

const DISCOVERY_QUESTIONS: &[&str] = &[
    "could you tell me a bit more about what's causing the delay?",
    "is this a temporary cash flow issue or something longer term?",
    "what specifically is preventing payment right now?",
    "are there other debts you are prioritizing at the moment?",
    "what would make it easier for you to pay this month?",
];

static FRAGMENT_TABLE: Lazy<HashMap<BorrowerIntent, Vec<FragmentList>>> = Lazy::new(|| {
    let list = |name, fragments| FragmentList { name, fragments };

    HashMap::from([
        (
            BorrowerIntent::AbilityIssue,
            vec![
                list("intros", ABILITY_INTROS),
                list("empathy", ABILITY_EMPATHY),
                list("solutions", ABILITY_SOLUTIONS),
            ],
        ),
        (
            BorrowerIntent::WillingnessIssue,
            vec![
                list("intros", WILLINGNESS_INTROS),
                list("reality_check", WILLINGNESS_REALITY_CHECKS),
                list("actions", WILLINGNESS_ACTIONS),
            ],
        ),
        (
            BorrowerIntent::DiscoveryNeeded,
            vec![
                list("intros", DISCOVERY_INTROS),
                list("questions", DISCOVERY_QUESTIONS),
            ],
        ),
    ])
});

/// Ordered fragment lists used to compose replies for an intent
pub fn fragment_lists(intent: BorrowerIntent) -> &'static [FragmentList] {
    FRAGMENT_TABLE
        .get(&intent)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

// =============================================================================
// Composer
// =============================================================================

/// Composes agent replies with a seedable random source
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    rng: StdRng,
}

impl ResponseComposer {
    /// Composer seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Composer with a fixed seed for reproducible replies
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Composer seeded when a seed is configured, from entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::with_seed)
    }

    /// Compose a reply using the composer's own random source
    pub fn compose(&mut self, intent: BorrowerIntent, borrower_message: &str) -> String {
        compose_reply(intent, borrower_message, &mut self.rng)
    }

    /// Compose a reply drawing randomness from `rng`
    pub fn compose_with<R: Rng + ?Sized>(
        &self,
        intent: BorrowerIntent,
        borrower_message: &str,
        rng: &mut R,
    ) -> String {
        compose_reply(intent, borrower_message, rng)
    }

    /// Compose a reply for a free-form intent label
    ///
    /// Unrecognized labels get a discovery reply.
    pub fn compose_for_label(&mut self, label: &str, borrower_message: &str) -> String {
        self.compose(BorrowerIntent::from_label(label), borrower_message)
    }
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed reply for a high-signal hardship message, if any
pub fn canned_reply(intent: BorrowerIntent, borrower_message: &str) -> Option<&'static str> {
    if intent != BorrowerIntent::AbilityIssue {
        return None;
    }

    let lower = borrower_message.to_lowercase();
    if JOB_LOSS_TRIGGERS.iter().any(|t| lower.contains(t)) {
        Some(JOB_LOSS_REPLY)
    } else if MEDICAL_TRIGGERS.iter().any(|t| lower.contains(t)) {
        Some(MEDICAL_HOLD_REPLY)
    } else {
        None
    }
}

fn compose_reply<R: Rng + ?Sized>(
    intent: BorrowerIntent,
    borrower_message: &str,
    rng: &mut R,
) -> String {
    if let Some(reply) = canned_reply(intent, borrower_message) {
        tracing::debug!(intent = intent.as_str(), "Using canned reply");
        return reply.to_string();
    }

    let parts: Vec<&str> = fragment_lists(intent)
        .iter()
        .filter_map(|list| list.fragments.choose(&mut *rng).copied())
        .collect();

    tracing::debug!(intent = intent.as_str(), fragments = ?parts, "Composed reply");
    parts.join(" ")
}
