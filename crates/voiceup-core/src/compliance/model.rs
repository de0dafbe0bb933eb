//! Compliance domain models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rule name to pass/fail, as stored with an analysis.
pub type ComplianceSummary = BTreeMap<String, bool>;

/// Named compliance checks evaluated against the agent side of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// The agent opens the conversation with a greeting.
    Greeting,
    /// The agent addresses the customer by name.
    Personalization,
    /// The agent apologizes at least once.
    Apology,
    /// The agent confirms the issue is resolved.
    Resolution,
    /// The agent makes no absolute promises.
    NoUnsupportedClaims,
}

impl Rule {
    /// Every rule, in evaluation order.
    pub const ALL: [Rule; 5] = [
        Rule::Greeting,
        Rule::Personalization,
        Rule::Apology,
        Rule::Resolution,
        Rule::NoUnsupportedClaims,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Personalization => "personalization",
            Self::Apology => "apology",
            Self::Resolution => "resolution",
            Self::NoUnsupportedClaims => "no_unsupported_claims",
        }
    }
}

/// Keyword configuration for the compliance rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceRules {
    /// Minimum overall score for a conversation to count as compliant.
    pub compliant_threshold: i64,
    pub greeting_words: Vec<String>,
    /// Known customer names the agent may use.
    pub customer_names: Vec<String>,
    pub apology_words: Vec<String>,
    pub resolution_words: Vec<String>,
    pub unsupported_claims: Vec<String>,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for ComplianceRules {
    fn default() -> Self {
        Self {
            compliant_threshold: 80,
            greeting_words: strings(&["hi", "hello", "welcome"]),
            customer_names: strings(&["Alex", "John", "Sarah", "Mike"]),
            apology_words: strings(&["sorry", "apologize", "apologise", "apologies"]),
            resolution_words: strings(&["fixed", "resolved", "working", "solved"]),
            unsupported_claims: strings(&["guarantee", "always", "never fails", "forever"]),
        }
    }
}
