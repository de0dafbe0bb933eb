//! Compliance rule evaluation.
//!
//! Rules only inspect messages sent by the agent; customer messages are used
//! solely to learn the customer's name.

pub mod model;

use crate::conversation::model::Message;
use crate::text::{contains_phrase, tokenize};
use model::{ComplianceRules, ComplianceSummary, Rule};

/// Sender value identifying the support agent.
pub const AGENT: &str = "agent";

impl ComplianceRules {
    /// Evaluate every rule against a conversation's messages.
    pub fn evaluate(&self, messages: &[Message]) -> ComplianceSummary {
        let agent: Vec<Vec<String>> = messages
            .iter()
            .filter(|m| m.is_from_agent())
            .map(|m| tokenize(&m.text))
            .collect();

        Rule::ALL
            .iter()
            .map(|rule| (rule.as_str().to_string(), self.check(*rule, messages, &agent)))
            .collect()
    }

    fn check(&self, rule: Rule, messages: &[Message], agent: &[Vec<String>]) -> bool {
        let any_agent = |words: &[String]| {
            agent
                .iter()
                .any(|tokens| words.iter().any(|w| contains_phrase(tokens, w)))
        };

        match rule {
            Rule::Greeting => messages.first().is_some_and(|first| {
                first.is_from_agent() && {
                    let tokens = tokenize(&first.text);
                    self.greeting_words.iter().any(|w| contains_phrase(&tokens, w))
                }
            }),
            Rule::Personalization => {
                let mut names: Vec<String> = self.customer_names.clone();
                names.extend(stated_names(messages));
                messages
                    .iter()
                    .filter(|m| m.is_from_agent())
                    .any(|m| {
                        raw_words(&m.text)
                            .map(|w| w.strip_suffix("'s").unwrap_or(w))
                            .any(|w| names.iter().any(|n| n == w))
                    })
            }
            Rule::Apology => any_agent(self.apology_words.as_slice()),
            Rule::Resolution => any_agent(self.resolution_words.as_slice()),
            Rule::NoUnsupportedClaims => !any_agent(self.unsupported_claims.as_slice()),
        }
    }

    /// Whether `score` meets the compliant threshold.
    pub fn is_compliant(&self, score: i64) -> bool {
        score >= self.compliant_threshold
    }
}

/// Overall score: share of passed rules as a rounded percentage.
pub fn compliance_score(summary: &ComplianceSummary) -> i64 {
    if summary.is_empty() {
        return 0;
    }
    let passed = summary.values().filter(|v| **v).count() as f64;
    (passed / summary.len() as f64 * 100.0).round() as i64
}

/// Words of `text` with their original case. Names are matched case-sensitively.
fn raw_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|w| !w.is_empty())
}

/// Names customers introduce themselves with ("I'm John", "my name is Sarah").
fn stated_names(messages: &[Message]) -> Vec<String> {
    let mut names = Vec::new();

    for msg in messages.iter().filter(|m| !m.is_from_agent()) {
        let words: Vec<&str> = raw_words(&msg.text).collect();
        let lower: Vec<String> = words.iter().map(|w| w.replace('\u{2019}', "'").to_lowercase()).collect();

        for i in 0..words.len() {
            let offset = match lower[i].as_str() {
                "i'm" | "im" => Some(1),
                "i" if lower.get(i + 1).is_some_and(|w| w == "am") => Some(2),
                "my" if lower.get(i + 1).is_some_and(|w| w == "name")
                    && lower.get(i + 2).is_some_and(|w| w == "is") =>
                {
                    Some(3)
                }
                _ => None,
            };

            if let Some(candidate) = offset.and_then(|o| words.get(i + o)) {
                let capitalized = candidate.chars().next().is_some_and(char::is_uppercase);
                if capitalized && candidate.chars().count() > 1 {
                    names.push(candidate.to_string());
                }
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(lines: &[(&str, &str)]) -> Vec<Message> {
        lines
            .iter()
            .enumerate()
            .map(|(i, (sender, text))| Message {
                id: i as i64 + 1,
                conversation_id: 1,
                sender: sender.to_string(),
                text: text.to_string(),
                timestamp: format!("2025-01-01T10:{:02}:00Z", i * 2),
            })
            .collect()
    }

    #[test]
    fn test_all_rules_pass() {
        let messages = conversation(&[
            ("agent", "Hi Alex! Welcome to VoiceUp Support."),
            ("customer", "My internet keeps disconnecting."),
            ("agent", "I'm so sorry, Alex. Let me check."),
            ("agent", "It's working again and the issue is resolved."),
        ]);
        let summary = ComplianceRules::default().evaluate(&messages);

        assert_eq!(summary.len(), 5);
        assert!(summary.values().all(|v| *v));
        assert_eq!(compliance_score(&summary), 100);
    }

    #[test]
    fn test_greeting_requires_agent_first() {
        let rules = ComplianceRules::default();
        let messages = conversation(&[("customer", "Hello?"), ("agent", "Hello, how can I help?")]);
        assert!(!rules.evaluate(&messages)["greeting"]);

        let messages = conversation(&[("agent", "This is support, what is the problem?")]);
        assert!(!rules.evaluate(&messages)["greeting"], "'this' must not count as 'hi'");
    }

    #[test]
    fn test_customer_words_do_not_count() {
        let messages = conversation(&[
            ("agent", "Hello."),
            ("customer", "Sorry, is it fixed? It is working now."),
        ]);
        let summary = ComplianceRules::default().evaluate(&messages);
        assert!(!summary["apology"]);
        assert!(!summary["resolution"]);
    }

    #[test]
    fn test_unsupported_claims() {
        let rules = ComplianceRules::default();
        let messages = conversation(&[("agent", "Guaranteed it will be fine soon!")]);
        assert!(!rules.evaluate(&messages)["no_unsupported_claims"]);

        let messages = conversation(&[("agent", "Our network never has issues.")]);
        assert!(rules.evaluate(&messages)["no_unsupported_claims"]);
    }

    #[test]
    fn test_personalization_uses_stated_name() {
        let rules = ComplianceRules {
            customer_names: Vec::new(),
            ..ComplianceRules::default()
        };
        let messages = conversation(&[
            ("agent", "Hello!"),
            ("customer", "Hi, my name is Priya and my modem is dead."),
            ("agent", "Thanks Priya, checking now."),
        ]);
        assert!(rules.evaluate(&messages)["personalization"]);

        let messages = conversation(&[
            ("agent", "Hello!"),
            ("customer", "I'm having network issues."),
            ("agent", "Having trouble? Let me look."),
        ]);
        assert!(!rules.evaluate(&messages)["personalization"]);
    }

    #[test]
    fn test_personalization_is_case_sensitive() {
        let rules = ComplianceRules {
            customer_names: Vec::new(),
            ..ComplianceRules::default()
        };
        let messages = conversation(&[
            ("agent", "Hello!"),
            ("customer", "I'm Very upset about my bill."),
            ("agent", "I'm very sorry to hear that."),
        ]);
        assert!(!rules.evaluate(&messages)["personalization"]);

        let messages = conversation(&[
            ("agent", "Hello!"),
            ("customer", "Hi, I'm John."),
            ("agent", "Thanks john, one moment."),
        ]);
        assert!(!ComplianceRules::default().evaluate(&messages)["personalization"]);
    }

    #[test]
    fn test_score_rounding() {
        let mut summary = ComplianceSummary::new();
        summary.insert("a".into(), true);
        summary.insert("b".into(), true);
        summary.insert("c".into(), false);
        assert_eq!(compliance_score(&summary), 67);
        assert_eq!(compliance_score(&ComplianceSummary::new()), 0);
    }

    #[test]
    fn test_threshold() {
        let rules = ComplianceRules::default();
        assert!(rules.is_compliant(80));
        assert!(!rules.is_compliant(79));
    }
}
