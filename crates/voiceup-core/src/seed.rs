//! Demo data.
//!
//! Five support conversations covering good, poor and mixed compliance.

use chrono::{Duration, Utc};
use voiceup_db::queries::analyses::NewAnalysisRow;
use voiceup_db::queries::conversations::{self as queries, AnalyzedConversationRow, NewMessageRow};
use voiceup_db::DbPool;

use crate::analysis::Analyzer;
use crate::conversation::model::Message;
use crate::conversation::MESSAGE_SPACING_MINUTES;
use crate::error::VoiceupResult;
use crate::{format_timestamp, now_timestamp};

type Script = &'static [(&'static str, &'static str)];

const CONVERSATIONS: [Script; 5] = [
    &[
        ("agent", "Hi Alex! Welcome to VoiceUp Support. How can I help you?"),
        ("customer", "My internet keeps disconnecting and it's really frustrating!"),
        ("agent", "I'm so sorry for the inconvenience, Alex. Let me check this for you."),
        ("customer", "Thanks, I hope it gets fixed soon."),
        ("agent", "I have reset your connection. Could you please check now?"),
        ("customer", "Yes, it's working now. Thank you!"),
    ],
    &[
        ("agent", "Hello, how can I assist you today?"),
        ("customer", "My router is showing a red light and no internet."),
        ("agent", "No worries, our routers usually fix themselves in a few minutes."),
        ("customer", "Are you sure? This has been happening for an hour."),
        ("agent", "Guaranteed it will be fine soon!"),
    ],
    &[
        ("agent", "Hello Sarah! Welcome to VoiceUp support. How may I assist you today?"),
        ("customer", "Hi, my internet speed is very slow lately."),
        ("agent", "I understand this must be frustrating, Sarah. Let me run a speed test."),
        ("customer", "Thank you, please check."),
        ("agent", "I've optimized your connection settings. Can you try now?"),
        ("customer", "Much better now, thank you!"),
        ("agent", "Wonderful! Is there anything else I can help you with, Sarah?"),
    ],
    &[
        ("agent", "What do you want?"),
        ("customer", "Is this how you greet customers? I'm having network issues."),
        ("agent", "Our network never has issues, must be your device."),
        ("customer", "This is terrible service!"),
        ("agent", "Try restarting your router."),
    ],
    &[
        ("agent", "Hello! How can I help you today?"),
        ("customer", "Hi, I'm John. My Wi-Fi keeps dropping."),
        ("agent", "Let me check that for you."),
        ("customer", "It's really annoying!"),
        ("agent", "I understand your frustration. I've reset your connection."),
        ("customer", "Is it fixed now?"),
        ("agent", "Yes, it should work better now."),
    ],
];

/// A scripted conversation analyzed in memory, ready to store.
struct Prepared {
    messages: Vec<Message>,
    emotion_summary: String,
    compliance_summary: String,
    score: i64,
}

/// Replace all stored data with the demo conversations and their analyses.
///
/// Everything is analyzed before the database is touched and then written in
/// one transaction, so a failure leaves the previous contents in place.
/// Returns the ids of the created conversations.
pub fn seed_database(pool: &DbPool, analyzer: &Analyzer) -> VoiceupResult<Vec<i64>> {
    tracing::info!("seeding database");

    let start = Utc::now();
    let created_at = format_timestamp(start);
    let analyzed_at = now_timestamp();

    let mut prepared = Vec::with_capacity(CONVERSATIONS.len());
    for script in CONVERSATIONS {
        let messages: Vec<Message> = script
            .iter()
            .enumerate()
            .map(|(i, (sender, text))| Message {
                id: 0,
                conversation_id: 0,
                sender: sender.to_string(),
                text: text.to_string(),
                timestamp: format_timestamp(
                    start + Duration::minutes(MESSAGE_SPACING_MINUTES * i as i64),
                ),
            })
            .collect();

        let analysis = analyzer.analyze_messages(&messages);
        prepared.push(Prepared {
            emotion_summary: serde_json::to_string(&analysis.emotion_summary)?,
            compliance_summary: serde_json::to_string(&analysis.compliance_summary)?,
            score: analysis.overall_compliance_score,
            messages,
        });
    }

    let rows: Vec<AnalyzedConversationRow<'_>> = prepared
        .iter()
        .map(|p| AnalyzedConversationRow {
            created_at: &created_at,
            messages: p
                .messages
                .iter()
                .map(|m| NewMessageRow {
                    sender: &m.sender,
                    text: &m.text,
                    timestamp: &m.timestamp,
                })
                .collect(),
            analysis: NewAnalysisRow {
                emotion_summary: &p.emotion_summary,
                compliance_summary: &p.compliance_summary,
                overall_compliance_score: p.score,
                analyzed_at: &analyzed_at,
            },
        })
        .collect();

    let ids = queries::replace_all(pool, &rows)?;
    tracing::info!(conversations = ids.len(), "database seeded");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::compliance::model::ComplianceRules;
    use crate::conversation;
    use crate::conversation::model::NewMessage;

    #[test]
    fn test_seed_scores() {
        let pool = voiceup_db::init_memory_pool().unwrap();
        let analyzer = Analyzer::lexicon(ComplianceRules::default());

        let ids = seed_database(&pool, &analyzer).unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let scores: Vec<i64> = analysis::list_analyses(&pool)
            .unwrap()
            .iter()
            .map(|a| a.overall_compliance_score)
            .collect();
        assert_eq!(scores, vec![80, 20, 60, 20, 40]);
    }

    #[test]
    fn test_seed_is_repeatable() {
        let pool = voiceup_db::init_memory_pool().unwrap();
        let analyzer = Analyzer::lexicon(ComplianceRules::default());

        seed_database(&pool, &analyzer).unwrap();
        let ids = seed_database(&pool, &analyzer).unwrap();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(conversation::list_conversations(&pool).unwrap().len(), 5);
        assert_eq!(analysis::list_analyses(&pool).unwrap().len(), 5);
    }

    #[test]
    fn test_seed_replaces_existing_data() {
        let pool = voiceup_db::init_memory_pool().unwrap();
        let analyzer = Analyzer::lexicon(ComplianceRules::default());
        conversation::create_conversation(&pool, &[NewMessage::new("agent", "Hello!")]).unwrap();

        seed_database(&pool, &analyzer).unwrap();

        let conversations = conversation::list_conversations(&pool).unwrap();
        assert_eq!(conversations.len(), 5);
        assert_eq!(conversations[0].message_count, 6);
        assert!(conversations.iter().all(|c| c.analysis.compliance_score.is_some()));

        let detail = conversation::get_conversation(&pool, 1).unwrap();
        assert!(detail.messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(detail.analysis.is_some());
    }
}
