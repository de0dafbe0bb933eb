//! Conversation domain models.

use serde::{Deserialize, Serialize};
use voiceup_db::queries::conversations::ConversationRow;
use voiceup_db::queries::messages::MessageRow;

use crate::analysis::model::Analysis;
use crate::compliance::AGENT;
use crate::emotion::EmotionSummary;

/// A single message of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender: String,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    /// Create from database row.
    pub fn from_row(row: MessageRow) -> Self {
        Self {
            id: row.id,
            conversation_id: row.conversation_id,
            sender: row.sender,
            text: row.text,
            timestamp: row.timestamp,
        }
    }

    pub fn is_from_agent(&self) -> bool {
        self.sender.eq_ignore_ascii_case(AGENT)
    }
}

/// A message submitted for a new conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender: String,
    pub text: String,
    /// RFC 3339 timestamp; defaults to two minutes after the previous message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl NewMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: None,
        }
    }
}

/// Analysis fields shown in the conversation list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryAnalysis {
    pub emotion_summary: Option<EmotionSummary>,
    pub compliance_score: Option<i64>,
}

/// Conversation list entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub created_at: String,
    pub message_count: i64,
    pub analysis: SummaryAnalysis,
}

impl ConversationSummary {
    /// Create from database row and optional analysis.
    pub fn from_row(row: ConversationRow, analysis: Option<&Analysis>) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            message_count: row.message_count,
            analysis: SummaryAnalysis {
                emotion_summary: analysis.map(|a| a.emotion_summary.clone()),
                compliance_score: analysis.map(|a| a.overall_compliance_score),
            },
        }
    }
}

/// A conversation with its messages and analysis, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetail {
    pub id: i64,
    pub created_at: String,
    pub messages: Vec<Message>,
    pub analysis: Option<Analysis>,
}
