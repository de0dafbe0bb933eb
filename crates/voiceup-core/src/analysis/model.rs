//! Analysis domain models.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use voiceup_db::queries::analyses::AnalysisRow;

use crate::compliance::model::ComplianceSummary;
use crate::emotion::EmotionSummary;

/// Emotion and compliance results for one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub emotion_summary: EmotionSummary,
    pub compliance_summary: ComplianceSummary,
    pub overall_compliance_score: i64,
}

/// A stored analysis with its identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    pub conversation_id: i64,
    pub emotion_summary: EmotionSummary,
    pub compliance_summary: ComplianceSummary,
    pub overall_compliance_score: i64,
    pub analyzed_at: String,
}

impl AnalysisRecord {
    /// Create from database row. Unreadable summaries are logged and decode as empty.
    pub fn from_row(row: AnalysisRow) -> Self {
        let emotion_summary: EmotionSummary =
            decode_or_default(row.id, "emotion_summary", &row.emotion_summary);
        let compliance_summary: ComplianceSummary =
            decode_or_default(row.id, "compliance_summary", &row.compliance_summary);

        Self {
            id: row.id,
            conversation_id: row.conversation_id,
            emotion_summary,
            compliance_summary,
            overall_compliance_score: row.overall_compliance_score,
            analyzed_at: row.analyzed_at,
        }
    }

    /// Analysis date (`YYYY-MM-DD`).
    pub fn analyzed_on(&self) -> &str {
        self.analyzed_at.get(..10).unwrap_or(&self.analyzed_at)
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(analysis_id: i64, column: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(analysis_id, column, error = %e, "stored analysis is not valid JSON");
        T::default()
    })
}

impl From<AnalysisRecord> for Analysis {
    fn from(record: AnalysisRecord) -> Self {
        Self {
            emotion_summary: record.emotion_summary,
            compliance_summary: record.compliance_summary,
            overall_compliance_score: record.overall_compliance_score,
        }
    }
}
