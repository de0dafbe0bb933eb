//! Emotion and compliance analysis.

pub mod model;

use std::sync::Arc;

use crate::compliance::compliance_score;
use crate::compliance::model::ComplianceRules;
use crate::conversation::model::Message;
use crate::emotion::model::{round_to, top_emotion};
use crate::emotion::{EmotionClassifier, EmotionScore, EmotionSummary, LexiconClassifier, Prediction};
use crate::error::{VoiceupError, VoiceupResult};
use model::{Analysis, AnalysisRecord};
use voiceup_db::queries::analyses as queries;
use voiceup_db::{DbError, DbPool};

/// Classifier plus compliance rules, shared by the server and the CLI.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn EmotionClassifier>,
    rules: ComplianceRules,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn EmotionClassifier>, rules: ComplianceRules) -> Self {
        Self { classifier, rules }
    }

    /// Analyzer backed by the bundled lexicon classifier.
    pub fn lexicon(rules: ComplianceRules) -> Self {
        Self::new(Arc::new(LexiconClassifier::new()), rules)
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn rules(&self) -> &ComplianceRules {
        &self.rules
    }

    /// Full emotion distribution for a piece of text.
    pub fn analyze_text(&self, text: &str) -> VoiceupResult<Vec<EmotionScore>> {
        if text.trim().is_empty() {
            return Err(VoiceupError::validation("No text provided"));
        }
        Ok(self.classifier.classify(text))
    }

    /// Dominant emotion of a piece of text, score rounded to four places.
    pub fn predict(&self, text: &str) -> VoiceupResult<Prediction> {
        let scores = self.analyze_text(text)?;
        let top = top_emotion(&scores)
            .ok_or_else(|| VoiceupError::validation("Classifier returned no labels"))?;

        Ok(Prediction {
            emotion: top.label.clone(),
            score: round_to(top.score, 4),
        })
    }

    /// Analyze a conversation: the concatenated text is classified and the
    /// compliance rules are evaluated over the individual messages.
    pub fn analyze_messages(&self, messages: &[Message]) -> Analysis {
        let all_text = messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let emotions = self.classifier.classify(&all_text);
        let compliance_summary = self.rules.evaluate(messages);
        let overall_compliance_score = compliance_score(&compliance_summary);

        Analysis {
            emotion_summary: EmotionSummary::new(emotions),
            compliance_summary,
            overall_compliance_score,
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("classifier", &self.classifier.name())
            .field("rules", &self.rules)
            .finish()
    }
}

/// Store the analysis of a conversation, replacing any previous one.
pub fn save_analysis(pool: &DbPool, conversation_id: i64, analysis: &Analysis) -> VoiceupResult<i64> {
    let emotion_summary = serde_json::to_string(&analysis.emotion_summary)?;
    let compliance_summary = serde_json::to_string(&analysis.compliance_summary)?;

    let id = queries::upsert_analysis(
        pool,
        conversation_id,
        &emotion_summary,
        &compliance_summary,
        analysis.overall_compliance_score,
        &crate::now_timestamp(),
    )?;
    Ok(id)
}

/// Get an analysis by ID.
pub fn get_analysis(pool: &DbPool, id: i64) -> VoiceupResult<AnalysisRecord> {
    match queries::get_analysis(pool, id) {
        Ok(row) => Ok(AnalysisRecord::from_row(row)),
        Err(DbError::NotFound(_)) => Err(VoiceupError::AnalysisNotFound(id.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Get the analysis of a conversation, if it has been analyzed.
pub fn find_conversation_analysis(pool: &DbPool, conversation_id: i64) -> VoiceupResult<Option<AnalysisRecord>> {
    let row = queries::find_for_conversation(pool, conversation_id)?;
    Ok(row.map(AnalysisRecord::from_row))
}

/// Get the analysis of a conversation, failing when there is none.
pub fn get_conversation_analysis(pool: &DbPool, conversation_id: i64) -> VoiceupResult<AnalysisRecord> {
    find_conversation_analysis(pool, conversation_id)?.ok_or_else(|| {
        VoiceupError::AnalysisNotFound(format!("conversation {}", conversation_id))
    })
}

/// List every stored analysis ordered by conversation.
pub fn list_analyses(pool: &DbPool) -> VoiceupResult<Vec<AnalysisRecord>> {
    let rows = queries::list_analyses(pool)?;
    Ok(rows.into_iter().map(AnalysisRecord::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::lexicon(ComplianceRules::default())
    }

    #[test]
    fn test_analyze_text_rejects_blank() {
        let err = analyzer().analyze_text("   ").unwrap_err();
        assert!(matches!(err, VoiceupError::ValidationError(_)));
    }

    #[test]
    fn test_predict_rounds_score() {
        let prediction = analyzer().predict("I love it, thank you!").unwrap();
        assert_eq!(prediction.emotion, "joy");
        assert_eq!(prediction.score, round_to(prediction.score, 4));
    }

    #[test]
    fn test_missing_analysis() {
        let pool = voiceup_db::init_memory_pool().unwrap();
        assert!(get_analysis(&pool, 3).unwrap_err().is_not_found());
        assert!(get_conversation_analysis(&pool, 3).unwrap_err().is_not_found());
        assert!(find_conversation_analysis(&pool, 3).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_stored_analysis_reads_as_empty() {
        use voiceup_db::queries::conversations::{create_conversation, NewMessageRow};

        let pool = voiceup_db::init_memory_pool().unwrap();
        let messages = [NewMessageRow {
            sender: "agent",
            text: "Hello!",
            timestamp: "2025-01-01T10:00:00Z",
        }];
        let conversation_id = create_conversation(&pool, "2025-01-01T10:00:00Z", &messages).unwrap();
        queries::upsert_analysis(&pool, conversation_id, "{truncated", "[]", 20, "2025-01-01T10:05:00Z")
            .unwrap();

        let records = list_analyses(&pool).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].emotion_summary.emotions.is_empty());
        assert!(records[0].compliance_summary.is_empty());
        assert_eq!(records[0].overall_compliance_score, 20);
    }
}
