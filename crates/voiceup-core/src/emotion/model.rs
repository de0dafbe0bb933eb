//! Emotion domain models.

use serde::{Deserialize, Serialize};

/// Labels produced by the emotion classifiers, in canonical order.
pub const LABELS: [&str; 7] = [
    "anger", "disgust", "fear", "joy", "neutral", "sadness", "surprise",
];

/// One label of an emotion distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: String,
    pub score: f64,
}

impl EmotionScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Emotion distribution stored with an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    #[serde(default)]
    pub emotions: Vec<EmotionScore>,
}

impl EmotionSummary {
    pub fn new(emotions: Vec<EmotionScore>) -> Self {
        Self { emotions }
    }

    /// Highest-scoring label.
    pub fn dominant(&self) -> Option<&EmotionScore> {
        top_emotion(&self.emotions)
    }

    /// Score of a single label, if present.
    pub fn score_of(&self, label: &str) -> Option<f64> {
        self.emotions
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.score)
    }
}

/// Top emotion of a text, as served by the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub emotion: String,
    pub score: f64,
}

/// Highest-scoring entry; the first one wins on ties.
pub fn top_emotion(scores: &[EmotionScore]) -> Option<&EmotionScore> {
    scores.iter().fold(None, |best: Option<&EmotionScore>, e| match best {
        Some(b) if b.score >= e.score => Some(b),
        _ => Some(e),
    })
}

/// Sort a distribution by descending score, label ascending on ties.
pub fn sort_scores(scores: &mut [EmotionScore]) {
    scores.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.label.cmp(&b.label))
    });
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
