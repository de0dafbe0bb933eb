//! Emotion classification.
//!
//! Classifiers turn free text into a full distribution over [`model::LABELS`],
//! sorted by descending score. The lexicon classifier ships with the crate; a
//! model-backed classifier can be plugged in through [`EmotionClassifier`].

pub mod lexicon;
pub mod model;

pub use lexicon::LexiconClassifier;
pub use model::{EmotionScore, EmotionSummary, Prediction};

/// Text-to-emotion classifier.
pub trait EmotionClassifier: Send + Sync {
    /// Short identifier reported by the health endpoint.
    fn name(&self) -> &str;

    /// Score every label for `text`. Scores sum to 1 and are sorted descending.
    fn classify(&self, text: &str) -> Vec<EmotionScore>;
}
