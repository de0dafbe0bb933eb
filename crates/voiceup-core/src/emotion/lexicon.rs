//! Lexicon-based emotion classifier.
//!
//! Each cue word adds evidence to one label. Evidence is turned into a
//! distribution with a softmax, so text without cues is dominated by the
//! neutral baseline.

use super::model::{sort_scores, EmotionScore, LABELS};
use super::EmotionClassifier;
use crate::text::tokenize;

const JOY: usize = 3;
const NEUTRAL: usize = 4;
const SADNESS: usize = 5;

/// Evidence every text carries for `neutral`.
const NEUTRAL_BASELINE: f64 = 0.75;

/// Softmax sharpness.
const SHARPNESS: f64 = 1.5;

/// Extra evidence per `!`, capped at four.
const EXCLAMATION_WEIGHT: f64 = 0.25;

/// Cue words per label, indexed like [`LABELS`]. A trailing `*` matches any suffix.
const CUES: [&[&str]; 7] = [
    // anger
    &[
        "angry", "anger", "furious", "mad", "annoy*", "frustrat*", "irritat*", "terrible",
        "awful", "ridiculous", "hate", "hated", "hates", "outrag*", "unacceptable", "worst",
        "useless",
    ],
    // disgust
    &[
        "disgust*", "gross", "nasty", "horrible", "revolting", "pathetic", "sickening", "yuck",
        "appalling",
    ],
    // fear
    &[
        "afraid", "scared", "fear*", "worr*", "anxious", "nervous", "panic*", "terrif*",
        "concern*", "frighten*",
    ],
    // joy
    &[
        "happy", "glad", "great", "lov*", "wonderful", "excellent", "thank*", "awesome",
        "perfect", "better", "delight*", "pleased", "appreciat*", "fantastic", "enjoy*",
    ],
    // neutral
    &[],
    // sadness
    &[
        "sad", "unhappy", "disappoint*", "sorry", "upset", "unfortunat*", "miss", "missed",
        "hopeless", "depress*", "regret*", "lonely",
    ],
    // surprise
    &[
        "wow", "whoa", "surpris*", "unexpect*", "amaz*", "shock*", "astonish*", "suddenly",
    ],
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "didn't", "doesn't", "isn't", "wasn't", "aren't",
    "can't", "cannot", "won't", "nothing", "without",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "so", "extremely", "super", "totally", "incredibly", "absolutely",
];

/// Dictionary classifier over the seven standard emotion labels.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    fn lookup(token: &str) -> Option<usize> {
        CUES.iter().position(|cues| {
            cues.iter().any(|cue| match cue.strip_suffix('*') {
                Some(stem) => token.starts_with(stem),
                None => token == *cue,
            })
        })
    }

    /// Raw evidence per label before normalization.
    fn evidence(text: &str) -> [f64; 7] {
        let tokens = tokenize(text);
        let mut raw = [0.0f64; 7];
        raw[NEUTRAL] = NEUTRAL_BASELINE;

        for (i, token) in tokens.iter().enumerate() {
            let Some(label) = Self::lookup(token) else {
                continue;
            };

            let negated = tokens[i.saturating_sub(2)..i]
                .iter()
                .any(|t| NEGATORS.contains(&t.as_str()));
            let boosted = i > 0 && INTENSIFIERS.contains(&tokens[i - 1].as_str());
            let weight = if boosted { 1.5 } else { 1.0 };

            match (negated, label) {
                (true, JOY) => raw[SADNESS] += weight,
                (true, _) => raw[label] += weight * 0.5,
                (false, _) => raw[label] += weight,
            }
        }

        let exclamations = text.matches('!').count().min(4) as f64;
        if exclamations > 0.0 {
            let strongest = (0..LABELS.len())
                .filter(|&i| i != NEUTRAL && raw[i] > 0.0)
                .max_by(|&a, &b| raw[a].total_cmp(&raw[b]).then_with(|| b.cmp(&a)));
            if let Some(i) = strongest {
                raw[i] += exclamations * EXCLAMATION_WEIGHT;
            }
        }

        raw
    }
}

impl EmotionClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn classify(&self, text: &str) -> Vec<EmotionScore> {
        let raw = Self::evidence(text);
        // Shift by the largest evidence: `exp` overflows above ~709.
        let max = raw.iter().copied().fold(f64::MIN, f64::max);
        let exps: Vec<f64> = raw.iter().map(|r| ((r - max) * SHARPNESS).exp()).collect();
        let total: f64 = exps.iter().sum();

        let mut scores: Vec<EmotionScore> = LABELS
            .iter()
            .zip(&exps)
            .map(|(label, e)| EmotionScore::new(*label, e / total))
            .collect();
        sort_scores(&mut scores);

        tracing::trace!(top = %scores[0].label, chars = text.len(), "classified text");
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(text: &str) -> String {
        LexiconClassifier::new().classify(text)[0].label.clone()
    }

    #[test]
    fn test_distribution_is_complete_and_normalized() {
        let scores = LexiconClassifier::new().classify("My internet keeps disconnecting!");
        assert_eq!(scores.len(), LABELS.len());

        let sum: f64 = scores.iter().map(|e| e.score).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_no_cues_is_neutral() {
        assert_eq!(top("What do you want?"), "neutral");
        assert_eq!(top(""), "neutral");
    }

    #[test]
    fn test_dominant_labels() {
        assert_eq!(top("I love this, thank you so much!"), "joy");
        assert_eq!(top("This is terrible service! I'm so angry"), "anger");
        assert_eq!(top("I'm really worried and scared about my account"), "fear");
        assert_eq!(top("Wow, that was unexpected"), "surprise");
        assert_eq!(top("That is disgusting and gross"), "disgust");
        assert_eq!(top("I'm so sad and disappointed"), "sadness");
    }

    #[test]
    fn test_negated_joy_becomes_sadness() {
        assert_eq!(top("I am not happy with this"), "sadness");
    }

    #[test]
    fn test_intensifier_raises_score() {
        let c = LexiconClassifier::new();
        let plain = c.classify("I am happy");
        let boosted = c.classify("I am very happy");
        let joy = |s: &[EmotionScore]| s.iter().find(|e| e.label == "joy").unwrap().score;
        assert!(joy(&boosted) > joy(&plain));
    }

    #[test]
    fn test_long_text_stays_normalized() {
        let scores = LexiconClassifier::new().classify(&"angry ".repeat(600));
        assert_eq!(scores.len(), LABELS.len());
        assert!(scores.iter().all(|e| e.score.is_finite()));

        let sum: f64 = scores.iter().map(|e| e.score).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(scores[0].label, "anger");
        assert!(scores.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_mad_does_not_match_made() {
        assert_eq!(top("I made a payment"), "neutral");
    }
}
