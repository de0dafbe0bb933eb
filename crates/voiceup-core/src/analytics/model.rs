//! Aggregate analytics models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::emotion::EmotionScore;

/// Average emotion scores of the analyses run on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionTrendPoint {
    pub date: String,
    pub emotions: Vec<EmotionScore>,
}

/// Emotion statistics across all analyzed conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalytics {
    /// Number of conversations whose dominant emotion is each label.
    pub distribution: BTreeMap<String, i64>,
    /// Mean score per label.
    pub average_scores: BTreeMap<String, f64>,
    pub trend: Vec<EmotionTrendPoint>,
    pub total_conversations: i64,
}

/// Compliance statistics across all analyzed conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAnalytics {
    /// Percentage of conversations at or above the compliant threshold.
    pub compliance_rate: f64,
    pub average_score: f64,
    pub total_conversations: i64,
    pub compliant_conversations: i64,
    /// Number of conversations failing each rule.
    pub rule_violations: BTreeMap<String, i64>,
    pub scores: Vec<i64>,
}
