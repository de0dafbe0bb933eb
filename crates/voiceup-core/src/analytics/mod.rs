//! Aggregate emotion and compliance analytics.

pub mod model;

use std::collections::BTreeMap;

use voiceup_db::DbPool;

use crate::analysis::{self, model::AnalysisRecord};
use crate::emotion::model::{round_to, sort_scores};
use crate::emotion::EmotionScore;
use crate::error::VoiceupResult;
use model::{ComplianceAnalytics, EmotionAnalytics, EmotionTrendPoint};

/// Running sum and count per label.
#[derive(Default)]
struct LabelTotals(BTreeMap<String, (f64, usize)>);

impl LabelTotals {
    fn add(&mut self, scores: &[EmotionScore]) {
        for e in scores {
            let entry = self.0.entry(e.label.clone()).or_insert((0.0, 0));
            entry.0 += e.score;
            entry.1 += 1;
        }
    }

    fn averages(&self) -> impl Iterator<Item = (&String, f64)> + '_ {
        self.0
            .iter()
            .map(|(label, (sum, n))| (label, round_to(sum / *n as f64, 4)))
    }
}

/// Emotion analytics over every stored analysis.
pub fn emotion_analytics(pool: &DbPool) -> VoiceupResult<EmotionAnalytics> {
    Ok(summarize_emotions(&analysis::list_analyses(pool)?))
}

/// Compliance analytics over every stored analysis.
pub fn compliance_analytics(pool: &DbPool, compliant_threshold: i64) -> VoiceupResult<ComplianceAnalytics> {
    Ok(summarize_compliance(&analysis::list_analyses(pool)?, compliant_threshold))
}

pub fn summarize_emotions(records: &[AnalysisRecord]) -> EmotionAnalytics {
    let mut distribution: BTreeMap<String, i64> = BTreeMap::new();
    let mut overall = LabelTotals::default();
    let mut by_day: BTreeMap<String, LabelTotals> = BTreeMap::new();

    for record in records {
        let emotions = &record.emotion_summary.emotions;
        for e in emotions {
            distribution.entry(e.label.clone()).or_insert(0);
        }
        if let Some(top) = record.emotion_summary.dominant() {
            *distribution.entry(top.label.clone()).or_insert(0) += 1;
        }

        overall.add(emotions);
        by_day
            .entry(record.analyzed_on().to_string())
            .or_default()
            .add(emotions);
    }

    let trend = by_day
        .into_iter()
        .map(|(date, totals)| {
            let mut emotions: Vec<EmotionScore> = totals
                .averages()
                .map(|(label, avg)| EmotionScore::new(label.clone(), avg))
                .collect();
            sort_scores(&mut emotions);
            EmotionTrendPoint { date, emotions }
        })
        .collect();

    EmotionAnalytics {
        distribution,
        average_scores: overall.averages().map(|(l, avg)| (l.clone(), avg)).collect(),
        trend,
        total_conversations: records.len() as i64,
    }
}

pub fn summarize_compliance(records: &[AnalysisRecord], compliant_threshold: i64) -> ComplianceAnalytics {
    if records.is_empty() {
        return ComplianceAnalytics::default();
    }

    let total = records.len() as i64;
    let scores: Vec<i64> = records.iter().map(|r| r.overall_compliance_score).collect();
    let compliant = scores.iter().filter(|s| **s >= compliant_threshold).count() as i64;
    let sum: i64 = scores.iter().sum();

    let mut rule_violations: BTreeMap<String, i64> = BTreeMap::new();
    for record in records {
        for (rule, passed) in &record.compliance_summary {
            let count = rule_violations.entry(rule.clone()).or_insert(0);
            if !passed {
                *count += 1;
            }
        }
    }

    ComplianceAnalytics {
        compliance_rate: round_to(compliant as f64 / total as f64 * 100.0, 2),
        average_score: round_to(sum as f64 / total as f64, 2),
        total_conversations: total,
        compliant_conversations: compliant,
        rule_violations,
        scores,
    }
}
