//! Terminal output formatting.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use voiceup_core::analysis::model::Analysis;
use voiceup_core::analytics::model::{ComplianceAnalytics, EmotionAnalytics};
use voiceup_core::conversation::model::{ConversationDetail, ConversationSummary};
use voiceup_core::emotion::EmotionScore;

const BAR_WIDTH: usize = 30;

/// Pretty-print any serializable value as JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print conversations as a table.
pub fn print_conversations_table(conversations: &[ConversationSummary], threshold: i64) {
    if conversations.is_empty() {
        println!("{}", "No conversations found.".dimmed());
        return;
    }

    println!(
        "{:<6} {:<22} {:<10} {:<12} {:<10}",
        "ID", "Created", "Messages", "Emotion", "Score"
    );
    println!("{}", "─".repeat(64));

    for conv in conversations {
        let emotion = conv
            .analysis
            .emotion_summary
            .as_ref()
            .and_then(|s| s.dominant())
            .map(|e| e.label.clone())
            .unwrap_or_else(|| "-".to_string());

        let score = match conv.analysis.compliance_score {
            Some(s) => score_colored(s, threshold),
            None => "-".dimmed(),
        };

        println!(
            "{:<6} {:<22} {:<10} {:<12} {:<10}",
            conv.id,
            conv.created_at,
            conv.message_count,
            emotion,
            score
        );
    }

    println!();
    println!("{} conversation(s) total", conversations.len());
}

/// Print a conversation transcript followed by its analysis.
pub fn print_conversation(detail: &ConversationDetail) {
    println!(
        "{} {}",
        format!("Conversation {}", detail.id).cyan().bold(),
        format!("({})", detail.created_at).dimmed()
    );
    println!();

    let sender_width = detail
        .messages
        .iter()
        .map(|m| UnicodeWidthStr::width(m.sender.as_str()))
        .max()
        .unwrap_or(0);

    for msg in &detail.messages {
        let sender = pad_right(&msg.sender, sender_width);
        let sender = if msg.is_from_agent() {
            sender.blue().bold()
        } else {
            sender.magenta()
        };
        println!("  {} {}  {}", time_of(&msg.timestamp).dimmed(), sender, msg.text);
    }
    println!();

    match &detail.analysis {
        Some(analysis) => print_analysis(analysis),
        None => println!("{}", "Not analyzed yet.".dimmed()),
    }
}

/// Print compliance rules and emotion distribution of an analysis.
pub fn print_analysis(analysis: &Analysis) {
    println!(
        "{}: {}",
        "Compliance score".bold(),
        format!("{}/100", analysis.overall_compliance_score).yellow()
    );
    for (rule, passed) in &analysis.compliance_summary {
        let mark = if *passed { "✓".green() } else { "✗".red() };
        println!("  {} {}", mark, rule);
    }
    println!();

    println!("{}", "Emotions".bold());
    print_emotions(&analysis.emotion_summary.emotions);
}

/// Print an emotion distribution as horizontal bars.
pub fn print_emotions(scores: &[EmotionScore]) {
    let label_width = scores
        .iter()
        .map(|e| UnicodeWidthStr::width(e.label.as_str()))
        .max()
        .unwrap_or(0);

    for (i, e) in scores.iter().enumerate() {
        let filled = ((e.score.clamp(0.0, 1.0)) * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let label = pad_right(&e.label, label_width);
        let label = if i == 0 { label.cyan().bold() } else { label.normal() };
        println!("  {} {} {:>5.1}%", label, bar.dimmed(), e.score * 100.0);
    }
}

/// Print emotion analytics.
pub fn print_emotion_analytics(stats: &EmotionAnalytics) {
    println!(
        "{} {}",
        "Emotion analytics".cyan().bold(),
        format!("({} conversations)", stats.total_conversations).dimmed()
    );
    if stats.total_conversations == 0 {
        println!("{}", "No analysis data available.".dimmed());
        return;
    }
    println!();

    println!("{:<12} {:>10} {:>10}", "Emotion", "Dominant", "Average");
    println!("{}", "─".repeat(34));
    for (label, count) in &stats.distribution {
        let avg = stats.average_scores.get(label).copied().unwrap_or(0.0);
        println!("{:<12} {:>10} {:>9.1}%", label, count, avg * 100.0);
    }

    if !stats.trend.is_empty() {
        println!();
        println!("{}", "Daily trend".bold());
        for point in &stats.trend {
            let top = point
                .emotions
                .first()
                .map(|e| format!("{} {:.1}%", e.label, e.score * 100.0))
                .unwrap_or_else(|| "-".to_string());
            println!("  {}  {}", point.date.dimmed(), top);
        }
    }
}

/// Print compliance analytics.
pub fn print_compliance_analytics(stats: &ComplianceAnalytics, threshold: i64) {
    println!(
        "{} {}",
        "Compliance analytics".cyan().bold(),
        format!("({} conversations)", stats.total_conversations).dimmed()
    );
    if stats.total_conversations == 0 {
        println!("{}", "No analysis data available.".dimmed());
        return;
    }
    println!();

    println!(
        "{}: {}% ({} of {} at or above {})",
        "Compliance rate".bold(),
        stats.compliance_rate,
        stats.compliant_conversations,
        stats.total_conversations,
        threshold
    );
    println!("{}: {}", "Average score".bold(), stats.average_score);

    if !stats.rule_violations.is_empty() {
        println!();
        println!("{}", "Rule violations".bold());
        for (rule, count) in &stats.rule_violations {
            let count = if *count > 0 {
                count.to_string().red()
            } else {
                count.to_string().green()
            };
            println!("  {:<24} {}", truncate_visual(rule, 24), count);
        }
    }
}

fn score_colored(score: i64, threshold: i64) -> ColoredString {
    let text = score.to_string();
    if score >= threshold {
        text.green()
    } else if score >= threshold / 2 {
        text.yellow()
    } else {
        text.red()
    }
}

/// `HH:MM` part of an RFC 3339 timestamp.
fn time_of(timestamp: &str) -> &str {
    timestamp.get(11..16).unwrap_or(timestamp)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}
