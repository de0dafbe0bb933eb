//! VoiceUp Core Library
//!
//! Domain models and business logic for support-conversation analytics:
//! emotion classification, compliance evaluation and aggregate reporting.

pub mod analysis;
pub mod analytics;
pub mod compliance;
pub mod config;
pub mod conversation;
pub mod emotion;
pub mod error;
pub mod seed;
pub mod text;

pub use error::{VoiceupError, VoiceupResult};

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp the way it is stored: RFC 3339, UTC, second precision.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time as a stored timestamp.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
