//! Application state.

use std::sync::Arc;
use voiceup_core::analysis::Analyzer;
use voiceup_db::DbPool;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, analyzer: Analyzer) -> Self {
        Self {
            db,
            analyzer: Arc::new(analyzer),
        }
    }

    /// Minimum score for a conversation to count as compliant.
    pub fn compliant_threshold(&self) -> i64 {
        self.analyzer.rules().compliant_threshold
    }
}
