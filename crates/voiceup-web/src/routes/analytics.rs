//! Aggregate analytics handlers.
//!
//! Both aggregate every stored analysis, so they run on the blocking pool.

use axum::{extract::State, Json};
use voiceup_core::analytics::{
    self,
    model::{ComplianceAnalytics, EmotionAnalytics},
};

use super::blocking;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn emotions(State(state): State<AppState>) -> ApiResult<Json<EmotionAnalytics>> {
    let stats = blocking(move || analytics::emotion_analytics(&state.db)).await?;
    Ok(Json(stats))
}

pub async fn compliance(State(state): State<AppState>) -> ApiResult<Json<ComplianceAnalytics>> {
    let threshold = state.compliant_threshold();
    let stats = blocking(move || analytics::compliance_analytics(&state.db, threshold)).await?;
    Ok(Json(stats))
}
