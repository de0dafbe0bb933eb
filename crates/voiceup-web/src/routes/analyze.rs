//! Free-text emotion handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use voiceup_core::emotion::{EmotionScore, Prediction};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// GET /api/analyze
pub async fn usage() -> Json<Value> {
    Json(json!({ "message": "Send a POST request with text to analyze." }))
}

/// POST /api/analyze - Full emotion distribution.
pub async fn analyze_text(
    State(state): State<AppState>,
    req: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<EmotionScore>>> {
    let Json(req) = req?;
    let scores = state.analyzer.analyze_text(&req.text)?;
    Ok(Json(scores))
}

/// POST /api/predict - Dominant emotion only.
pub async fn predict(
    State(state): State<AppState>,
    req: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<Prediction>> {
    let Json(req) = req?;
    let prediction = state.analyzer.predict(&req.text)?;
    Ok(Json(prediction))
}
