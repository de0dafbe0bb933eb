//! Stored analysis handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use voiceup_core::analysis::{self, model::AnalysisRecord};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_analysis(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<AnalysisRecord>> {
    let Path(id) = id?;
    let record = analysis::get_analysis(&state.db, id)?;
    Ok(Json(record))
}

pub async fn get_conversation_analysis(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<AnalysisRecord>> {
    let Path(id) = id?;
    let record = analysis::get_conversation_analysis(&state.db, id)?;
    Ok(Json(record))
}
