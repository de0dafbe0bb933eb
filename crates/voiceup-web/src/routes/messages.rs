//! Message route handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use voiceup_core::conversation::{self, model::Message};

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_message(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Message>> {
    let Path(id) = id?;
    let message = conversation::get_message(&state.db, id)?;
    Ok(Json(message))
}
