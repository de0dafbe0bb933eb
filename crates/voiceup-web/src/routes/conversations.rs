//! Conversation route handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use voiceup_core::analysis::model::Analysis;
use voiceup_core::conversation::{
    self,
    model::{ConversationDetail, ConversationSummary, Message, NewMessage},
};

use super::blocking;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateConversationRequest {
    pub messages: Vec<NewMessage>,
}

pub async fn list_conversations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ConversationSummary>>> {
    let conversations = conversation::list_conversations(&state.db)?;
    Ok(Json(conversations))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ConversationDetail>> {
    let Path(id) = id?;
    let detail = conversation::get_conversation(&state.db, id)?;
    Ok(Json(detail))
}

pub async fn create_conversation(
    State(state): State<AppState>,
    req: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ConversationDetail>)> {
    let Json(req) = req?;
    if req.messages.is_empty() {
        return Err(ApiError::bad_request("A conversation needs at least one message"));
    }

    let detail = conversation::create_conversation(&state.db, &req.messages)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn list_messages(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Message>>> {
    let Path(id) = id?;
    let messages = conversation::list_messages(&state.db, id)?;
    Ok(Json(messages))
}

/// POST /api/conversations/{id}/analyze - Classification runs off the async workers.
pub async fn analyze_conversation(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Analysis>> {
    let Path(id) = id?;
    let analysis =
        blocking(move || conversation::analyze_conversation(&state.db, &state.analyzer, id)).await?;
    Ok(Json(analysis))
}
