//! Support conversations and their messages.

pub mod model;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use voiceup_db::queries::conversations::{self as queries, NewMessageRow};
use voiceup_db::queries::messages as message_queries;
use voiceup_db::{DbError, DbPool};

use crate::analysis::model::Analysis;
use crate::analysis::{self, Analyzer};
use crate::error::{VoiceupError, VoiceupResult};
use crate::format_timestamp;
use model::{ConversationDetail, ConversationSummary, Message, NewMessage};

/// Gap between consecutive messages when no timestamp is given.
pub(crate) const MESSAGE_SPACING_MINUTES: i64 = 2;

fn conversation_not_found(id: i64) -> impl FnOnce(DbError) -> VoiceupError {
    move |e| match e {
        DbError::NotFound(_) => VoiceupError::ConversationNotFound(id),
        e => e.into(),
    }
}

/// List all conversations with their analysis headline.
pub fn list_conversations(pool: &DbPool) -> VoiceupResult<Vec<ConversationSummary>> {
    let rows = queries::list_conversations(pool)?;
    let analyses: HashMap<i64, Analysis> = analysis::list_analyses(pool)?
        .into_iter()
        .map(|record| (record.conversation_id, Analysis::from(record)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let analysis = analyses.get(&row.id);
            ConversationSummary::from_row(row, analysis)
        })
        .collect())
}

/// Get a conversation with its messages and analysis.
pub fn get_conversation(pool: &DbPool, id: i64) -> VoiceupResult<ConversationDetail> {
    let row = queries::get_conversation(pool, id).map_err(conversation_not_found(id))?;
    let messages = message_queries::list_messages(pool, id)?
        .into_iter()
        .map(Message::from_row)
        .collect();
    let analysis = analysis::find_conversation_analysis(pool, id)?.map(Analysis::from);

    Ok(ConversationDetail {
        id: row.id,
        created_at: row.created_at,
        messages,
        analysis,
    })
}

/// List the messages of a conversation in chronological order.
pub fn list_messages(pool: &DbPool, conversation_id: i64) -> VoiceupResult<Vec<Message>> {
    if !queries::conversation_exists(pool, conversation_id)? {
        return Err(VoiceupError::ConversationNotFound(conversation_id));
    }
    let rows = message_queries::list_messages(pool, conversation_id)?;
    Ok(rows.into_iter().map(Message::from_row).collect())
}

/// Get a single message by ID.
pub fn get_message(pool: &DbPool, id: i64) -> VoiceupResult<Message> {
    match message_queries::get_message(pool, id) {
        Ok(row) => Ok(Message::from_row(row)),
        Err(DbError::NotFound(_)) => Err(VoiceupError::MessageNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// Create a conversation starting now.
pub fn create_conversation(pool: &DbPool, messages: &[NewMessage]) -> VoiceupResult<ConversationDetail> {
    create_conversation_at(pool, Utc::now(), messages)
}

/// Create a conversation starting at `start`.
///
/// Messages without a timestamp are spaced two minutes apart from `start`.
pub fn create_conversation_at(
    pool: &DbPool,
    start: DateTime<Utc>,
    messages: &[NewMessage],
) -> VoiceupResult<ConversationDetail> {
    let mut timestamps = Vec::with_capacity(messages.len());
    for (i, msg) in messages.iter().enumerate() {
        if msg.sender.trim().is_empty() {
            return Err(VoiceupError::validation(format!("message {}: sender is empty", i)));
        }
        if msg.text.trim().is_empty() {
            return Err(VoiceupError::validation(format!("message {}: text is empty", i)));
        }

        let at = match &msg.timestamp {
            Some(ts) => DateTime::parse_from_rfc3339(ts)
                .map_err(|e| VoiceupError::validation(format!("message {}: bad timestamp: {}", i, e)))?
                .with_timezone(&Utc),
            None => start + Duration::minutes(MESSAGE_SPACING_MINUTES * i as i64),
        };
        timestamps.push(format_timestamp(at));
    }

    let rows: Vec<NewMessageRow<'_>> = messages
        .iter()
        .zip(&timestamps)
        .map(|(msg, ts)| NewMessageRow {
            sender: msg.sender.trim(),
            text: &msg.text,
            timestamp: ts,
        })
        .collect();

    let id = queries::create_conversation(pool, &format_timestamp(start), &rows)?;
    tracing::debug!(conversation_id = id, messages = rows.len(), "conversation created");

    get_conversation(pool, id)
}

/// Run emotion and compliance analysis on a stored conversation and save it.
pub fn analyze_conversation(pool: &DbPool, analyzer: &Analyzer, id: i64) -> VoiceupResult<Analysis> {
    let messages = list_messages(pool, id)?;
    let result = analyzer.analyze_messages(&messages);
    analysis::save_analysis(pool, id, &result)?;

    tracing::info!(
        conversation_id = id,
        score = result.overall_compliance_score,
        dominant = result.emotion_summary.dominant().map(|e| e.label.as_str()).unwrap_or("-"),
        "conversation analyzed"
    );
    Ok(result)
}
