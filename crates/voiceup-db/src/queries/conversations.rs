//! Conversation related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::analyses::{upsert_with, NewAnalysisRow};
use crate::queries::not_found;
use rusqlite::{params, Connection};

/// Conversation row from database, with its message count.
#[derive(Debug, Clone)]
pub struct ConversationRow {
    pub id: i64,
    pub created_at: String,
    pub message_count: i64,
}

/// Message to insert alongside a new conversation.
#[derive(Debug, Clone)]
pub struct NewMessageRow<'a> {
    pub sender: &'a str,
    pub text: &'a str,
    pub timestamp: &'a str,
}

/// A conversation stored together with its analysis by [`replace_all`].
#[derive(Debug, Clone)]
pub struct AnalyzedConversationRow<'a> {
    pub created_at: &'a str,
    pub messages: Vec<NewMessageRow<'a>>,
    pub analysis: NewAnalysisRow<'a>,
}

const SELECT_CONVERSATION: &str = "SELECT c.id, c.created_at,
            (SELECT COUNT(*) FROM messages m WHERE m.conversation_id = c.id)
     FROM conversations c";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConversationRow> {
    Ok(ConversationRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        message_count: row.get(2)?,
    })
}

/// Create a conversation and all of its messages in one transaction.
///
/// Returns the new conversation id.
pub fn create_conversation(
    pool: &DbPool,
    created_at: &str,
    messages: &[NewMessageRow<'_>],
) -> DbResult<i64> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        let id = insert_conversation(&tx, created_at, messages)?;
        tx.commit()?;
        Ok(id)
    })
}

fn insert_conversation(
    conn: &Connection,
    created_at: &str,
    messages: &[NewMessageRow<'_>],
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO conversations (created_at) VALUES (?1)",
        params![created_at],
    )?;
    let id = conn.last_insert_rowid();

    let mut stmt = conn.prepare(
        "INSERT INTO messages (conversation_id, sender, text, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for msg in messages {
        stmt.execute(params![id, msg.sender, msg.text, msg.timestamp])?;
    }
    Ok(id)
}

/// Get a conversation by ID.
pub fn get_conversation(pool: &DbPool, id: i64) -> DbResult<ConversationRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("{} WHERE c.id = ?1", SELECT_CONVERSATION),
            params![id],
            map_row,
        )
        .map_err(not_found("Conversation", id))
    })
}

/// List all conversations ordered by id.
pub fn list_conversations(pool: &DbPool) -> DbResult<Vec<ConversationRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY c.id", SELECT_CONVERSATION))?;
        let rows = stmt.query_map([], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Check whether a conversation exists.
pub fn conversation_exists(pool: &DbPool, id: i64) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM conversations WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    })
}

const DELETE_ALL: &str = "DELETE FROM analysis_results;
     DELETE FROM messages;
     DELETE FROM conversations;
     DELETE FROM sqlite_sequence
         WHERE name IN ('conversations', 'messages', 'analysis_results');";

/// Replace all stored data with `conversations` and their analyses, resetting
/// id sequences.
///
/// Runs in one transaction: on error the previous contents are kept.
/// Returns the new conversation ids in order.
pub fn replace_all(pool: &DbPool, conversations: &[AnalyzedConversationRow<'_>]) -> DbResult<Vec<i64>> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(DELETE_ALL)?;

        let mut ids = Vec::with_capacity(conversations.len());
        for conv in conversations {
            let id = insert_conversation(&tx, conv.created_at, &conv.messages)?;
            upsert_with(&tx, id, &conv.analysis)?;
            ids.push(id);
        }

        tx.commit()?;
        Ok(ids)
    })
}
