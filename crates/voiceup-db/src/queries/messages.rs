//! Message related database queries.

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::not_found;
use rusqlite::params;

/// Message row from database.
#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub conversation_id: i64,
    pub sender: String,
    pub text: String,
    pub timestamp: String,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        sender: row.get(2)?,
        text: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

/// Get a message by ID.
pub fn get_message(pool: &DbPool, id: i64) -> DbResult<MessageRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            "SELECT id, conversation_id, sender, text, timestamp
             FROM messages WHERE id = ?1",
            params![id],
            map_row,
        )
        .map_err(not_found("Message", id))
    })
}

/// List the messages of a conversation in chronological order.
pub fn list_messages(pool: &DbPool, conversation_id: i64) -> DbResult<Vec<MessageRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, sender, text, timestamp
             FROM messages WHERE conversation_id = ?1
             ORDER BY timestamp, id",
        )?;
        let rows = stmt.query_map(params![conversation_id], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}
