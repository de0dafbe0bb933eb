//! Analysis result database queries.
//!
//! Summaries are stored as JSON text; decoding them is left to the core crate.

use crate::pool::{DbError, DbPool, DbResult};
use crate::queries::not_found;
use rusqlite::{params, Connection, OptionalExtension};

/// Analysis result row from database.
#[derive(Debug, Clone)]
pub struct AnalysisRow {
    pub id: i64,
    pub conversation_id: i64,
    pub emotion_summary: String,
    pub compliance_summary: String,
    pub overall_compliance_score: i64,
    pub analyzed_at: String,
}

const SELECT_ANALYSIS: &str = "SELECT id, conversation_id, emotion_summary, compliance_summary,
            overall_compliance_score, analyzed_at
     FROM analysis_results";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnalysisRow> {
    Ok(AnalysisRow {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        emotion_summary: row.get(2)?,
        compliance_summary: row.get(3)?,
        overall_compliance_score: row.get(4)?,
        analyzed_at: row.get(5)?,
    })
}

/// Analysis values to store for a conversation.
#[derive(Debug, Clone)]
pub struct NewAnalysisRow<'a> {
    pub emotion_summary: &'a str,
    pub compliance_summary: &'a str,
    pub overall_compliance_score: i64,
    pub analyzed_at: &'a str,
}

/// Insert or replace the analysis of a conversation. Returns the analysis id.
///
/// A conversation keeps a single analysis row; re-analysis updates it in place.
pub fn upsert_analysis(
    pool: &DbPool,
    conversation_id: i64,
    emotion_summary: &str,
    compliance_summary: &str,
    overall_compliance_score: i64,
    analyzed_at: &str,
) -> DbResult<i64> {
    let analysis = NewAnalysisRow {
        emotion_summary,
        compliance_summary,
        overall_compliance_score,
        analyzed_at,
    };
    pool.with_conn(|conn| upsert_with(conn, conversation_id, &analysis).map_err(DbError::from))
}

pub(crate) fn upsert_with(
    conn: &Connection,
    conversation_id: i64,
    analysis: &NewAnalysisRow<'_>,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "INSERT INTO analysis_results
             (conversation_id, emotion_summary, compliance_summary,
              overall_compliance_score, analyzed_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(conversation_id) DO UPDATE SET
             emotion_summary = excluded.emotion_summary,
             compliance_summary = excluded.compliance_summary,
             overall_compliance_score = excluded.overall_compliance_score,
             analyzed_at = excluded.analyzed_at
         RETURNING id",
        params![
            conversation_id,
            analysis.emotion_summary,
            analysis.compliance_summary,
            analysis.overall_compliance_score,
            analysis.analyzed_at
        ],
        |row| row.get(0),
    )
}

/// Get an analysis by its own ID.
pub fn get_analysis(pool: &DbPool, id: i64) -> DbResult<AnalysisRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_ANALYSIS),
            params![id],
            map_row,
        )
        .map_err(not_found("Analysis", id))
    })
}

/// Get the analysis attached to a conversation, if any.
pub fn find_for_conversation(pool: &DbPool, conversation_id: i64) -> DbResult<Option<AnalysisRow>> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("{} WHERE conversation_id = ?1", SELECT_ANALYSIS),
            params![conversation_id],
            map_row,
        )
        .optional()
        .map_err(DbError::from)
    })
}

/// List every analysis ordered by conversation.
pub fn list_analyses(pool: &DbPool) -> DbResult<Vec<AnalysisRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY conversation_id", SELECT_ANALYSIS))?;
        let rows = stmt.query_map([], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}
