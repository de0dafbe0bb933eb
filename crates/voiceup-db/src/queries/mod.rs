//! Database query implementations.

pub mod analyses;
pub mod conversations;
pub mod messages;

/// Map `QueryReturnedNoRows` to a typed not-found error.
pub(crate) fn not_found(what: &'static str, id: i64) -> impl FnOnce(rusqlite::Error) -> crate::DbError {
    move |e| match e {
        rusqlite::Error::QueryReturnedNoRows => crate::DbError::NotFound(format!("{}: {}", what, id)),
        e => crate::DbError::Connection(e),
    }
}
