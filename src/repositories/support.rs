// src/repositories/support.rs
//
// Helpers shared by the SQLite repositories.
//
// Every mutating call goes through `write_transaction`: one BEGIN IMMEDIATE
// transaction, committed only when the closure succeeds. Dropping the
// transaction on an error path rolls it back.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::db::ConnectionPool;
use crate::domain::PageRequest;
use crate::error::{AppError, AppResult, EntityKind};

pub(crate) fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Question => "question",
        EntityKind::Answer => "answer",
        EntityKind::Comment => "comment",
        EntityKind::Profile => "profile",
    }
}

/// Current time in the stored timestamp format
pub(crate) fn now() -> String {
    Utc::now().to_rfc3339()
}

/// Read an RFC 3339 text column
pub(crate) fn parse_timestamp(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            let index = row.as_ref().column_index(column).unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Run `work` inside a single write transaction
pub(crate) fn write_transaction<T, F>(pool: &ConnectionPool, work: F) -> AppResult<T>
where
    F: FnOnce(&Transaction<'_>) -> AppResult<T>,
{
    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

/// Turn a zero-row UPDATE/DELETE into a typed not-found error
pub(crate) fn ensure_affected(rows: usize, kind: EntityKind, id: i64) -> AppResult<()> {
    if rows == 0 {
        log::info!("Found no {} with id {}", kind, id);
        return Err(AppError::not_found(kind, id));
    }
    Ok(())
}

/// Add `delta` to an integer column and return the stored result.
///
/// The read and the write share the caller's transaction, so concurrent
/// adjustments of the same row are never lost. A sum outside the i64 range
/// is an invalid argument and leaves the row untouched.
pub(crate) fn apply_counter_delta(
    tx: &Transaction<'_>,
    kind: EntityKind,
    column: &str,
    id: i64,
    delta: i64,
) -> AppResult<i64> {
    let table = table_name(kind);
    let current: i64 = tx
        .query_row(
            &format!("SELECT {column} FROM {table} WHERE id = ?1"),
            params![id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or_else(|| {
            log::info!("Found no {} with id {}", kind, id);
            AppError::not_found(kind, id)
        })?;

    let value = current.checked_add(delta).ok_or_else(|| {
        log::info!("{} of {} {} would overflow by {}", column, kind, id, delta);
        AppError::invalid_argument(format!("{} out of range", column))
    })?;

    let rows = tx.execute(
        &format!("UPDATE {table} SET {column} = ?1, modified_at = ?2 WHERE id = ?3"),
        params![value, now(), id],
    )?;
    ensure_affected(rows, kind, id)?;

    Ok(value)
}

/// LIMIT / OFFSET pair for a page request
pub(crate) fn page_bounds(page: &PageRequest) -> AppResult<(i64, i64)> {
    let limit = i64::from(page.limit());
    let offset = i64::try_from(page.first_row())
        .map_err(|_| AppError::invalid_argument("page offset is out of range"))?;
    Ok((limit, offset))
}
