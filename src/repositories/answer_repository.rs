// src/repositories/answer_repository.rs
//
// Answer persistence

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::answer::{Answer, NewAnswer};
use crate::domain::{require_id, require_text, PageRequest, RatingDelta};
use crate::error::{AppError, AppResult, EntityKind};
use crate::repositories::support::{
    apply_counter_delta, ensure_affected, now, page_bounds, parse_timestamp, write_transaction,
};

const ANSWER_COLUMNS: &str =
    "id, user_id, question_id, description, rating, is_correct, created_at, modified_at";

#[cfg_attr(test, mockall::automock)]
pub trait AnswerRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Answer>;
    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Answer>>;
    fn list_by_question(&self, question_id: i64, page: PageRequest) -> AppResult<Vec<Answer>>;
    fn create(&self, answer: &NewAnswer) -> AppResult<Answer>;
    fn update_description(&self, id: i64, description: &str) -> AppResult<Answer>;
    /// `delta` must be +1 or -1; returns the new rating
    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64>;
    /// Marks the answer correct and every other answer of its question incorrect
    fn mark_correct(&self, id: i64) -> AppResult<Answer>;
    fn unmark_correct(&self, id: i64) -> AppResult<Answer>;
    fn remove(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteAnswerRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAnswerRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_answer(row: &Row) -> Result<Answer, rusqlite::Error> {
        Ok(Answer {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            question_id: row.get("question_id")?,
            description: row.get("description")?,
            rating: row.get("rating")?,
            is_correct: row.get("is_correct")?,
            created_at: parse_timestamp(row, "created_at")?,
            modified_at: parse_timestamp(row, "modified_at")?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> AppResult<Answer> {
        conn.query_row(
            &format!("SELECT {} FROM answer WHERE id = ?1", ANSWER_COLUMNS),
            params![id],
            Self::row_to_answer,
        )
        .optional()?
        .ok_or_else(|| {
            log::info!("Found no answer with id {}", id);
            AppError::not_found(EntityKind::Answer, id)
        })
    }
}

impl AnswerRepository for SqliteAnswerRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Answer> {
        require_id(id, "id")?;
        log::info!("Find answer with id {}", id);

        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Answer>> {
        let (limit, offset) = page_bounds(&page)?;
        log::info!("Find {} answers with offset {}", page.limit(), page.offset());

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM answer ORDER BY id LIMIT ?1 OFFSET ?2",
            ANSWER_COLUMNS
        ))?;

        let answers = stmt
            .query_map(params![limit, offset], Self::row_to_answer)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(answers)
    }

    fn list_by_question(&self, question_id: i64, page: PageRequest) -> AppResult<Vec<Answer>> {
        require_id(question_id, "questionID")?;
        let (limit, offset) = page_bounds(&page)?;
        log::info!(
            "Find {} answers of question {} with offset {}",
            page.limit(),
            question_id,
            page.offset()
        );

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM answer WHERE question_id = ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
            ANSWER_COLUMNS
        ))?;

        let answers = stmt
            .query_map(params![question_id, limit, offset], Self::row_to_answer)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(answers)
    }

    fn create(&self, answer: &NewAnswer) -> AppResult<Answer> {
        write_transaction(&self.pool, |tx| {
            let timestamp = now();
            tx.execute(
                "INSERT INTO answer (user_id, question_id, description, rating, is_correct,
                                     created_at, modified_at)
                 VALUES (?1, ?2, ?3, 0, 0, ?4, ?4)",
                params![
                    answer.user_id(),
                    answer.question_id(),
                    answer.description(),
                    timestamp,
                ],
            )?;

            let id = tx.last_insert_rowid();
            log::info!("Create answer with id {}", id);
            Self::fetch(tx, id)
        })
    }

    fn update_description(&self, id: i64, description: &str) -> AppResult<Answer> {
        require_id(id, "id")?;
        require_text(description, "new description")?;

        write_transaction(&self.pool, |tx| {
            log::info!("Update description of answer with id {}", id);
            let rows = tx.execute(
                "UPDATE answer SET description = ?1, modified_at = ?2 WHERE id = ?3",
                params![description, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Answer, id)?;
            Self::fetch(tx, id)
        })
    }

    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64> {
        require_id(id, "id")?;
        let delta = RatingDelta::from_raw(delta)?;
        log::info!("Update rating of answer with id {} by {}", id, delta.value());

        write_transaction(&self.pool, |tx| {
            apply_counter_delta(tx, EntityKind::Answer, "rating", id, delta.value())
        })
    }

    fn mark_correct(&self, id: i64) -> AppResult<Answer> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let answer = Self::fetch(tx, id)?;
            let timestamp = now();

            let cleared = tx.execute(
                "UPDATE answer SET is_correct = 0, modified_at = ?1
                 WHERE question_id = ?2 AND id != ?3 AND is_correct = 1",
                params![timestamp, answer.question_id, id],
            )?;
            if cleared > 0 {
                log::info!(
                    "Cleared {} previously correct answers of question {}",
                    cleared,
                    answer.question_id
                );
            }

            tx.execute(
                "UPDATE answer SET is_correct = 1, modified_at = ?1 WHERE id = ?2",
                params![timestamp, id],
            )?;
            log::info!("Set answer with id {} correct", id);

            Self::fetch(tx, id)
        })
    }

    fn unmark_correct(&self, id: i64) -> AppResult<Answer> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let rows = tx.execute(
                "UPDATE answer SET is_correct = 0, modified_at = ?1 WHERE id = ?2",
                params![now(), id],
            )?;
            ensure_affected(rows, EntityKind::Answer, id)?;
            log::info!("Set answer with id {} incorrect", id);
            Self::fetch(tx, id)
        })
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let rows = tx.execute("DELETE FROM answer WHERE id = ?1", params![id])?;
            ensure_affected(rows, EntityKind::Answer, id)?;
            log::info!("Remove answer with id {}", id);
            Ok(())
        })
    }
}
