// src/repositories/question_repository.rs
//
// Question persistence

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::question::{NewQuestion, Question};
use crate::domain::{require_id, require_text, PageRequest, RatingDelta};
use crate::error::{AppError, AppResult, EntityKind};
use crate::repositories::support::{
    apply_counter_delta, ensure_affected, now, page_bounds, parse_timestamp, write_transaction,
};

const QUESTION_COLUMNS: &str = "id, user_id, title, description, view, rating,
                                correct_answer_id, created_at, modified_at";

#[cfg_attr(test, mockall::automock)]
pub trait QuestionRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Question>;
    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Question>>;
    fn create(&self, question: &NewQuestion) -> AppResult<Question>;
    fn update_title(&self, id: i64, title: &str) -> AppResult<Question>;
    fn update_description(&self, id: i64, description: &str) -> AppResult<Question>;
    /// Returns the new view count
    fn increment_view(&self, id: i64) -> AppResult<i64>;
    /// `delta` must be +1 or -1; returns the new rating
    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64>;
    fn set_correct_answer(&self, id: i64, answer_id: i64) -> AppResult<Question>;
    fn clear_correct_answer(&self, id: i64) -> AppResult<Question>;
    fn count_by_user(&self, user_id: &str) -> AppResult<i64>;
    fn remove(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteQuestionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteQuestionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_question(row: &Row) -> Result<Question, rusqlite::Error> {
        Ok(Question {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            view: row.get("view")?,
            rating: row.get("rating")?,
            correct_answer_id: row.get("correct_answer_id")?,
            created_at: parse_timestamp(row, "created_at")?,
            modified_at: parse_timestamp(row, "modified_at")?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> AppResult<Question> {
        conn.query_row(
            &format!("SELECT {} FROM question WHERE id = ?1", QUESTION_COLUMNS),
            params![id],
            Self::row_to_question,
        )
        .optional()?
        .ok_or_else(|| {
            log::info!("Found no question with id {}", id);
            AppError::not_found(EntityKind::Question, id)
        })
    }

    /// Overwrite one text column. `column` is always a literal from this file.
    fn update_text(&self, column: &str, id: i64, value: &str) -> AppResult<Question> {
        require_id(id, "id")?;
        require_text(value, &format!("new {}", column))?;

        write_transaction(&self.pool, |tx| {
            log::info!("Update {} of question with id {}", column, id);
            let rows = tx.execute(
                &format!(
                    "UPDATE question SET {} = ?1, modified_at = ?2 WHERE id = ?3",
                    column
                ),
                params![value, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Question, id)?;
            Self::fetch(tx, id)
        })
    }
}

impl QuestionRepository for SqliteQuestionRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Question> {
        require_id(id, "id")?;
        log::info!("Find question with id {}", id);

        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Question>> {
        let (limit, offset) = page_bounds(&page)?;
        log::info!("Find {} questions with offset {}", page.limit(), page.offset());

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM question ORDER BY id LIMIT ?1 OFFSET ?2",
            QUESTION_COLUMNS
        ))?;

        let questions: Vec<Question> = stmt
            .query_map(params![limit, offset], Self::row_to_question)?
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Found {} questions", questions.len());
        Ok(questions)
    }

    fn create(&self, question: &NewQuestion) -> AppResult<Question> {
        write_transaction(&self.pool, |tx| {
            let timestamp = now();
            tx.execute(
                "INSERT INTO question (user_id, title, description, view, rating,
                                       correct_answer_id, created_at, modified_at)
                 VALUES (?1, ?2, ?3, 0, 0, NULL, ?4, ?4)",
                params![
                    question.user_id(),
                    question.title(),
                    question.description(),
                    timestamp,
                ],
            )?;

            let id = tx.last_insert_rowid();
            log::info!("Create question with id {}", id);
            Self::fetch(tx, id)
        })
    }

    fn update_title(&self, id: i64, title: &str) -> AppResult<Question> {
        self.update_text("title", id, title)
    }

    fn update_description(&self, id: i64, description: &str) -> AppResult<Question> {
        self.update_text("description", id, description)
    }

    fn increment_view(&self, id: i64) -> AppResult<i64> {
        require_id(id, "id")?;
        log::info!("Increment view of question with id {}", id);

        write_transaction(&self.pool, |tx| {
            apply_counter_delta(tx, EntityKind::Question, "view", id, 1)
        })
    }

    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64> {
        require_id(id, "id")?;
        let delta = RatingDelta::from_raw(delta)?;
        log::info!("Update rating of question with id {} by {}", id, delta.value());

        write_transaction(&self.pool, |tx| {
            apply_counter_delta(tx, EntityKind::Question, "rating", id, delta.value())
        })
    }

    fn set_correct_answer(&self, id: i64, answer_id: i64) -> AppResult<Question> {
        require_id(id, "id")?;
        require_id(answer_id, "answerID")?;

        write_transaction(&self.pool, |tx| {
            log::info!("Set correct answer {} of question with id {}", answer_id, id);
            let rows = tx.execute(
                "UPDATE question SET correct_answer_id = ?1, modified_at = ?2 WHERE id = ?3",
                params![answer_id, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Question, id)?;
            Self::fetch(tx, id)
        })
    }

    fn clear_correct_answer(&self, id: i64) -> AppResult<Question> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            log::info!("Clear correct answer of question with id {}", id);
            let rows = tx.execute(
                "UPDATE question SET correct_answer_id = NULL, modified_at = ?1 WHERE id = ?2",
                params![now(), id],
            )?;
            ensure_affected(rows, EntityKind::Question, id)?;
            Self::fetch(tx, id)
        })
    }

    fn count_by_user(&self, user_id: &str) -> AppResult<i64> {
        require_text(user_id, "userID")?;
        log::info!("Count questions of user with id {}", user_id);

        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM question WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let rows = tx.execute("DELETE FROM question WHERE id = ?1", params![id])?;
            ensure_affected(rows, EntityKind::Question, id)?;

            let comments = tx.execute(
                "DELETE FROM comment
                 WHERE question_id = ?1
                    OR answer_id IN (SELECT id FROM answer WHERE question_id = ?1)",
                params![id],
            )?;
            let answers = tx.execute("DELETE FROM answer WHERE question_id = ?1", params![id])?;

            log::info!(
                "Remove question with id {} along with {} answers and {} comments",
                id,
                answers,
                comments
            );
            Ok(())
        })
    }
}
