// src/repositories/comment_repository.rs
//
// Comment persistence
//
// A comment row carries two nullable parent columns; exactly one of them is
// set. Rows violating that are reported as conversion failures on read.

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::comment::{Comment, CommentParent, NewComment};
use crate::domain::{require_id, require_text, PageRequest, RatingDelta};
use crate::error::{AppError, AppResult, EntityKind};
use crate::repositories::support::{
    apply_counter_delta, ensure_affected, now, page_bounds, parse_timestamp, write_transaction,
};

const COMMENT_COLUMNS: &str =
    "id, user_id, question_id, answer_id, description, rating, created_at, modified_at";

#[derive(Debug)]
struct InvalidParent {
    question_id: Option<i64>,
    answer_id: Option<i64>,
}

impl std::fmt::Display for InvalidParent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "comment must reference exactly one parent (question_id = {:?}, answer_id = {:?})",
            self.question_id, self.answer_id
        )
    }
}

impl std::error::Error for InvalidParent {}

#[cfg_attr(test, mockall::automock)]
pub trait CommentRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Comment>;
    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Comment>>;
    fn list_by_question(&self, question_id: i64, page: PageRequest) -> AppResult<Vec<Comment>>;
    fn list_by_answer(&self, answer_id: i64, page: PageRequest) -> AppResult<Vec<Comment>>;
    fn create(&self, comment: &NewComment) -> AppResult<Comment>;
    fn update_description(&self, id: i64, description: &str) -> AppResult<Comment>;
    /// `delta` must be +1 or -1; returns the new rating
    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64>;
    fn remove(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteCommentRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCommentRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &Row) -> Result<Comment, rusqlite::Error> {
        let question_id: Option<i64> = row.get("question_id")?;
        let answer_id: Option<i64> = row.get("answer_id")?;
        let parent = CommentParent::from_columns(question_id, answer_id).ok_or_else(|| {
            let index = row.as_ref().column_index("question_id").unwrap_or(0);
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Integer,
                Box::new(InvalidParent {
                    question_id,
                    answer_id,
                }),
            )
        })?;

        Ok(Comment {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            parent,
            description: row.get("description")?,
            rating: row.get("rating")?,
            created_at: parse_timestamp(row, "created_at")?,
            modified_at: parse_timestamp(row, "modified_at")?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> AppResult<Comment> {
        conn.query_row(
            &format!("SELECT {} FROM comment WHERE id = ?1", COMMENT_COLUMNS),
            params![id],
            Self::row_to_comment,
        )
        .optional()?
        .ok_or_else(|| {
            log::info!("Found no comment with id {}", id);
            AppError::not_found(EntityKind::Comment, id)
        })
    }

    fn list_where(
        &self,
        parent_column: &str,
        parent_id: i64,
        page: &PageRequest,
    ) -> AppResult<Vec<Comment>> {
        let (limit, offset) = page_bounds(page)?;

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM comment WHERE {} = ?1 ORDER BY id LIMIT ?2 OFFSET ?3",
            COMMENT_COLUMNS, parent_column
        ))?;

        let comments = stmt
            .query_map(params![parent_id, limit, offset], Self::row_to_comment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }
}

impl CommentRepository for SqliteCommentRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Comment> {
        require_id(id, "id")?;
        log::info!("Find comment with id {}", id);

        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Comment>> {
        let (limit, offset) = page_bounds(&page)?;
        log::info!("Find {} comments with offset {}", page.limit(), page.offset());

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM comment ORDER BY id LIMIT ?1 OFFSET ?2",
            COMMENT_COLUMNS
        ))?;

        let comments = stmt
            .query_map(params![limit, offset], Self::row_to_comment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }

    fn list_by_question(&self, question_id: i64, page: PageRequest) -> AppResult<Vec<Comment>> {
        require_id(question_id, "questionID")?;
        log::info!(
            "Find {} comments of question {} with offset {}",
            page.limit(),
            question_id,
            page.offset()
        );
        self.list_where("question_id", question_id, &page)
    }

    fn list_by_answer(&self, answer_id: i64, page: PageRequest) -> AppResult<Vec<Comment>> {
        require_id(answer_id, "answerID")?;
        log::info!(
            "Find {} comments of answer {} with offset {}",
            page.limit(),
            answer_id,
            page.offset()
        );
        self.list_where("answer_id", answer_id, &page)
    }

    fn create(&self, comment: &NewComment) -> AppResult<Comment> {
        let parent = comment.parent();

        write_transaction(&self.pool, |tx| {
            let timestamp = now();
            tx.execute(
                "INSERT INTO comment (user_id, question_id, answer_id, description, rating,
                                      created_at, modified_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)",
                params![
                    comment.user_id(),
                    parent.question_id(),
                    parent.answer_id(),
                    comment.description(),
                    timestamp,
                ],
            )?;

            let id = tx.last_insert_rowid();
            log::info!("Create comment with id {}", id);
            Self::fetch(tx, id)
        })
    }

    fn update_description(&self, id: i64, description: &str) -> AppResult<Comment> {
        require_id(id, "id")?;
        require_text(description, "new description")?;

        write_transaction(&self.pool, |tx| {
            log::info!("Update description of comment with id {}", id);
            let rows = tx.execute(
                "UPDATE comment SET description = ?1, modified_at = ?2 WHERE id = ?3",
                params![description, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Comment, id)?;
            Self::fetch(tx, id)
        })
    }

    fn update_rating(&self, id: i64, delta: i64) -> AppResult<i64> {
        require_id(id, "id")?;
        let delta = RatingDelta::from_raw(delta)?;
        log::info!("Update rating of comment with id {} by {}", id, delta.value());

        write_transaction(&self.pool, |tx| {
            apply_counter_delta(tx, EntityKind::Comment, "rating", id, delta.value())
        })
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let rows = tx.execute("DELETE FROM comment WHERE id = ?1", params![id])?;
            ensure_affected(rows, EntityKind::Comment, id)?;
            log::info!("Remove comment with id {}", id);
            Ok(())
        })
    }
}
