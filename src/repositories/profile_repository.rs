// src/repositories/profile_repository.rs
//
// Profile persistence
//
// user_id is unique; a second profile for the same identity is rejected by
// the UNIQUE constraint and reported as an invalid argument.

use std::sync::Arc;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::db::ConnectionPool;
use crate::domain::profile::{validate_profile_names, Profile};
use crate::domain::{require_id, require_text, PageRequest};
use crate::error::{AppError, AppResult, EntityKind};
use crate::repositories::support::{
    apply_counter_delta, ensure_affected, now, page_bounds, parse_timestamp, write_transaction,
};

const PROFILE_COLUMNS: &str = "id, user_id, first_name, last_name, description, image, \
                               reputation, created_at, modified_at";

#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> AppResult<Profile>;
    /// `None` when the identity has no profile yet
    fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Profile>>;
    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Profile>>;
    fn create(&self, user_id: &str, first_name: &str, last_name: &str) -> AppResult<Profile>;
    fn update_first_name(&self, id: i64, first_name: &str) -> AppResult<Profile>;
    fn update_last_name(&self, id: i64, last_name: &str) -> AppResult<Profile>;
    fn update_description(&self, id: i64, description: &str) -> AppResult<Profile>;
    fn update_image(&self, id: i64, image: &[u8]) -> AppResult<Profile>;
    /// Adds an arbitrary delta; returns the new reputation
    fn update_reputation(&self, id: i64, delta: i64) -> AppResult<i64>;
    fn remove(&self, id: i64) -> AppResult<()>;
}

pub struct SqliteProfileRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProfileRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &Row) -> Result<Profile, rusqlite::Error> {
        Ok(Profile {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            description: row.get("description")?,
            image: row.get("image")?,
            reputation: row.get("reputation")?,
            created_at: parse_timestamp(row, "created_at")?,
            modified_at: parse_timestamp(row, "modified_at")?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> AppResult<Profile> {
        conn.query_row(
            &format!("SELECT {} FROM profile WHERE id = ?1", PROFILE_COLUMNS),
            params![id],
            Self::row_to_profile,
        )
        .optional()?
        .ok_or_else(|| {
            log::info!("Found no profile with id {}", id);
            AppError::not_found(EntityKind::Profile, id)
        })
    }

    fn update_name(&self, column: &str, id: i64, value: &str) -> AppResult<Profile> {
        require_id(id, "id")?;
        require_text(value, &column.replace('_', " "))?;

        write_transaction(&self.pool, |tx| {
            log::info!("Update {} of profile with id {}", column, id);
            let rows = tx.execute(
                &format!(
                    "UPDATE profile SET {} = ?1, modified_at = ?2 WHERE id = ?3",
                    column
                ),
                params![value, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Profile, id)?;
            Self::fetch(tx, id)
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl ProfileRepository for SqliteProfileRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Profile> {
        require_id(id, "id")?;
        log::info!("Find profile with id {}", id);

        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Profile>> {
        require_text(user_id, "userID")?;
        log::info!("Find profile of user {}", user_id);

        let conn = self.pool.get()?;
        let profile = conn
            .query_row(
                &format!("SELECT {} FROM profile WHERE user_id = ?1", PROFILE_COLUMNS),
                params![user_id],
                Self::row_to_profile,
            )
            .optional()?;

        Ok(profile)
    }

    fn list_paginated(&self, page: PageRequest) -> AppResult<Vec<Profile>> {
        let (limit, offset) = page_bounds(&page)?;
        log::info!("Find {} profiles with offset {}", page.limit(), page.offset());

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM profile ORDER BY id LIMIT ?1 OFFSET ?2",
            PROFILE_COLUMNS
        ))?;

        let profiles = stmt
            .query_map(params![limit, offset], Self::row_to_profile)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    fn create(&self, user_id: &str, first_name: &str, last_name: &str) -> AppResult<Profile> {
        validate_profile_names(user_id, first_name, last_name)?;

        write_transaction(&self.pool, |tx| {
            let timestamp = now();
            tx.execute(
                "INSERT INTO profile (user_id, first_name, last_name, reputation,
                                      created_at, modified_at)
                 VALUES (?1, ?2, ?3, 0, ?4, ?4)",
                params![user_id, first_name, last_name, timestamp],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    log::info!("Profile of user {} already exists", user_id);
                    AppError::invalid_argument("profile already exists")
                } else {
                    AppError::Database(e)
                }
            })?;

            let id = tx.last_insert_rowid();
            log::info!("Create profile with id {}", id);
            Self::fetch(tx, id)
        })
    }

    fn update_first_name(&self, id: i64, first_name: &str) -> AppResult<Profile> {
        self.update_name("first_name", id, first_name)
    }

    fn update_last_name(&self, id: i64, last_name: &str) -> AppResult<Profile> {
        self.update_name("last_name", id, last_name)
    }

    fn update_description(&self, id: i64, description: &str) -> AppResult<Profile> {
        require_id(id, "id")?;
        require_text(description, "new description")?;

        write_transaction(&self.pool, |tx| {
            log::info!("Update description of profile with id {}", id);
            let rows = tx.execute(
                "UPDATE profile SET description = ?1, modified_at = ?2 WHERE id = ?3",
                params![description, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Profile, id)?;
            Self::fetch(tx, id)
        })
    }

    fn update_image(&self, id: i64, image: &[u8]) -> AppResult<Profile> {
        require_id(id, "id")?;
        if image.is_empty() {
            return Err(AppError::invalid_argument("image cannot be empty"));
        }

        write_transaction(&self.pool, |tx| {
            log::info!("Update image of profile with id {} ({} bytes)", id, image.len());
            let rows = tx.execute(
                "UPDATE profile SET image = ?1, modified_at = ?2 WHERE id = ?3",
                params![image, now(), id],
            )?;
            ensure_affected(rows, EntityKind::Profile, id)?;
            Self::fetch(tx, id)
        })
    }

    fn update_reputation(&self, id: i64, delta: i64) -> AppResult<i64> {
        require_id(id, "id")?;
        log::info!("Update reputation of profile with id {} by {}", id, delta);

        write_transaction(&self.pool, |tx| {
            apply_counter_delta(tx, EntityKind::Profile, "reputation", id, delta)
        })
    }

    fn remove(&self, id: i64) -> AppResult<()> {
        require_id(id, "id")?;

        write_transaction(&self.pool, |tx| {
            let rows = tx.execute("DELETE FROM profile WHERE id = ?1", params![id])?;
            ensure_affected(rows, EntityKind::Profile, id)?;
            log::info!("Remove profile with id {}", id);
            Ok(())
        })
    }
}
