// src/services/profile_service.rs
use std::sync::Arc;

use crate::domain::{ensure_owner, PageRequest, Profile, Subject};
use crate::error::{AppResult, EntityKind};
use crate::repositories::ProfileRepository;

pub struct ProfileService {
    profile_repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(profile_repo: Arc<dyn ProfileRepository>) -> Self {
        Self { profile_repo }
    }

    pub fn find_profile(&self, id: i64) -> AppResult<Profile> {
        self.profile_repo.find_by_id(id)
    }

    pub fn find_profile_by_user_id(&self, user_id: &str) -> AppResult<Option<Profile>> {
        self.profile_repo.find_by_user_id(user_id)
    }

    pub fn find_profiles(&self, limit: u32, offset: u32) -> AppResult<Vec<Profile>> {
        let page = PageRequest::new(limit, offset)?;
        self.profile_repo.list_paginated(page)
    }

    pub fn create_profile(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> AppResult<Profile> {
        let profile = self.profile_repo.create(user_id, first_name, last_name)?;
        log::info!("Created profile {} for {}", profile.id, profile.display_name());
        Ok(profile)
    }

    pub fn update_first_name(&self, id: i64, first_name: &str) -> AppResult<Profile> {
        self.profile_repo.update_first_name(id, first_name)
    }

    pub fn update_last_name(&self, id: i64, last_name: &str) -> AppResult<Profile> {
        self.profile_repo.update_last_name(id, last_name)
    }

    pub fn update_description(&self, id: i64, description: &str) -> AppResult<Profile> {
        self.profile_repo.update_description(id, description)
    }

    pub fn update_image(&self, id: i64, image: &[u8]) -> AppResult<Profile> {
        self.profile_repo.update_image(id, image)
    }

    /// Returns the new reputation
    pub fn update_reputation(&self, id: i64, delta: i64) -> AppResult<i64> {
        self.profile_repo.update_reputation(id, delta)
    }

    pub fn remove_profile(&self, id: i64) -> AppResult<()> {
        self.profile_repo.remove(id)
    }

    pub fn authorize(&self, subject: &Subject, id: i64) -> AppResult<Profile> {
        let profile = self.profile_repo.find_by_id(id)?;
        ensure_owner(subject, &profile.user_id, EntityKind::Profile, Some(id))?;
        Ok(profile)
    }

    pub fn authorize_creation(&self, subject: &Subject, user_id: &str) -> AppResult<()> {
        ensure_owner(subject, user_id, EntityKind::Profile, None)
    }
}
