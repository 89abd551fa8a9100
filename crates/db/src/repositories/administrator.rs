//! Administrator repository.

use std::sync::Arc;

use crate::entities::{Administrator, administrator};
use counselhub_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Administrator repository for database operations.
#[derive(Clone)]
pub struct AdministratorRepository {
    db: Arc<DatabaseConnection>,
}

impl AdministratorRepository {
    /// Create a new administrator repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an administrator by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<administrator::Model>> {
        Administrator::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an administrator by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<administrator::Model>> {
        Administrator::find()
            .filter(administrator::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new administrator.
    pub async fn create(
        &self,
        model: administrator::ActiveModel,
    ) -> AppResult<administrator::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Stamp the last login time.
    pub async fn touch_last_login(
        &self,
        model: administrator::Model,
    ) -> AppResult<administrator::Model> {
        let mut active: administrator::ActiveModel = model.into();
        active.last_login_at = Set(Some(chrono::Utc::now().into()));
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
