//! Grievance repository.

use std::sync::Arc;

use crate::entities::{Grievance, grievance};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Grievance repository for database operations.
#[derive(Clone)]
pub struct GrievanceRepository {
    db: Arc<DatabaseConnection>,
}

impl GrievanceRepository {
    /// Create a new grievance repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a grievance by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<grievance::Model>> {
        Grievance::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new grievance.
    pub async fn create(&self, model: grievance::ActiveModel) -> AppResult<grievance::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a grievance.
    pub async fn update(&self, model: grievance::ActiveModel) -> AppResult<grievance::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Grievances filed by a student, newest first.
    pub async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<grievance::Model>> {
        Grievance::find()
            .filter(grievance::Column::StudentId.eq(student_id))
            .order_by_desc(grievance::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All grievances, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<grievance::Model>> {
        Grievance::find()
            .order_by_desc(grievance::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
