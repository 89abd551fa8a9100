//! Counsellor assignment log repository.

use std::sync::Arc;

use crate::entities::{CounsellorAssignmentLog, counsellor_assignment_log};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Assignment log repository for database operations.
#[derive(Clone)]
pub struct CounsellorAssignmentLogRepository {
    db: Arc<DatabaseConnection>,
}

impl CounsellorAssignmentLogRepository {
    /// Create a new assignment log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append a log row on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: counsellor_assignment_log::ActiveModel,
    ) -> AppResult<counsellor_assignment_log::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// History of a student's assignments, newest first.
    pub async fn find_by_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<counsellor_assignment_log::Model>> {
        CounsellorAssignmentLog::find()
            .filter(counsellor_assignment_log::Column::StudentId.eq(student_id))
            .order_by_desc(counsellor_assignment_log::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
