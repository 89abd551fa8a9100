//! Counselling session and feedback repository.

use std::sync::Arc;

use crate::entities::{CounsellingSession, Feedback, counselling_session, feedback};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Repository for sessions recorded against appointments and their feedback.
#[derive(Clone)]
pub struct CounsellingSessionRepository {
    db: Arc<DatabaseConnection>,
}

impl CounsellingSessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<counselling_session::Model>> {
        CounsellingSession::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Sessions recorded for an appointment.
    pub async fn find_by_appointment(
        &self,
        appointment_id: &str,
    ) -> AppResult<Vec<counselling_session::Model>> {
        CounsellingSession::find()
            .filter(counselling_session::Column::AppointmentId.eq(appointment_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a session on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: counselling_session::ActiveModel,
    ) -> AppResult<counselling_session::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Feedback a student already left for a session.
    pub async fn find_feedback(
        &self,
        session_id: &str,
        student_id: &str,
    ) -> AppResult<Option<feedback::Model>> {
        Feedback::find()
            .filter(feedback::Column::SessionId.eq(session_id))
            .filter(feedback::Column::StudentId.eq(student_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store feedback.
    pub async fn create_feedback(&self, model: feedback::ActiveModel) -> AppResult<feedback::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
