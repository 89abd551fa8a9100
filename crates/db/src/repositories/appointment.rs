//! Appointment repository.

use std::sync::Arc;

use crate::entities::{Appointment, appointment, appointment::AppointmentStatus};
use chrono::{NaiveDate, NaiveTime};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

/// Appointment repository for database operations.
#[derive(Clone)]
pub struct AppointmentRepository {
    db: Arc<DatabaseConnection>,
}

impl AppointmentRepository {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an appointment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<appointment::Model>> {
        self.find_by_id_in(self.db.as_ref(), id).await
    }

    /// Find an appointment by ID on the given connection.
    pub async fn find_by_id_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<Option<appointment::Model>> {
        Appointment::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new appointment on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: appointment::ActiveModel,
    ) -> AppResult<appointment::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new appointment.
    pub async fn create(&self, model: appointment::ActiveModel) -> AppResult<appointment::Model> {
        self.create_in(self.db.as_ref(), model).await
    }

    /// Update an appointment on the given connection.
    pub async fn update_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: appointment::ActiveModel,
    ) -> AppResult<appointment::Model> {
        model
            .update(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an appointment.
    pub async fn update(&self, model: appointment::ActiveModel) -> AppResult<appointment::Model> {
        self.update_in(self.db.as_ref(), model).await
    }

    /// Whether the counsellor already has a scheduled appointment starting
    /// at the given slot. `exclude_id` skips the appointment being moved.
    pub async fn slot_taken_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        counsellor_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        exclude_id: Option<&str>,
    ) -> AppResult<bool> {
        let mut query = Appointment::find()
            .filter(appointment::Column::CounsellorId.eq(counsellor_id))
            .filter(appointment::Column::AppointmentDate.eq(date))
            .filter(appointment::Column::StartTime.eq(start))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Scheduled));

        if let Some(id) = exclude_id {
            query = query.filter(appointment::Column::Id.ne(id));
        }

        let count = query
            .count(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// [`Self::slot_taken_in`] outside of a transaction.
    pub async fn slot_taken(
        &self,
        counsellor_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        exclude_id: Option<&str>,
    ) -> AppResult<bool> {
        self.slot_taken_in(self.db.as_ref(), counsellor_id, date, start, exclude_id)
            .await
    }

    /// Scheduled appointments of a counsellor on or after `from`.
    pub async fn find_future_scheduled_for_counsellor_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        counsellor_id: &str,
        from: NaiveDate,
    ) -> AppResult<Vec<appointment::Model>> {
        Appointment::find()
            .filter(appointment::Column::CounsellorId.eq(counsellor_id))
            .filter(appointment::Column::AppointmentDate.gte(from))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Scheduled))
            .order_by_asc(appointment::Column::AppointmentDate)
            .order_by_asc(appointment::Column::StartTime)
            .all(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Scheduled appointments of a student on or after `from`, soonest first.
    pub async fn find_upcoming_for_student(
        &self,
        student_id: &str,
        from: NaiveDate,
    ) -> AppResult<Vec<appointment::Model>> {
        Appointment::find()
            .filter(appointment::Column::StudentId.eq(student_id))
            .filter(appointment::Column::AppointmentDate.gte(from))
            .filter(appointment::Column::Status.eq(AppointmentStatus::Scheduled))
            .order_by_asc(appointment::Column::AppointmentDate)
            .order_by_asc(appointment::Column::StartTime)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All appointments of a counsellor, newest first.
    pub async fn find_by_counsellor(
        &self,
        counsellor_id: &str,
    ) -> AppResult<Vec<appointment::Model>> {
        Appointment::find()
            .filter(appointment::Column::CounsellorId.eq(counsellor_id))
            .order_by_desc(appointment::Column::AppointmentDate)
            .order_by_desc(appointment::Column::StartTime)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
