//! Counsellor schedule repository.

use std::sync::Arc;

use crate::entities::{CounsellorSchedule, counsellor_schedule, counsellor_schedule::DayOfWeek};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Counsellor schedule repository for database operations.
#[derive(Clone)]
pub struct CounsellorScheduleRepository {
    db: Arc<DatabaseConnection>,
}

impl CounsellorScheduleRepository {
    /// Create a new schedule repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert several slots on the given connection.
    pub async fn create_many_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        slots: Vec<counsellor_schedule::ActiveModel>,
    ) -> AppResult<()> {
        if slots.is_empty() {
            return Ok(());
        }

        CounsellorSchedule::insert_many(slots)
            .exec_without_returning(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Slots of a counsellor, in weekday order as stored.
    pub async fn find_by_counsellor(
        &self,
        counsellor_id: &str,
    ) -> AppResult<Vec<counsellor_schedule::Model>> {
        CounsellorSchedule::find()
            .filter(counsellor_schedule::Column::CounsellorId.eq(counsellor_id))
            .order_by_asc(counsellor_schedule::Column::StartTime)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Slots of a counsellor on one weekday.
    pub async fn find_by_counsellor_and_day(
        &self,
        counsellor_id: &str,
        day: DayOfWeek,
    ) -> AppResult<Vec<counsellor_schedule::Model>> {
        CounsellorSchedule::find()
            .filter(counsellor_schedule::Column::CounsellorId.eq(counsellor_id))
            .filter(counsellor_schedule::Column::DayOfWeek.eq(day))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
