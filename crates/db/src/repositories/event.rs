//! Event and event registration repository.

use std::sync::Arc;

use crate::entities::{Event, EventRegistration, event, event_registration};
use chrono::NaiveDate;
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Event repository for database operations.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<event::Model>> {
        Event::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Events on or after `from`, soonest first.
    pub async fn find_upcoming(&self, from: NaiveDate) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(event::Column::EventDate.gte(from))
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::StartTime)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of registrations for an event.
    pub async fn count_registrations(&self, event_id: &str) -> AppResult<u64> {
        EventRegistration::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A student's registration for an event, if any.
    pub async fn find_registration(
        &self,
        event_id: &str,
        student_id: &str,
    ) -> AppResult<Option<event_registration::Model>> {
        EventRegistration::find()
            .filter(event_registration::Column::EventId.eq(event_id))
            .filter(event_registration::Column::StudentId.eq(student_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// IDs of events a student is registered for.
    pub async fn registered_event_ids(&self, student_id: &str) -> AppResult<Vec<String>> {
        let regs = EventRegistration::find()
            .filter(event_registration::Column::StudentId.eq(student_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(regs.into_iter().map(|r| r.event_id).collect())
    }

    /// Register a student.
    pub async fn create_registration(
        &self,
        model: event_registration::ActiveModel,
    ) -> AppResult<event_registration::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
