//! Event listings and student registration.

use std::collections::HashSet;

use chrono::Utc;
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        event,
        event_registration::{self, AttendanceStatus},
        notification::NotificationType,
    },
    repositories::EventRepository,
};
use sea_orm::Set;
use serde::Serialize;
use tracing::info;

use super::{account::AccountRef, notification::NotificationService, today};

/// An upcoming event as seen by one student.
#[derive(Debug, Clone, Serialize)]
pub struct EventListing {
    #[serde(flatten)]
    pub event: event::Model,
    pub registered: bool,
}

/// Event service for business logic.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(event_repo: EventRepository, notifications: NotificationService) -> Self {
        Self {
            event_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Events from today on, each flagged with the student's registration.
    pub async fn upcoming_for_student(&self, student_id: &str) -> AppResult<Vec<EventListing>> {
        let events = self.event_repo.find_upcoming(today()).await?;
        let registered: HashSet<String> = self
            .event_repo
            .registered_event_ids(student_id)
            .await?
            .into_iter()
            .collect();

        Ok(events
            .into_iter()
            .map(|event| EventListing {
                registered: registered.contains(&event.id),
                event,
            })
            .collect())
    }

    /// Register a student for an event.
    pub async fn register(
        &self,
        student_id: &str,
        event_id: &str,
    ) -> AppResult<event_registration::Model> {
        let event = self
            .event_repo
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.event_date < today() {
            return Err(AppError::Conflict("This event has already taken place".to_string()));
        }
        if self
            .event_repo
            .find_registration(&event.id, student_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "You are already registered for this event".to_string(),
            ));
        }
        if let Some(capacity) = event.capacity {
            let taken = self.event_repo.count_registrations(&event.id).await?;
            if taken >= u64::try_from(capacity).unwrap_or(0) {
                return Err(AppError::Conflict("This event is full".to_string()));
            }
        }

        let model = event_registration::ActiveModel {
            id: Set(self.id_gen.generate()),
            event_id: Set(event.id.clone()),
            student_id: Set(student_id.to_string()),
            registered_at: Set(Utc::now().into()),
            reminder_sent: Set(false),
            attendance_status: Set(AttendanceStatus::Registered),
        };
        let registration = self.event_repo.create_registration(model).await?;

        self.notifications
            .notify(
                &AccountRef::student(student_id),
                format!(
                    "You are registered for \"{}\" on {}.",
                    event.title, event.event_date
                ),
                NotificationType::General,
                Some(&event.id),
            )
            .await?;

        info!(event_id = %event.id, student_id, "Student registered for event");
        Ok(registration)
    }
}
