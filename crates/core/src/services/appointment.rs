//! Appointment lifecycle after booking.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        appointment::{self, AppointmentStatus},
        counselling_session, feedback,
        notification::NotificationType,
    },
    repositories::{
        AppointmentRepository, CounsellingSessionRepository, CounsellorScheduleRepository,
    },
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{
    account::AccountRef, appointment_request::APPOINTMENT_LENGTH, ensure_not_past,
    notification::NotificationService, parse_date, parse_time, today, transaction_failed,
};

/// Input for moving an appointment.
#[derive(Debug, Deserialize, Validate)]
pub struct RescheduleInput {
    /// `YYYY-MM-DD`
    #[validate(length(min = 1))]
    pub new_date: String,

    /// `HH:MM`
    #[validate(length(min = 1))]
    pub new_time: String,
}

/// Session notes recorded when an appointment is completed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompleteAppointmentInput {
    #[validate(length(max = 8192))]
    pub notes: Option<String>,

    #[validate(length(max = 8192))]
    pub recommendations: Option<String>,

    #[validate(length(max = 8192))]
    pub resources: Option<String>,

    /// `YYYY-MM-DD`
    pub follow_up_date: Option<String>,

    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: Option<i32>,
}

/// A student's rating of a session.
#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackInput {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 4096))]
    pub comments: Option<String>,
}

/// Appointment service for business logic.
#[derive(Clone)]
pub struct AppointmentService {
    db: Arc<DatabaseConnection>,
    appointment_repo: AppointmentRepository,
    schedule_repo: CounsellorScheduleRepository,
    session_repo: CounsellingSessionRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

const fn is_open(status: AppointmentStatus) -> bool {
    matches!(
        status,
        AppointmentStatus::Scheduled | AppointmentStatus::Rescheduled
    )
}

impl AppointmentService {
    /// Create a new appointment service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        appointment_repo: AppointmentRepository,
        schedule_repo: CounsellorScheduleRepository,
        session_repo: CounsellingSessionRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db,
            appointment_repo,
            schedule_repo,
            session_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    async fn owned(
        &self,
        appointment_id: &str,
        owned_by_caller: impl Fn(&appointment::Model) -> bool,
    ) -> AppResult<appointment::Model> {
        self.appointment_repo
            .find_by_id(appointment_id)
            .await?
            .filter(|a| owned_by_caller(a))
            .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))
    }

    /// Move one of the student's scheduled appointments to a new slot.
    pub async fn reschedule(
        &self,
        student_id: &str,
        appointment_id: &str,
        input: RescheduleInput,
    ) -> AppResult<appointment::Model> {
        input.validate()?;

        let appt = self
            .owned(appointment_id, |a| {
                a.student_id == student_id && a.status == AppointmentStatus::Scheduled
            })
            .await?;

        let date = parse_date(&input.new_date, "new_date")?;
        let start = parse_time(&input.new_time, "new_time")?;
        ensure_not_past(date)?;
        let end = start + APPOINTMENT_LENGTH;
        if end <= start {
            return Err(AppError::Validation(
                "Appointments must end on the day they start".to_string(),
            ));
        }

        let slots = self
            .schedule_repo
            .find_by_counsellor_and_day(&appt.counsellor_id, date.weekday().into())
            .await?;
        if !slots
            .iter()
            .any(|s| s.start_time <= start && end <= s.end_time)
        {
            return Err(AppError::Conflict(
                "The counsellor is not available at that time".to_string(),
            ));
        }

        if self
            .appointment_repo
            .slot_taken(&appt.counsellor_id, date, start, Some(&appt.id))
            .await?
        {
            return Err(AppError::Conflict(
                "That time slot is already booked".to_string(),
            ));
        }

        let old_when = format!(
            "{} at {}",
            appt.appointment_date,
            appt.start_time.format("%H:%M")
        );
        let new_when = format!("{date} at {}", start.format("%H:%M"));

        let mut active: appointment::ActiveModel = appt.into();
        active.appointment_date = Set(date);
        active.start_time = Set(start);
        active.end_time = Set(Some(end));
        active.status = Set(AppointmentStatus::Rescheduled);
        let updated = self.appointment_repo.update(active).await?;

        self.notifications
            .notify(
                &AccountRef::counsellor(updated.counsellor_id.clone()),
                format!("An appointment on {old_when} was moved to {new_when}."),
                NotificationType::Appointment,
                Some(&updated.id),
            )
            .await?;
        self.notifications
            .notify(
                &AccountRef::student(updated.student_id.clone()),
                format!("Your appointment was moved to {new_when}."),
                NotificationType::Appointment,
                Some(&updated.id),
            )
            .await?;

        info!(appointment_id = %updated.id, %new_when, "Appointment rescheduled");
        Ok(updated)
    }

    /// Mark an appointment completed and record the session.
    pub async fn complete(
        &self,
        counsellor_id: &str,
        appointment_id: &str,
        input: CompleteAppointmentInput,
    ) -> AppResult<counselling_session::Model> {
        input.validate()?;

        let appt = self
            .owned(appointment_id, |a| a.counsellor_id == counsellor_id)
            .await?;
        if !is_open(appt.status) {
            return Err(AppError::Conflict(
                "Only upcoming appointments can be completed".to_string(),
            ));
        }

        let follow_up_date = input
            .follow_up_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_date(d, "follow_up_date"))
            .transpose()?;

        let session = counselling_session::ActiveModel {
            id: Set(self.id_gen.generate()),
            appointment_id: Set(appt.id.clone()),
            notes: Set(input.notes),
            recommendations: Set(input.recommendations),
            resources: Set(input.resources),
            follow_up_date: Set(follow_up_date),
            duration_minutes: Set(input.duration_minutes),
            created_at: Set(Utc::now().into()),
        };

        let session = self
            .complete_in_txn(appt, session)
            .await
            .map_err(transaction_failed)?;

        info!(appointment_id, session_id = %session.id, "Appointment completed");
        Ok(session)
    }

    async fn complete_in_txn(
        &self,
        appt: appointment::Model,
        session: counselling_session::ActiveModel,
    ) -> AppResult<counselling_session::Model> {
        let txn = self.db.begin().await?;

        let mut active: appointment::ActiveModel = appt.into();
        active.status = Set(AppointmentStatus::Completed);
        self.appointment_repo.update_in(&txn, active).await?;
        let session = self.session_repo.create_in(&txn, session).await?;

        txn.commit().await?;
        Ok(session)
    }

    /// Cancel an appointment and tell the student.
    pub async fn cancel(
        &self,
        counsellor_id: &str,
        appointment_id: &str,
    ) -> AppResult<appointment::Model> {
        let appt = self
            .owned(appointment_id, |a| a.counsellor_id == counsellor_id)
            .await?;
        if !is_open(appt.status) {
            return Err(AppError::Conflict(
                "Only upcoming appointments can be cancelled".to_string(),
            ));
        }

        let mut active: appointment::ActiveModel = appt.into();
        active.status = Set(AppointmentStatus::Cancelled);
        let updated = self.appointment_repo.update(active).await?;

        self.notifications
            .notify(
                &AccountRef::student(updated.student_id.clone()),
                format!(
                    "Your appointment on {} at {} was cancelled by your counsellor.",
                    updated.appointment_date,
                    updated.start_time.format("%H:%M")
                ),
                NotificationType::Appointment,
                Some(&updated.id),
            )
            .await?;

        info!(appointment_id = %updated.id, "Appointment cancelled");
        Ok(updated)
    }

    /// Rate a session of one of the student's appointments. One rating per
    /// session.
    pub async fn leave_feedback(
        &self,
        student_id: &str,
        session_id: &str,
        input: FeedbackInput,
    ) -> AppResult<feedback::Model> {
        input.validate()?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        let appt = self
            .owned(&session.appointment_id, |a| a.student_id == student_id)
            .await
            .map_err(|_| AppError::NotFound("Session not found".to_string()))?;

        if self
            .session_repo
            .find_feedback(&session.id, student_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Feedback was already submitted for this session".to_string(),
            ));
        }

        let model = feedback::ActiveModel {
            id: Set(self.id_gen.generate()),
            session_id: Set(Some(session.id)),
            student_id: Set(Some(student_id.to_string())),
            counsellor_id: Set(Some(appt.counsellor_id)),
            rating: Set(input.rating),
            comments: Set(input.comments),
            created_at: Set(Utc::now().into()),
        };
        self.session_repo.create_feedback(model).await
    }

    /// The student's scheduled appointments from today on, soonest first.
    pub async fn upcoming_for_student(&self, student_id: &str) -> AppResult<Vec<appointment::Model>> {
        self.appointment_repo
            .find_upcoming_for_student(student_id, today())
            .await
    }

    /// All of a counsellor's appointments, newest first.
    pub async fn for_counsellor(&self, counsellor_id: &str) -> AppResult<Vec<appointment::Model>> {
        self.appointment_repo.find_by_counsellor(counsellor_id).await
    }
}
