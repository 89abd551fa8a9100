//! Appointment requests.
//!
//! A request is `pending` until its counsellor approves or rejects it or its
//! student cancels it. Every transition notifies the parties and deletes the
//! request row; approval also books the appointment.

use std::sync::Arc;

use chrono::{Duration, Utc};
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        appointment::{self, AppointmentMode, AppointmentStatus, PaymentStatus},
        appointment_request::{self, RequestStatus},
        notification::NotificationType,
    },
    repositories::{
        AppointmentRepository, AppointmentRequestRepository, CounsellorRepository,
        StudentRepository,
    },
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, Set, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{
    account::AccountRef, ensure_not_past, notification::NotificationService, parse_date,
    parse_time, transaction_failed,
};

/// Length of every booked appointment.
pub const APPOINTMENT_LENGTH: Duration = Duration::hours(1);

/// Input for a new appointment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequestInput {
    #[validate(length(min = 1, max = 128))]
    pub appointment_type: String,

    /// `YYYY-MM-DD`
    #[validate(length(min = 1))]
    pub preferred_date: String,

    /// `HH:MM`
    #[validate(length(min = 1))]
    pub preferred_time: String,

    pub mode: AppointmentMode,

    #[validate(length(max = 2048))]
    pub notes: Option<String>,
}

/// Appointment request service.
#[derive(Clone)]
pub struct AppointmentRequestService {
    db: Arc<DatabaseConnection>,
    student_repo: StudentRepository,
    counsellor_repo: CounsellorRepository,
    request_repo: AppointmentRequestRepository,
    appointment_repo: AppointmentRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl AppointmentRequestService {
    /// Create a new appointment request service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        student_repo: StudentRepository,
        counsellor_repo: CounsellorRepository,
        request_repo: AppointmentRequestRepository,
        appointment_repo: AppointmentRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db,
            student_repo,
            counsellor_repo,
            request_repo,
            appointment_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Send a request to the student's assigned counsellor.
    pub async fn create(
        &self,
        student_id: &str,
        input: CreateRequestInput,
    ) -> AppResult<appointment_request::Model> {
        input.validate()?;

        let student = self.student_repo.get_by_id(student_id).await?;
        if !student.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }
        let counsellor_id = student
            .counsellor_id
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("No counsellor is assigned to you".to_string()))?;
        let counsellor = self.counsellor_repo.get_by_id(counsellor_id).await?;

        let date = parse_date(&input.preferred_date, "preferred_date")?;
        let time = parse_time(&input.preferred_time, "preferred_time")?;
        ensure_not_past(date)?;

        let now = Utc::now();
        let model = appointment_request::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student.id.clone()),
            counsellor_id: Set(counsellor.id.clone()),
            appointment_type: Set(input.appointment_type),
            preferred_date: Set(date),
            preferred_time: Set(time),
            mode: Set(input.mode),
            notes: Set(input.notes),
            status: Set(RequestStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let request = self.request_repo.create(model).await?;

        let when = format!("{date} at {}", time.format("%H:%M"));
        self.notifications
            .notify(
                &AccountRef::counsellor(counsellor.id.clone()),
                format!("New appointment request from {} for {when}.", student.full_name()),
                NotificationType::Appointment,
                Some(&request.id),
            )
            .await?;
        self.notifications
            .notify(
                &AccountRef::student(student.id.clone()),
                format!(
                    "Your appointment request for {when} was sent to {}.",
                    counsellor.full_name()
                ),
                NotificationType::Appointment,
                Some(&request.id),
            )
            .await?;

        info!(request_id = %request.id, student_id = %student.id, "Appointment request created");
        Ok(request)
    }

    /// Pending requests addressed to a counsellor.
    pub async fn pending_for_counsellor(
        &self,
        counsellor_id: &str,
    ) -> AppResult<Vec<appointment_request::Model>> {
        self.request_repo.find_pending_by_counsellor(counsellor_id).await
    }

    /// Pending requests a student has sent.
    pub async fn pending_for_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<appointment_request::Model>> {
        self.request_repo.find_pending_by_student(student_id).await
    }

    /// Approve a pending request: book a one-hour scheduled appointment at
    /// the preferred slot and remove the request.
    pub async fn approve(
        &self,
        counsellor_id: &str,
        request_id: &str,
    ) -> AppResult<appointment::Model> {
        let appointment = self
            .approve_in_txn(counsellor_id, request_id)
            .await
            .map_err(transaction_failed)?;

        info!(
            request_id,
            appointment_id = %appointment.id,
            status = ?RequestStatus::Approved,
            "Appointment request closed"
        );
        Ok(appointment)
    }

    async fn approve_in_txn(
        &self,
        counsellor_id: &str,
        request_id: &str,
    ) -> AppResult<appointment::Model> {
        let txn = self.db.begin().await?;
        let request = self
            .pending_in(&txn, request_id, |r| r.counsellor_id == counsellor_id)
            .await?;

        if self
            .appointment_repo
            .slot_taken_in(
                &txn,
                &request.counsellor_id,
                request.preferred_date,
                request.preferred_time,
                None,
            )
            .await?
        {
            return Err(AppError::Conflict(
                "You already have an appointment at that time".to_string(),
            ));
        }

        let model = appointment::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(request.student_id.clone()),
            counsellor_id: Set(request.counsellor_id.clone()),
            appointment_date: Set(request.preferred_date),
            start_time: Set(request.preferred_time),
            end_time: Set(Some(request.preferred_time + APPOINTMENT_LENGTH)),
            status: Set(AppointmentStatus::Scheduled),
            mode: Set(request.mode),
            meeting_link: Set(None),
            location: Set(None),
            is_free: Set(true),
            fee: Set(0.0),
            payment_status: Set(PaymentStatus::NotRequired),
            created_at: Set(Utc::now().into()),
        };
        let appointment = self.appointment_repo.create_in(&txn, model).await?;

        self.notifications
            .notify_in(
                &txn,
                &AccountRef::student(request.student_id.clone()),
                format!(
                    "Your appointment request for {} at {} was approved.",
                    request.preferred_date,
                    request.preferred_time.format("%H:%M")
                ),
                NotificationType::Appointment,
                Some(&appointment.id),
            )
            .await?;

        self.request_repo.delete_in(&txn, &request.id).await?;
        txn.commit().await?;
        Ok(appointment)
    }

    /// Reject a pending request.
    pub async fn reject(&self, counsellor_id: &str, request_id: &str) -> AppResult<()> {
        self.reject_in_txn(counsellor_id, request_id)
            .await
            .map_err(transaction_failed)?;

        info!(request_id, status = ?RequestStatus::Rejected, "Appointment request closed");
        Ok(())
    }

    async fn reject_in_txn(&self, counsellor_id: &str, request_id: &str) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let request = self
            .pending_in(&txn, request_id, |r| r.counsellor_id == counsellor_id)
            .await?;

        self.notifications
            .notify_in(
                &txn,
                &AccountRef::student(request.student_id.clone()),
                format!(
                    "Your appointment request for {} at {} was declined.",
                    request.preferred_date,
                    request.preferred_time.format("%H:%M")
                ),
                NotificationType::AppointmentRequest,
                Some(&request.id),
            )
            .await?;

        self.request_repo.delete_in(&txn, &request.id).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Withdraw a pending request the student sent.
    pub async fn cancel(&self, student_id: &str, request_id: &str) -> AppResult<()> {
        self.cancel_in_txn(student_id, request_id)
            .await
            .map_err(transaction_failed)?;

        info!(request_id, status = ?RequestStatus::Cancelled, "Appointment request closed");
        Ok(())
    }

    async fn cancel_in_txn(&self, student_id: &str, request_id: &str) -> AppResult<()> {
        let txn = self.db.begin().await?;
        let request = self
            .pending_in(&txn, request_id, |r| r.student_id == student_id)
            .await?;
        let when = format!(
            "{} at {}",
            request.preferred_date,
            request.preferred_time.format("%H:%M")
        );

        self.notifications
            .notify_in(
                &txn,
                &AccountRef::counsellor(request.counsellor_id.clone()),
                format!("An appointment request for {when} was cancelled by the student."),
                NotificationType::Appointment,
                Some(&request.id),
            )
            .await?;
        self.notifications
            .notify_in(
                &txn,
                &AccountRef::student(request.student_id.clone()),
                format!("You cancelled your appointment request for {when}."),
                NotificationType::Appointment,
                Some(&request.id),
            )
            .await?;

        self.request_repo.delete_in(&txn, &request.id).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Load a pending request the caller may act on.
    ///
    /// Requests that are gone, not pending, or belong to someone else are
    /// all reported as not found.
    async fn pending_in(
        &self,
        txn: &DatabaseTransaction,
        request_id: &str,
        owned_by_caller: impl Fn(&appointment_request::Model) -> bool,
    ) -> AppResult<appointment_request::Model> {
        self.request_repo
            .find_pending_in(txn, request_id)
            .await?
            .filter(|r| owned_by_caller(r))
            .ok_or_else(|| AppError::NotFound("Appointment request not found".to_string()))
    }
}
