//! Student and counsellor deactivation cascades.
//!
//! Deactivating a student removes everything that depends on the student and
//! clears the active flag. Deactivating a counsellor hands students,
//! upcoming appointments and pending requests to a replacement. Both run in
//! one transaction; reactivation only flips the flag back.

use std::sync::Arc;

use chrono::Utc;
use counselhub_common::{AppError, AppResult};
use counselhub_db::{
    cleanup::{CleanupReport, run_student_cleanup},
    entities::{appointment, counsellor, notification::NotificationType},
    repositories::{
        AppointmentRepository, AppointmentRequestRepository, CounsellorRepository,
        StudentRepository,
    },
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Serialize;
use tracing::info;

use super::{account::AccountRef, notification::NotificationService, transaction_failed};

/// What a counsellor deactivation moved to the replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounsellorDeactivation {
    pub students_reassigned: u64,
    pub appointments_reassigned: u64,
    pub requests_reassigned: u64,
}

/// Runs the deactivation cascades.
#[derive(Clone)]
pub struct DeactivationService {
    db: Arc<DatabaseConnection>,
    student_repo: StudentRepository,
    counsellor_repo: CounsellorRepository,
    appointment_repo: AppointmentRepository,
    request_repo: AppointmentRequestRepository,
    notifications: NotificationService,
}

impl DeactivationService {
    /// Create a new deactivation service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        student_repo: StudentRepository,
        counsellor_repo: CounsellorRepository,
        appointment_repo: AppointmentRepository,
        request_repo: AppointmentRequestRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db,
            student_repo,
            counsellor_repo,
            appointment_repo,
            request_repo,
            notifications,
        }
    }

    /// Remove every record that depends on the student, then clear the
    /// active flag. On failure nothing changes.
    pub async fn deactivate_student(&self, student_id: &str) -> AppResult<CleanupReport> {
        let student = self.student_repo.get_by_id(student_id).await?;

        let report = self
            .student_cascade(&student.id)
            .await
            .map_err(transaction_failed)?;

        info!(
            student_id = %student.id,
            rows_removed = report.total(),
            "Student deactivated"
        );
        Ok(report)
    }

    async fn student_cascade(&self, student_id: &str) -> AppResult<CleanupReport> {
        let txn = self.db.begin().await?;

        let report = run_student_cleanup(&txn, student_id).await?;
        self.student_repo.set_active_in(&txn, student_id, false).await?;

        txn.commit().await?;
        Ok(report)
    }

    /// Set the student's active flag again.
    pub async fn activate_student(&self, student_id: &str) -> AppResult<()> {
        let student = self.student_repo.get_by_id(student_id).await?;
        self.student_repo.set_active(&student.id, true).await?;
        info!(student_id = %student.id, "Student activated");
        Ok(())
    }

    /// Flip the student's active flag. Returns the new state.
    pub async fn toggle_student(&self, student_id: &str) -> AppResult<bool> {
        let student = self.student_repo.get_by_id(student_id).await?;
        if student.is_active {
            self.deactivate_student(&student.id).await?;
            Ok(false)
        } else {
            self.activate_student(&student.id).await?;
            Ok(true)
        }
    }

    /// Mark the counsellor unavailable and move their work to `replacement_id`.
    ///
    /// The replacement is checked before anything is written: it must be
    /// given, differ from the counsellor, exist, and be available.
    pub async fn deactivate_counsellor(
        &self,
        counsellor_id: &str,
        replacement_id: &str,
    ) -> AppResult<CounsellorDeactivation> {
        let replacement_id = replacement_id.trim();
        if replacement_id.is_empty() {
            return Err(AppError::Validation(
                "A replacement counsellor is required".to_string(),
            ));
        }
        if replacement_id == counsellor_id {
            return Err(AppError::Validation(
                "A counsellor cannot replace themselves".to_string(),
            ));
        }

        let old = self.counsellor_repo.get_by_id(counsellor_id).await?;
        let replacement = self
            .counsellor_repo
            .find_by_id(replacement_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Replacement counsellor {replacement_id} not found"))
            })?;
        if !replacement.is_available {
            return Err(AppError::Conflict(format!(
                "{} is not available to take over",
                replacement.full_name()
            )));
        }

        let summary = self
            .counsellor_cascade(&old, &replacement)
            .await
            .map_err(transaction_failed)?;

        info!(
            counsellor_id = %old.id,
            replacement_id = %replacement.id,
            students = summary.students_reassigned,
            appointments = summary.appointments_reassigned,
            requests = summary.requests_reassigned,
            "Counsellor deactivated"
        );
        Ok(summary)
    }

    async fn counsellor_cascade(
        &self,
        old: &counsellor::Model,
        replacement: &counsellor::Model,
    ) -> AppResult<CounsellorDeactivation> {
        let txn = self.db.begin().await?;

        self.counsellor_repo
            .set_available_in(&txn, &old.id, false)
            .await?;

        let students = self
            .student_repo
            .find_by_counsellor_in(&txn, &old.id)
            .await?;
        let students_reassigned = self
            .student_repo
            .reassign_counsellor_in(&txn, &old.id, &replacement.id)
            .await?;

        let today = Utc::now().date_naive();
        let appointments = self
            .appointment_repo
            .find_future_scheduled_for_counsellor_in(&txn, &old.id, today)
            .await?;
        for appt in &appointments {
            let mut active: appointment::ActiveModel = appt.clone().into();
            active.counsellor_id = Set(replacement.id.clone());
            self.appointment_repo.update_in(&txn, active).await?;

            self.notifications
                .notify_in(
                    &txn,
                    &AccountRef::student(appt.student_id.clone()),
                    format!(
                        "Your appointment on {} at {} is now with {}.",
                        appt.appointment_date,
                        appt.start_time.format("%H:%M"),
                        replacement.full_name()
                    ),
                    NotificationType::Appointment,
                    Some(&appt.id),
                )
                .await?;
        }

        let requests_reassigned = self
            .request_repo
            .reassign_pending_in(&txn, &old.id, &replacement.id)
            .await?;

        let summary = CounsellorDeactivation {
            students_reassigned,
            appointments_reassigned: appointments.len() as u64,
            requests_reassigned,
        };

        self.notifications
            .notify_in(
                &txn,
                &AccountRef::counsellor(replacement.id.clone()),
                format!(
                    "You have taken over from {}: {} students, {} upcoming appointments and {} pending requests.",
                    old.full_name(),
                    summary.students_reassigned,
                    summary.appointments_reassigned,
                    summary.requests_reassigned
                ),
                NotificationType::Assignment,
                Some(&old.id),
            )
            .await?;

        for student in &students {
            self.notifications
                .notify_in(
                    &txn,
                    &AccountRef::student(student.id.clone()),
                    format!(
                        "Your counsellor is now {}.",
                        replacement.full_name()
                    ),
                    NotificationType::Assignment,
                    Some(&replacement.id),
                )
                .await?;
        }

        txn.commit().await?;
        Ok(summary)
    }

    /// Make the counsellor available again. Nothing is handed back.
    pub async fn activate_counsellor(&self, counsellor_id: &str) -> AppResult<()> {
        let counsellor = self.counsellor_repo.get_by_id(counsellor_id).await?;
        self.counsellor_repo.set_available(&counsellor.id, true).await?;
        info!(counsellor_id = %counsellor.id, "Counsellor activated");
        Ok(())
    }
}
