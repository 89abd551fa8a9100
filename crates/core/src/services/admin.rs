//! Administrator operations: reassignment, events, grievance responses.

use std::sync::Arc;

use chrono::Utc;
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        counsellor_assignment_log,
        event::{self, EventType},
        grievance::{self, GrievanceStatus},
        notification::NotificationType,
        student,
    },
    repositories::{
        CounsellorAssignmentLogRepository, CounsellorRepository, EventRepository,
        GrievanceRepository, StudentRepository,
    },
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{
    account::AccountRef, ensure_not_past, notification::NotificationService, parse_date,
    parse_time, transaction_failed,
};

/// Input for a new event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 8192))]
    pub description: Option<String>,

    pub event_type: EventType,

    /// Hosting counsellor.
    pub counsellor_id: Option<String>,

    /// `YYYY-MM-DD`
    #[validate(length(min = 1))]
    pub event_date: String,

    /// `HH:MM`
    #[validate(length(min = 1))]
    pub start_time: String,

    /// `HH:MM`
    pub end_time: Option<String>,

    #[validate(length(max = 256))]
    pub location: Option<String>,

    #[validate(url)]
    pub meeting_link: Option<String>,

    /// Omit for unlimited.
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,

    #[serde(default = "default_true")]
    pub is_online: bool,
}

const fn default_true() -> bool {
    true
}

/// Input for answering a grievance.
#[derive(Debug, Deserialize, Validate)]
pub struct RespondGrievanceInput {
    pub status: GrievanceStatus,

    #[validate(length(min = 1, max = 8192))]
    pub response: String,
}

/// Administrator service.
#[derive(Clone)]
pub struct AdminService {
    db: Arc<DatabaseConnection>,
    student_repo: StudentRepository,
    counsellor_repo: CounsellorRepository,
    log_repo: CounsellorAssignmentLogRepository,
    event_repo: EventRepository,
    grievance_repo: GrievanceRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl AdminService {
    /// Create a new admin service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        student_repo: StudentRepository,
        counsellor_repo: CounsellorRepository,
        log_repo: CounsellorAssignmentLogRepository,
        event_repo: EventRepository,
        grievance_repo: GrievanceRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db,
            student_repo,
            counsellor_repo,
            log_repo,
            event_repo,
            grievance_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Move one student to another available counsellor and log it.
    pub async fn reassign_student(
        &self,
        admin_id: &str,
        student_id: &str,
        new_counsellor_id: &str,
        reason: Option<String>,
    ) -> AppResult<student::Model> {
        let student = self.student_repo.get_by_id(student_id).await?;
        let counsellor = self.counsellor_repo.get_by_id(new_counsellor_id).await?;

        if !counsellor.is_available {
            return Err(AppError::Conflict(format!(
                "{} is not accepting students",
                counsellor.full_name()
            )));
        }
        if student.counsellor_id.as_deref() == Some(counsellor.id.as_str()) {
            return Err(AppError::Validation(
                "The student is already assigned to that counsellor".to_string(),
            ));
        }

        let log = counsellor_assignment_log::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student.id.clone()),
            old_counsellor_id: Set(student.counsellor_id.clone()),
            new_counsellor_id: Set(counsellor.id.clone()),
            reason: Set(reason),
            assigned_by_id: Set(admin_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        let student_name = student.full_name();
        let counsellor_name = counsellor.full_name();

        let updated = self
            .reassign_in_txn(student, &counsellor.id, log, &student_name, &counsellor_name)
            .await
            .map_err(transaction_failed)?;

        info!(
            student_id = %updated.id,
            counsellor_id = %counsellor.id,
            admin_id,
            "Student reassigned"
        );
        Ok(updated)
    }

    async fn reassign_in_txn(
        &self,
        student: student::Model,
        counsellor_id: &str,
        log: counsellor_assignment_log::ActiveModel,
        student_name: &str,
        counsellor_name: &str,
    ) -> AppResult<student::Model> {
        let txn = self.db.begin().await?;

        let mut active: student::ActiveModel = student.into();
        active.counsellor_id = Set(Some(counsellor_id.to_string()));
        let updated = self.student_repo.update_in(&txn, active).await?;
        self.log_repo.create_in(&txn, log).await?;

        self.notifications
            .notify_in(
                &txn,
                &AccountRef::student(updated.id.clone()),
                format!("Your counsellor is now {counsellor_name}."),
                NotificationType::Assignment,
                Some(counsellor_id),
            )
            .await?;
        self.notifications
            .notify_in(
                &txn,
                &AccountRef::counsellor(counsellor_id),
                format!("{student_name} has been assigned to you."),
                NotificationType::Assignment,
                Some(&updated.id),
            )
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Create an event.
    pub async fn create_event(&self, input: CreateEventInput) -> AppResult<event::Model> {
        input.validate()?;

        let event_date = parse_date(&input.event_date, "event_date")?;
        ensure_not_past(event_date)?;
        let start_time = parse_time(&input.start_time, "start_time")?;
        let end_time = input
            .end_time
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| parse_time(t, "end_time"))
            .transpose()?;
        if end_time.is_some_and(|end| end <= start_time) {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        if let Some(counsellor_id) = &input.counsellor_id {
            self.counsellor_repo.get_by_id(counsellor_id).await?;
        }

        let model = event::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            event_type: Set(input.event_type),
            counsellor_id: Set(input.counsellor_id),
            event_date: Set(event_date),
            start_time: Set(start_time),
            end_time: Set(end_time),
            location: Set(input.location),
            meeting_link: Set(input.meeting_link),
            capacity: Set(input.capacity),
            is_online: Set(input.is_online),
            created_at: Set(Utc::now().into()),
        };

        let event = self.event_repo.create(model).await?;
        info!(event_id = %event.id, date = %event.event_date, "Event created");
        Ok(event)
    }

    /// Every grievance, newest first.
    pub async fn grievances(&self) -> AppResult<Vec<grievance::Model>> {
        self.grievance_repo.find_all().await
    }

    /// Set a grievance's status and response and tell the student.
    pub async fn respond_to_grievance(
        &self,
        grievance_id: &str,
        input: RespondGrievanceInput,
    ) -> AppResult<grievance::Model> {
        input.validate()?;

        let grievance = self
            .grievance_repo
            .find_by_id(grievance_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Grievance not found".to_string()))?;

        let mut active: grievance::ActiveModel = grievance.into();
        active.status = Set(input.status);
        active.response = Set(Some(input.response));
        active.updated_at = Set(Utc::now().into());
        let updated = self.grievance_repo.update(active).await?;

        self.notifications
            .notify(
                &AccountRef::student(updated.student_id.clone()),
                format!("Your grievance \"{}\" has received a response.", updated.subject),
                NotificationType::Grievance,
                Some(&updated.id),
            )
            .await?;

        info!(grievance_id = %updated.id, status = ?updated.status, "Grievance answered");
        Ok(updated)
    }
}
