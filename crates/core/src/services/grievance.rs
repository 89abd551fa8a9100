//! Student grievances.

use chrono::Utc;
use counselhub_common::{AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        grievance::{self, GrievanceStatus},
        notification::NotificationType,
    },
    repositories::GrievanceRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{account::AccountRef, notification::NotificationService};

/// Input for a new grievance.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitGrievanceInput {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 8192))]
    pub description: String,
}

/// Grievance service for business logic.
#[derive(Clone)]
pub struct GrievanceService {
    grievance_repo: GrievanceRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl GrievanceService {
    /// Create a new grievance service.
    #[must_use]
    pub const fn new(grievance_repo: GrievanceRepository, notifications: NotificationService) -> Self {
        Self {
            grievance_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// File a grievance.
    pub async fn submit(
        &self,
        student_id: &str,
        input: SubmitGrievanceInput,
    ) -> AppResult<grievance::Model> {
        input.validate()?;

        let now = Utc::now();
        let model = grievance::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student_id.to_string()),
            subject: Set(input.subject.trim().to_string()),
            description: Set(input.description),
            status: Set(GrievanceStatus::Pending),
            response: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let grievance = self.grievance_repo.create(model).await?;

        self.notifications
            .notify(
                &AccountRef::student(student_id),
                format!("Your grievance \"{}\" was submitted.", grievance.subject),
                NotificationType::Grievance,
                Some(&grievance.id),
            )
            .await?;

        info!(grievance_id = %grievance.id, student_id, "Grievance submitted");
        Ok(grievance)
    }

    /// The student's grievances, newest first.
    pub async fn list(&self, student_id: &str) -> AppResult<Vec<grievance::Model>> {
        self.grievance_repo.find_by_student(student_id).await
    }
}
