//! Career goals and their milestones.

use chrono::Utc;
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::{
        career_goal::{self, GoalStatus},
        goal_milestone::{self, MilestoneStatus},
    },
    repositories::CareerGoalRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use super::{parse_date, today};

/// Input for a new goal.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    /// `YYYY-MM-DD`; defaults to today.
    pub start_date: Option<String>,

    /// `YYYY-MM-DD`
    pub target_date: Option<String>,
}

/// Changes to a goal. Absent fields stay as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGoalInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    pub status: Option<GoalStatus>,

    /// `YYYY-MM-DD`
    pub target_date: Option<String>,
}

/// Input for a new milestone.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMilestoneInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// `YYYY-MM-DD`
    pub due_date: Option<String>,
}

/// A goal with its milestones.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GoalWithMilestones {
    #[serde(flatten)]
    pub goal: career_goal::Model,
    pub milestones: Vec<goal_milestone::Model>,
}

fn optional_date(raw: Option<&str>, field: &str) -> AppResult<Option<chrono::NaiveDate>> {
    raw.filter(|d| !d.trim().is_empty())
        .map(|d| parse_date(d, field))
        .transpose()
}

/// Goal service for business logic.
#[derive(Clone)]
pub struct GoalService {
    goal_repo: CareerGoalRepository,
    id_gen: IdGenerator,
}

impl GoalService {
    /// Create a new goal service.
    #[must_use]
    pub const fn new(goal_repo: CareerGoalRepository) -> Self {
        Self {
            goal_repo,
            id_gen: IdGenerator::new(),
        }
    }

    async fn owned_goal(&self, student_id: &str, goal_id: &str) -> AppResult<career_goal::Model> {
        self.goal_repo
            .find_for_student(goal_id, student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Goal not found".to_string()))
    }

    /// Create a goal.
    pub async fn create(
        &self,
        student_id: &str,
        input: CreateGoalInput,
    ) -> AppResult<career_goal::Model> {
        input.validate()?;

        let start_date = optional_date(input.start_date.as_deref(), "start_date")?.unwrap_or_else(today);
        let target_date = optional_date(input.target_date.as_deref(), "target_date")?;
        if target_date.is_some_and(|t| t < start_date) {
            return Err(AppError::Validation(
                "target_date cannot be before start_date".to_string(),
            ));
        }

        let model = career_goal::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student_id.to_string()),
            title: Set(input.title),
            description: Set(input.description),
            start_date: Set(start_date),
            target_date: Set(target_date),
            status: Set(GoalStatus::NotStarted),
            created_at: Set(Utc::now().into()),
        };
        self.goal_repo.create(model).await
    }

    /// Update a goal.
    pub async fn update(
        &self,
        student_id: &str,
        goal_id: &str,
        input: UpdateGoalInput,
    ) -> AppResult<career_goal::Model> {
        input.validate()?;

        let goal = self.owned_goal(student_id, goal_id).await?;
        let target_date = optional_date(input.target_date.as_deref(), "target_date")?;

        let mut active: career_goal::ActiveModel = goal.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(target) = target_date {
            active.target_date = Set(Some(target));
        }

        self.goal_repo.update(active).await
    }

    /// Delete a goal and its milestones.
    pub async fn delete(&self, student_id: &str, goal_id: &str) -> AppResult<()> {
        let goal = self.owned_goal(student_id, goal_id).await?;
        self.goal_repo.delete_with_milestones(goal).await
    }

    /// The student's goals with milestones, newest first.
    pub async fn list(&self, student_id: &str) -> AppResult<Vec<GoalWithMilestones>> {
        let goals = self.goal_repo.find_by_student(student_id).await?;

        let mut result = Vec::with_capacity(goals.len());
        for goal in goals {
            let milestones = self.goal_repo.find_milestones(&goal.id).await?;
            result.push(GoalWithMilestones { goal, milestones });
        }
        Ok(result)
    }

    /// Add a milestone to one of the student's goals.
    pub async fn add_milestone(
        &self,
        student_id: &str,
        goal_id: &str,
        input: CreateMilestoneInput,
    ) -> AppResult<goal_milestone::Model> {
        input.validate()?;

        let goal = self.owned_goal(student_id, goal_id).await?;
        let due_date = optional_date(input.due_date.as_deref(), "due_date")?;

        let model = goal_milestone::ActiveModel {
            id: Set(self.id_gen.generate()),
            goal_id: Set(goal.id),
            title: Set(input.title),
            due_date: Set(due_date),
            status: Set(MilestoneStatus::Pending),
            created_at: Set(Utc::now().into()),
        };
        self.goal_repo.create_milestone(model).await
    }

    /// Set a milestone's status.
    pub async fn set_milestone_status(
        &self,
        student_id: &str,
        goal_id: &str,
        milestone_id: &str,
        status: MilestoneStatus,
    ) -> AppResult<goal_milestone::Model> {
        let milestone = self.owned_milestone(student_id, goal_id, milestone_id).await?;

        let mut active: goal_milestone::ActiveModel = milestone.into();
        active.status = Set(status);
        self.goal_repo.update_milestone(active).await
    }

    /// Delete a milestone.
    pub async fn delete_milestone(
        &self,
        student_id: &str,
        goal_id: &str,
        milestone_id: &str,
    ) -> AppResult<()> {
        let milestone = self.owned_milestone(student_id, goal_id, milestone_id).await?;
        self.goal_repo.delete_milestone(milestone).await
    }

    async fn owned_milestone(
        &self,
        student_id: &str,
        goal_id: &str,
        milestone_id: &str,
    ) -> AppResult<goal_milestone::Model> {
        let goal = self.owned_goal(student_id, goal_id).await?;
        self.goal_repo
            .find_milestone(milestone_id, &goal.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Milestone not found".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_target_before_start_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = GoalService::new(CareerGoalRepository::new(Arc::new(db)));

        let result = service
            .create(
                "s1",
                CreateGoalInput {
                    title: "Land an internship".to_string(),
                    description: None,
                    start_date: Some("2030-06-01".to_string()),
                    target_date: Some("2030-01-01".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_milestone_of_foreign_goal_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<career_goal::Model>::new()])
            .into_connection();
        let service = GoalService::new(CareerGoalRepository::new(Arc::new(db)));

        let result = service.delete_milestone("s2", "g1", "m1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_blank_date_is_none() {
        assert_eq!(optional_date(Some("  "), "due_date").unwrap(), None);
        assert!(optional_date(Some("01/02/2030"), "due_date").is_err());
    }
}
