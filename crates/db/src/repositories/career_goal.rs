//! Career goal and milestone repository.

use std::sync::Arc;

use crate::entities::{CareerGoal, GoalMilestone, career_goal, goal_milestone};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

/// Career goal repository for database operations.
#[derive(Clone)]
pub struct CareerGoalRepository {
    db: Arc<DatabaseConnection>,
}

impl CareerGoalRepository {
    /// Create a new career goal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a goal by ID, scoped to its owner.
    pub async fn find_for_student(
        &self,
        id: &str,
        student_id: &str,
    ) -> AppResult<Option<career_goal::Model>> {
        CareerGoal::find_by_id(id)
            .filter(career_goal::Column::StudentId.eq(student_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Goals of a student, newest first.
    pub async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<career_goal::Model>> {
        CareerGoal::find()
            .filter(career_goal::Column::StudentId.eq(student_id))
            .order_by_desc(career_goal::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a goal.
    pub async fn create(&self, model: career_goal::ActiveModel) -> AppResult<career_goal::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a goal.
    pub async fn update(&self, model: career_goal::ActiveModel) -> AppResult<career_goal::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a goal together with its milestones.
    pub async fn delete_with_milestones(&self, goal: career_goal::Model) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        GoalMilestone::delete_many()
            .filter(goal_milestone::Column::GoalId.eq(goal.id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        goal.delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Milestones of a goal, by due date.
    pub async fn find_milestones(&self, goal_id: &str) -> AppResult<Vec<goal_milestone::Model>> {
        GoalMilestone::find()
            .filter(goal_milestone::Column::GoalId.eq(goal_id))
            .order_by_asc(goal_milestone::Column::DueDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a milestone by ID within a goal.
    pub async fn find_milestone(
        &self,
        id: &str,
        goal_id: &str,
    ) -> AppResult<Option<goal_milestone::Model>> {
        GoalMilestone::find_by_id(id)
            .filter(goal_milestone::Column::GoalId.eq(goal_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a milestone.
    pub async fn create_milestone(
        &self,
        model: goal_milestone::ActiveModel,
    ) -> AppResult<goal_milestone::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a milestone.
    pub async fn update_milestone(
        &self,
        model: goal_milestone::ActiveModel,
    ) -> AppResult<goal_milestone::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a milestone.
    pub async fn delete_milestone(&self, milestone: goal_milestone::Model) -> AppResult<()> {
        milestone
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
