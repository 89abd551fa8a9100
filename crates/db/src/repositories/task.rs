//! Task repository.

use std::sync::Arc;

use crate::entities::{
    Task, task,
    task::{TaskCategory, TaskPriority, TaskStatus},
};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Optional filters for listing tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Only tasks in this category.
    pub category: Option<TaskCategory>,
}

/// Task repository for database operations.
#[derive(Clone)]
pub struct TaskRepository {
    db: Arc<DatabaseConnection>,
}

impl TaskRepository {
    /// Create a new task repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a task by ID, scoped to its owner.
    pub async fn find_for_student(
        &self,
        id: &str,
        student_id: &str,
    ) -> AppResult<Option<task::Model>> {
        Task::find_by_id(id)
            .filter(task::Column::StudentId.eq(student_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Tasks of a student matching the filter, by due date.
    pub async fn find_by_student(
        &self,
        student_id: &str,
        filter: TaskFilter,
    ) -> AppResult<Vec<task::Model>> {
        let mut query = Task::find().filter(task::Column::StudentId.eq(student_id));

        if let Some(status) = filter.status {
            query = query.filter(task::Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(task::Column::Priority.eq(priority));
        }
        if let Some(category) = filter.category {
            query = query.filter(task::Column::Category.eq(category));
        }

        query
            .order_by_asc(task::Column::DueDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a task.
    pub async fn create(&self, model: task::ActiveModel) -> AppResult<task::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a task.
    pub async fn update(&self, model: task::ActiveModel) -> AppResult<task::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a task.
    pub async fn delete(&self, task: task::Model) -> AppResult<()> {
        task.delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
