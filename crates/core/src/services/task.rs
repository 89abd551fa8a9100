//! Student to-do tasks.

use chrono::{Days, NaiveDate, Utc};
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::task::{self, TaskCategory, TaskPriority, TaskStatus},
    repositories::{TaskFilter, TaskRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{parse_date, today};

/// Tasks due within this many days count as due soon.
const DUE_SOON_DAYS: u64 = 3;

/// Sort order for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    #[default]
    DueDate,
    Priority,
    CreatedAt,
}

/// Input for a new task.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    /// `YYYY-MM-DD`
    #[validate(length(min = 1))]
    pub due_date: String,

    pub priority: TaskPriority,

    pub category: TaskCategory,
}

/// Changes to a task. Absent fields stay as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    /// `YYYY-MM-DD`
    pub due_date: Option<String>,

    pub priority: Option<TaskPriority>,
    pub category: Option<TaskCategory>,
    pub status: Option<TaskStatus>,
}

/// Counts shown on the task overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// Pending tasks due between today and three days from now.
    pub due_soon: usize,
}

impl TaskStats {
    /// Tally `tasks` as of `today`.
    #[must_use]
    pub fn tally(tasks: &[task::Model], today: NaiveDate) -> Self {
        let horizon = today + Days::new(DUE_SOON_DAYS);
        tasks.iter().fold(Self::default(), |mut stats, t| {
            stats.total += 1;
            match t.status {
                TaskStatus::Pending => {
                    stats.pending += 1;
                    if (today..=horizon).contains(&t.due_date) {
                        stats.due_soon += 1;
                    }
                }
                TaskStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }
}

/// Order `tasks` in place.
pub fn sort_tasks(tasks: &mut [task::Model], sort: TaskSort) {
    match sort {
        TaskSort::DueDate => tasks.sort_by_key(|t| t.due_date),
        TaskSort::Priority => tasks.sort_by_key(|t| (t.priority.rank(), t.due_date)),
        TaskSort::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Task service for business logic.
#[derive(Clone)]
pub struct TaskService {
    task_repo: TaskRepository,
    id_gen: IdGenerator,
}

impl TaskService {
    /// Create a new task service.
    #[must_use]
    pub const fn new(task_repo: TaskRepository) -> Self {
        Self {
            task_repo,
            id_gen: IdGenerator::new(),
        }
    }

    async fn owned(&self, student_id: &str, task_id: &str) -> AppResult<task::Model> {
        self.task_repo
            .find_for_student(task_id, student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
    }

    /// Create a task.
    pub async fn create(&self, student_id: &str, input: CreateTaskInput) -> AppResult<task::Model> {
        input.validate()?;

        let due_date = parse_date(&input.due_date, "due_date")?;
        let now = Utc::now();
        let model = task::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student_id.to_string()),
            title: Set(input.title),
            description: Set(input.description),
            due_date: Set(due_date),
            priority: Set(input.priority),
            category: Set(input.category),
            status: Set(TaskStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        self.task_repo.create(model).await
    }

    /// Update a task.
    pub async fn update(
        &self,
        student_id: &str,
        task_id: &str,
        input: UpdateTaskInput,
    ) -> AppResult<task::Model> {
        input.validate()?;

        let task = self.owned(student_id, task_id).await?;
        let due_date = input
            .due_date
            .as_deref()
            .map(|d| parse_date(d, "due_date"))
            .transpose()?;

        let mut active: task::ActiveModel = task.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(due) = due_date {
            active.due_date = Set(due);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());

        self.task_repo.update(active).await
    }

    /// Delete a task.
    pub async fn delete(&self, student_id: &str, task_id: &str) -> AppResult<()> {
        let task = self.owned(student_id, task_id).await?;
        self.task_repo.delete(task).await
    }

    /// The student's tasks, filtered and sorted.
    pub async fn list(
        &self,
        student_id: &str,
        filter: TaskFilter,
        sort: TaskSort,
    ) -> AppResult<Vec<task::Model>> {
        let mut tasks = self.task_repo.find_by_student(student_id, filter).await?;
        sort_tasks(&mut tasks, sort);
        Ok(tasks)
    }

    /// Totals over all of the student's tasks.
    pub async fn stats(&self, student_id: &str) -> AppResult<TaskStats> {
        let tasks = self
            .task_repo
            .find_by_student(student_id, TaskFilter::default())
            .await?;
        Ok(TaskStats::tally(&tasks, today()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task(id: &str, due: NaiveDate, priority: TaskPriority, status: TaskStatus) -> task::Model {
        task::Model {
            id: id.to_string(),
            student_id: "s1".to_string(),
            title: id.to_string(),
            description: None,
            due_date: due,
            priority,
            category: TaskCategory::Career,
            status,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, d).unwrap()
    }

    #[test]
    fn test_stats_due_soon_window() {
        let today = day(10);
        let tasks = vec![
            task("overdue", day(9), TaskPriority::Low, TaskStatus::Pending),
            task("today", day(10), TaskPriority::Low, TaskStatus::Pending),
            task("edge", day(13), TaskPriority::Low, TaskStatus::Pending),
            task("later", day(14), TaskPriority::Low, TaskStatus::Pending),
            task("done", day(11), TaskPriority::Low, TaskStatus::Completed),
        ];

        let stats = TaskStats::tally(&tasks, today);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.due_soon, 2);
    }

    #[test]
    fn test_sort_by_priority_then_due() {
        let mut tasks = vec![
            task("low", day(1), TaskPriority::Low, TaskStatus::Pending),
            task("high-late", day(20), TaskPriority::High, TaskStatus::Pending),
            task("high-early", day(5), TaskPriority::High, TaskStatus::Pending),
            task("medium", day(2), TaskPriority::Medium, TaskStatus::Pending),
        ];

        sort_tasks(&mut tasks, TaskSort::Priority);
        let order: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, ["high-early", "high-late", "medium", "low"]);
    }

    #[test]
    fn test_sort_by_created_newest_first() {
        let mut older = task("older", day(1), TaskPriority::Low, TaskStatus::Pending);
        older.created_at = (Utc::now() - Duration::days(2)).into();
        let newer = task("newer", day(1), TaskPriority::Low, TaskStatus::Pending);

        let mut tasks = vec![older, newer];
        sort_tasks(&mut tasks, TaskSort::CreatedAt);
        assert_eq!(tasks[0].id, "newer");
    }
}
