//! Student repository.

use std::sync::Arc;

use crate::entities::{Student, student};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

/// Student repository for database operations.
#[derive(Clone)]
pub struct StudentRepository {
    db: Arc<DatabaseConnection>,
}

impl StudentRepository {
    /// Create a new student repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a student by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<student::Model>> {
        self.find_by_id_in(self.db.as_ref(), id).await
    }

    /// Find a student by ID on the given connection.
    pub async fn find_by_id_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<Option<student::Model>> {
        Student::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a student by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<student::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student {id} not found")))
    }

    /// Find a student by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<student::Model>> {
        Student::find()
            .filter(student::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Students currently assigned to a counsellor.
    pub async fn find_by_counsellor_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        counsellor_id: &str,
    ) -> AppResult<Vec<student::Model>> {
        Student::find()
            .filter(student::Column::CounsellorId.eq(counsellor_id))
            .order_by_asc(student::Column::Id)
            .all(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Students currently assigned to a counsellor.
    pub async fn find_by_counsellor(&self, counsellor_id: &str) -> AppResult<Vec<student::Model>> {
        self.find_by_counsellor_in(self.db.as_ref(), counsellor_id)
            .await
    }

    /// Create a new student.
    pub async fn create(&self, model: student::ActiveModel) -> AppResult<student::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a student.
    pub async fn update(&self, model: student::ActiveModel) -> AppResult<student::Model> {
        self.update_in(self.db.as_ref(), model).await
    }

    /// Update a student on the given connection.
    pub async fn update_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: student::ActiveModel,
    ) -> AppResult<student::Model> {
        model
            .update(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the active flag. Returns the number of rows changed.
    pub async fn set_active_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        active: bool,
    ) -> AppResult<u64> {
        let result = Student::update_many()
            .col_expr(student::Column::IsActive, Expr::value(active))
            .filter(student::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Set the active flag outside of a transaction.
    pub async fn set_active(&self, id: &str, active: bool) -> AppResult<u64> {
        self.set_active_in(self.db.as_ref(), id, active).await
    }

    /// Move every student of `from` to `to`. Returns the number moved.
    pub async fn reassign_counsellor_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        from: &str,
        to: &str,
    ) -> AppResult<u64> {
        let result = Student::update_many()
            .col_expr(student::Column::CounsellorId, Expr::value(to))
            .filter(student::Column::CounsellorId.eq(from))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Stamp the last login time.
    pub async fn touch_last_login(&self, model: student::Model) -> AppResult<student::Model> {
        let mut active: student::ActiveModel = model.into();
        active.last_login_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }
}
