//! Counsellor repository.

use std::sync::Arc;

use crate::entities::{Counsellor, counsellor};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

/// Counsellor repository for database operations.
#[derive(Clone)]
pub struct CounsellorRepository {
    db: Arc<DatabaseConnection>,
}

impl CounsellorRepository {
    /// Create a new counsellor repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a counsellor by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<counsellor::Model>> {
        self.find_by_id_in(self.db.as_ref(), id).await
    }

    /// Find a counsellor by ID on the given connection.
    pub async fn find_by_id_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<Option<counsellor::Model>> {
        Counsellor::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a counsellor by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<counsellor::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Counsellor {id} not found")))
    }

    /// Find a counsellor by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<counsellor::Model>> {
        Counsellor::find()
            .filter(counsellor::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All counsellors accepting new assignments, in a stable order.
    ///
    /// The order matters for the matcher's tie-breaking.
    pub async fn find_available(&self) -> AppResult<Vec<counsellor::Model>> {
        Counsellor::find()
            .filter(counsellor::Column::IsAvailable.eq(true))
            .order_by_asc(counsellor::Column::CreatedAt)
            .order_by_asc(counsellor::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All counsellors.
    pub async fn find_all(&self) -> AppResult<Vec<counsellor::Model>> {
        Counsellor::find()
            .order_by_asc(counsellor::Column::FirstName)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new counsellor.
    pub async fn create(&self, model: counsellor::ActiveModel) -> AppResult<counsellor::Model> {
        self.create_in(self.db.as_ref(), model).await
    }

    /// Create a new counsellor on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: counsellor::ActiveModel,
    ) -> AppResult<counsellor::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a counsellor.
    pub async fn update(&self, model: counsellor::ActiveModel) -> AppResult<counsellor::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the availability flag. Returns the number of rows changed.
    pub async fn set_available_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        available: bool,
    ) -> AppResult<u64> {
        let result = Counsellor::update_many()
            .col_expr(counsellor::Column::IsAvailable, Expr::value(available))
            .filter(counsellor::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Set the availability flag outside of a transaction.
    pub async fn set_available(&self, id: &str, available: bool) -> AppResult<u64> {
        self.set_available_in(self.db.as_ref(), id, available).await
    }

    /// Stamp the last login time.
    pub async fn touch_last_login(&self, model: counsellor::Model) -> AppResult<counsellor::Model> {
        let mut active: counsellor::ActiveModel = model.into();
        active.last_login_at = Set(Some(chrono::Utc::now().into()));
        self.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_counsellor(id: &str, specialization: &str, rating: f64) -> counsellor::Model {
        counsellor::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: Some("Counsellor".to_string()),
            specialization: Some(specialization.to_string()),
            qualification: None,
            years_of_experience: Some(5),
            bio: None,
            is_available: true,
            rating: Some(rating),
            created_at: Utc::now().into(),
            last_login_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let c = create_test_counsellor("c1", "Business & Finance", 4.9);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[c.clone()]])
                .into_connection(),
        );

        let repo = CounsellorRepository::new(db);
        let result = repo.find_by_id("c1").await.unwrap();

        assert_eq!(result.unwrap().specialization.as_deref(), Some("Business & Finance"));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<counsellor::Model>::new()])
                .into_connection(),
        );

        let repo = CounsellorRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_available() {
        let a = create_test_counsellor("c1", "Technology & Engineering", 4.5);
        let b = create_test_counsellor("c2", "Business & Finance", 4.9);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[a, b]])
                .into_connection(),
        );

        let repo = CounsellorRepository::new(db);
        let result = repo.find_available().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "c1");
    }

    #[tokio::test]
    async fn test_set_available() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CounsellorRepository::new(db);
        let changed = repo.set_available("c1", false).await.unwrap();

        assert_eq!(changed, 1);
    }
}
