//! Appointment request repository.

use std::sync::Arc;

use crate::entities::{AppointmentRequest, appointment_request, appointment_request::RequestStatus};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

/// Appointment request repository for database operations.
#[derive(Clone)]
pub struct AppointmentRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl AppointmentRequestRepository {
    /// Create a new appointment request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<appointment_request::Model>> {
        AppointmentRequest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a pending request by ID on the given connection.
    pub async fn find_pending_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
    ) -> AppResult<Option<appointment_request::Model>> {
        AppointmentRequest::find_by_id(id)
            .filter(appointment_request::Column::Status.eq(RequestStatus::Pending))
            .one(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new request.
    pub async fn create(
        &self,
        model: appointment_request::ActiveModel,
    ) -> AppResult<appointment_request::Model> {
        self.create_in(self.db.as_ref(), model).await
    }

    /// Create a new request on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: appointment_request::ActiveModel,
    ) -> AppResult<appointment_request::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a request on the given connection.
    pub async fn delete_in<C: ConnectionTrait>(&self, conn: &C, id: &str) -> AppResult<u64> {
        let result = AppointmentRequest::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Pending requests addressed to a counsellor, oldest first.
    pub async fn find_pending_by_counsellor(
        &self,
        counsellor_id: &str,
    ) -> AppResult<Vec<appointment_request::Model>> {
        AppointmentRequest::find()
            .filter(appointment_request::Column::CounsellorId.eq(counsellor_id))
            .filter(appointment_request::Column::Status.eq(RequestStatus::Pending))
            .order_by_asc(appointment_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Pending requests made by a student, newest first.
    pub async fn find_pending_by_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<appointment_request::Model>> {
        AppointmentRequest::find()
            .filter(appointment_request::Column::StudentId.eq(student_id))
            .filter(appointment_request::Column::Status.eq(RequestStatus::Pending))
            .order_by_desc(appointment_request::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Move every pending request of `from` to `to`. Returns the number moved.
    pub async fn reassign_pending_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        from: &str,
        to: &str,
    ) -> AppResult<u64> {
        let result = AppointmentRequest::update_many()
            .col_expr(appointment_request::Column::CounsellorId, Expr::value(to))
            .col_expr(
                appointment_request::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().fixed_offset()),
            )
            .filter(appointment_request::Column::CounsellorId.eq(from))
            .filter(appointment_request::Column::Status.eq(RequestStatus::Pending))
            .exec(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::appointment::AppointmentMode;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_request(id: &str) -> appointment_request::Model {
        appointment_request::Model {
            id: id.to_string(),
            student_id: "s1".to_string(),
            counsellor_id: "c1".to_string(),
            appointment_type: "Career guidance".to_string(),
            preferred_date: NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
            preferred_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            mode: AppointmentMode::Online,
            notes: None,
            status: RequestStatus::Pending,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_pending_by_counsellor() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_request("r1"), create_test_request("r2")]])
                .into_connection(),
        );

        let repo = AppointmentRequestRepository::new(db);
        let result = repo.find_pending_by_counsellor("c1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.status == RequestStatus::Pending));
    }

    #[tokio::test]
    async fn test_delete_in() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = AppointmentRequestRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        ));

        assert_eq!(repo.delete_in(&db, "r1").await.unwrap(), 1);
    }
}
