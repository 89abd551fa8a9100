//! Notification repository.

use std::sync::Arc;

use crate::entities::{Notification, notification, notification::RecipientKind};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// Notification repository for database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<notification::Model>> {
        Notification::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        self.create_in(self.db.as_ref(), model).await
    }

    /// Create a new notification on the given connection.
    pub async fn create_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: notification::ActiveModel,
    ) -> AppResult<notification::Model> {
        model
            .insert(conn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Notifications for a recipient, newest first.
    pub async fn find_by_recipient(
        &self,
        kind: RecipientKind,
        recipient_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<notification::Model>> {
        Notification::find()
            .filter(notification::Column::RecipientKind.eq(kind))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Total notifications for a recipient.
    pub async fn count_for_recipient(
        &self,
        kind: RecipientKind,
        recipient_id: &str,
    ) -> AppResult<u64> {
        Notification::find()
            .filter(notification::Column::RecipientKind.eq(kind))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark one notification as read, only if it belongs to the recipient.
    ///
    /// Returns `false` when no such notification exists for the recipient.
    pub async fn mark_as_read(
        &self,
        id: &str,
        kind: RecipientKind,
        recipient_id: &str,
    ) -> AppResult<bool> {
        let notification = Notification::find_by_id(id)
            .filter(notification::Column::RecipientKind.eq(kind))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let Some(n) = notification else {
            return Ok(false);
        };

        if !n.is_read {
            let mut active: notification::ActiveModel = n.into();
            active.is_read = Set(true);
            active
                .update(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(true)
    }

    /// Mark all notifications as read for a recipient.
    pub async fn mark_all_as_read(&self, kind: RecipientKind, recipient_id: &str) -> AppResult<u64> {
        use sea_orm::UpdateResult;

        let result: UpdateResult = Notification::update_many()
            .filter(notification::Column::RecipientKind.eq(kind))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .col_expr(notification::Column::IsRead, true.into())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Count unread notifications for a recipient.
    pub async fn count_unread(&self, kind: RecipientKind, recipient_id: &str) -> AppResult<u64> {
        Notification::find()
            .filter(notification::Column::RecipientKind.eq(kind))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::notification::NotificationType;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    fn create_test_notification(id: &str, is_read: bool) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            recipient_kind: RecipientKind::Student,
            recipient_id: "s1".to_string(),
            message: "Your appointment has been confirmed.".to_string(),
            notification_type: NotificationType::Appointment,
            related_entity_id: Some("a1".to_string()),
            is_read,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_recipient() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_notification("n2", false),
                    create_test_notification("n1", true),
                ]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo
            .find_by_recipient(RecipientKind::Student, "s1", 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "n2");
    }

    #[tokio::test]
    async fn test_mark_as_read_wrong_recipient() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let found = repo
            .mark_as_read("n1", RecipientKind::Counsellor, "c1")
            .await
            .unwrap();

        assert!(!found);
    }

    #[tokio::test]
    async fn test_mark_all_as_read() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 4,
                }])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo
            .mark_all_as_read(RecipientKind::Student, "s1")
            .await
            .unwrap();

        assert_eq!(result, 4);
    }

    #[tokio::test]
    async fn test_count_unread() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[BTreeMap::from([(
                    "num_items",
                    sea_orm::Value::BigInt(Some(3)),
                )])]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo.count_unread(RecipientKind::Student, "s1").await.unwrap();

        assert_eq!(result, 3);
    }
}
