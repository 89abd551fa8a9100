//! Notification service.

use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::notification::{self, NotificationType},
    repositories::NotificationRepository,
};
use sea_orm::{ConnectionTrait, Set};
use serde::Serialize;

use super::account::AccountRef;

/// Default number of notifications in the recent list.
pub const RECENT_LIMIT: u64 = 10;
/// Page size of the paginated list.
pub const PAGE_SIZE: u64 = 20;

/// One page of notifications.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPage {
    pub items: Vec<notification::Model>,
    /// 1-based page number.
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    fn build(
        &self,
        recipient: &AccountRef,
        message: String,
        notification_type: NotificationType,
        related_entity_id: Option<&str>,
    ) -> notification::ActiveModel {
        notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            recipient_kind: Set(recipient.kind.into()),
            recipient_id: Set(recipient.id.clone()),
            message: Set(message),
            notification_type: Set(notification_type),
            related_entity_id: Set(related_entity_id.map(str::to_string)),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        }
    }

    /// Create a notification.
    pub async fn notify(
        &self,
        recipient: &AccountRef,
        message: impl Into<String>,
        notification_type: NotificationType,
        related_entity_id: Option<&str>,
    ) -> AppResult<notification::Model> {
        let model = self.build(recipient, message.into(), notification_type, related_entity_id);
        self.notification_repo.create(model).await
    }

    /// Create a notification on the given connection, usually a transaction.
    pub async fn notify_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        recipient: &AccountRef,
        message: impl Into<String>,
        notification_type: NotificationType,
        related_entity_id: Option<&str>,
    ) -> AppResult<notification::Model> {
        let model = self.build(recipient, message.into(), notification_type, related_entity_id);
        self.notification_repo.create_in(conn, model).await
    }

    /// The most recent notifications, newest first.
    pub async fn recent(&self, recipient: &AccountRef) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_recipient(recipient.kind.into(), &recipient.id, RECENT_LIMIT, 0)
            .await
    }

    /// One page of notifications. Pages start at 1; 0 is treated as 1.
    pub async fn list(&self, recipient: &AccountRef, page: u64) -> AppResult<NotificationPage> {
        let page = page.max(1);
        let kind = recipient.kind.into();

        let total = self
            .notification_repo
            .count_for_recipient(kind, &recipient.id)
            .await?;
        let offset = (page - 1).saturating_mul(PAGE_SIZE);
        let items = if offset < total {
            self.notification_repo
                .find_by_recipient(kind, &recipient.id, PAGE_SIZE, offset)
                .await?
        } else {
            Vec::new()
        };

        Ok(NotificationPage {
            items,
            page,
            total,
            total_pages: total.div_ceil(PAGE_SIZE),
        })
    }

    /// Mark one of the recipient's notifications as read.
    pub async fn mark_read(&self, recipient: &AccountRef, notification_id: &str) -> AppResult<()> {
        let found = self
            .notification_repo
            .mark_as_read(notification_id, recipient.kind.into(), &recipient.id)
            .await?;

        if found {
            Ok(())
        } else {
            Err(AppError::NotFound("Notification not found".to_string()))
        }
    }

    /// Mark all of the recipient's notifications as read.
    pub async fn mark_all_read(&self, recipient: &AccountRef) -> AppResult<u64> {
        self.notification_repo
            .mark_all_as_read(recipient.kind.into(), &recipient.id)
            .await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self, recipient: &AccountRef) -> AppResult<u64> {
        self.notification_repo
            .count_unread(recipient.kind.into(), &recipient.id)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use counselhub_db::entities::notification::RecipientKind;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::{collections::BTreeMap, sync::Arc};

    fn row(id: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            recipient_kind: RecipientKind::Student,
            recipient_id: "s1".to_string(),
            message: "Your appointment was approved".to_string(),
            notification_type: NotificationType::Appointment,
            related_entity_id: None,
            is_read: false,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> NotificationService {
        NotificationService::new(NotificationRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_notify_sets_recipient_kind() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[row("n1")]])
            .into_connection();

        let created = service(db)
            .notify(
                &AccountRef::student("s1"),
                "Your appointment was approved",
                NotificationType::Appointment,
                Some("a1"),
            )
            .await
            .unwrap();

        assert_eq!(created.recipient_kind, RecipientKind::Student);
    }

    #[tokio::test]
    async fn test_list_computes_pages() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(41)),
            )])]])
            .append_query_results([vec![row("n1"), row("n2")]])
            .into_connection();

        let page = service(db)
            .list(&AccountRef::student("s1"), 3)
            .await
            .unwrap();

        assert_eq!(page.total, 41);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_list_past_the_last_page_is_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(41)),
            )])]])
            .into_connection();

        let page = service(db)
            .list(&AccountRef::student("s1"), u64::MAX)
            .await
            .unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.page, u64::MAX);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_mark_read_of_foreign_notification() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<notification::Model>::new()])
            .into_connection();

        let result = service(db)
            .mark_read(&AccountRef::counsellor("c1"), "n1")
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 4,
            }])
            .into_connection();

        let updated = service(db)
            .mark_all_read(&AccountRef::student("s1"))
            .await
            .unwrap();
        assert_eq!(updated, 4);
    }
}
