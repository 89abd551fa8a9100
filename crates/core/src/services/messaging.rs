//! Direct messages between accounts.

use chrono::Utc;
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{entities::message, repositories::MessageRepository};
use sea_orm::Set;
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use super::account::{AccountRef, AccountService};

/// Input for sending a message.
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageInput {
    pub recipient: AccountRef,

    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

/// Messaging service for business logic.
#[derive(Clone)]
pub struct MessagingService {
    message_repo: MessageRepository,
    accounts: AccountService,
    id_gen: IdGenerator,
}

impl MessagingService {
    /// Create a new messaging service.
    #[must_use]
    pub const fn new(message_repo: MessageRepository, accounts: AccountService) -> Self {
        Self {
            message_repo,
            accounts,
            id_gen: IdGenerator::new(),
        }
    }

    /// Send a message to another account.
    pub async fn send(
        &self,
        sender: &AccountRef,
        input: SendMessageInput,
    ) -> AppResult<message::Model> {
        input.validate()?;

        if input.recipient == *sender {
            return Err(AppError::BadRequest(
                "Cannot send a message to yourself".to_string(),
            ));
        }
        self.accounts.resolve(&input.recipient).await?;

        let model = message::ActiveModel {
            id: Set(self.id_gen.generate()),
            sender_id: Set(sender.id.clone()),
            recipient_id: Set(input.recipient.id.clone()),
            body: Set(input.body),
            sent_at: Set(Utc::now().into()),
            is_read: Set(false),
        };

        let message = self.message_repo.create(model).await?;
        debug!(message_id = %message.id, %sender, recipient = %input.recipient, "Message sent");
        Ok(message)
    }

    /// Messages the account sent or received, newest first.
    pub async fn conversation(&self, account: &AccountRef) -> AppResult<Vec<message::Model>> {
        self.message_repo.find_for_account(&account.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use counselhub_db::repositories::{
        AdministratorRepository, CounsellorRepository, StudentRepository,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: sea_orm::DatabaseConnection) -> MessagingService {
        let db = Arc::new(db);
        MessagingService::new(
            MessageRepository::new(db.clone()),
            AccountService::new(
                StudentRepository::new(db.clone()),
                CounsellorRepository::new(db.clone()),
                AdministratorRepository::new(db),
            ),
        )
    }

    #[tokio::test]
    async fn test_cannot_message_self() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let me = AccountRef::student("s1");

        let result = service(db)
            .send(
                &me,
                SendMessageInput {
                    recipient: me.clone(),
                    body: "hello".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_unknown_recipient() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<counselhub_db::entities::counsellor::Model>::new()])
            .into_connection();

        let result = service(db)
            .send(
                &AccountRef::student("s1"),
                SendMessageInput {
                    recipient: AccountRef::counsellor("ghost"),
                    body: "hello".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
