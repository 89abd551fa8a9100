//! Create message and counsellor assignment log tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Message::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Message::SenderId).string_len(32).not_null())
                    .col(ColumnDef::new(Message::RecipientId).string_len(32).not_null())
                    .col(ColumnDef::new(Message::Body).text().not_null())
                    .col(
                        ColumnDef::new(Message::SentAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Message::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_sender_id")
                    .table(Message::Table)
                    .col(Message::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_recipient_id")
                    .table(Message::Table)
                    .col(Message::RecipientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CounsellorAssignmentLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CounsellorAssignmentLog::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CounsellorAssignmentLog::StudentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounsellorAssignmentLog::OldCounsellorId).string_len(32))
                    .col(
                        ColumnDef::new(CounsellorAssignmentLog::NewCounsellorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounsellorAssignmentLog::Reason).text())
                    .col(
                        ColumnDef::new(CounsellorAssignmentLog::AssignedById)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounsellorAssignmentLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_counsellor_assignment_log_student")
                            .from(
                                CounsellorAssignmentLog::Table,
                                CounsellorAssignmentLog::StudentId,
                            )
                            .to(Student::Table, Student::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_counsellor_assignment_log_admin")
                            .from(
                                CounsellorAssignmentLog::Table,
                                CounsellorAssignmentLog::AssignedById,
                            )
                            .to(Administrator::Table, Administrator::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CounsellorAssignmentLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Message {
    Table,
    Id,
    SenderId,
    RecipientId,
    Body,
    SentAt,
    IsRead,
}

#[derive(Iden)]
enum CounsellorAssignmentLog {
    Table,
    Id,
    StudentId,
    OldCounsellorId,
    NewCounsellorId,
    Reason,
    AssignedById,
    CreatedAt,
}

#[derive(Iden)]
enum Student {
    Table,
    Id,
}

#[derive(Iden)]
enum Administrator {
    Table,
    Id,
}
