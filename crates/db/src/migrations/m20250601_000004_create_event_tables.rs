//! Create event and event registration tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Event::Description).text())
                    .col(ColumnDef::new(Event::EventType).string_len(16).not_null())
                    .col(ColumnDef::new(Event::CounsellorId).string_len(32))
                    .col(ColumnDef::new(Event::EventDate).date().not_null())
                    .col(ColumnDef::new(Event::StartTime).time().not_null())
                    .col(ColumnDef::new(Event::EndTime).time())
                    .col(ColumnDef::new(Event::Location).string_len(256))
                    .col(ColumnDef::new(Event::MeetingLink).string_len(512))
                    .col(ColumnDef::new(Event::Capacity).integer())
                    .col(
                        ColumnDef::new(Event::IsOnline)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Event::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_counsellor")
                            .from(Event::Table, Event::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: event_date (upcoming list)
        manager
            .create_index(
                Index::create()
                    .name("idx_event_event_date")
                    .table(Event::Table)
                    .col(Event::EventDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventRegistration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventRegistration::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventRegistration::EventId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistration::StudentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EventRegistration::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(EventRegistration::ReminderSent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EventRegistration::AttendanceStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registration_event")
                            .from(EventRegistration::Table, EventRegistration::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_registration_student")
                            .from(EventRegistration::Table, EventRegistration::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique: (event_id, student_id)
        manager
            .create_index(
                Index::create()
                    .name("idx_event_registration_event_student")
                    .table(EventRegistration::Table)
                    .col(EventRegistration::EventId)
                    .col(EventRegistration::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventRegistration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Event {
    Table,
    Id,
    Title,
    Description,
    EventType,
    CounsellorId,
    EventDate,
    StartTime,
    EndTime,
    Location,
    MeetingLink,
    Capacity,
    IsOnline,
    CreatedAt,
}

#[derive(Iden)]
enum EventRegistration {
    Table,
    Id,
    EventId,
    StudentId,
    RegisteredAt,
    ReminderSent,
    AttendanceStatus,
}

#[derive(Iden)]
enum Student {
    Table,
    Id,
}

#[derive(Iden)]
enum Counsellor {
    Table,
    Id,
}
