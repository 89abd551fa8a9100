//! Create counsellor, student, administrator and schedule tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Counsellor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Counsellor::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Counsellor::Email)
                            .string_len(256)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Counsellor::PasswordHash).string_len(256).not_null())
                    .col(ColumnDef::new(Counsellor::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Counsellor::LastName).string_len(128))
                    .col(ColumnDef::new(Counsellor::Specialization).string_len(256))
                    .col(ColumnDef::new(Counsellor::Qualification).text())
                    .col(ColumnDef::new(Counsellor::YearsOfExperience).integer())
                    .col(ColumnDef::new(Counsellor::Bio).text())
                    .col(
                        ColumnDef::new(Counsellor::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Counsellor::Rating).double())
                    .col(
                        ColumnDef::new(Counsellor::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Counsellor::LastLoginAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: is_available (matcher candidate set)
        manager
            .create_index(
                Index::create()
                    .name("idx_counsellor_is_available")
                    .table(Counsellor::Table)
                    .col(Counsellor::IsAvailable)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Student::Email)
                            .string_len(256)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::PasswordHash).string_len(256).not_null())
                    .col(ColumnDef::new(Student::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Student::LastName).string_len(128))
                    .col(ColumnDef::new(Student::Phone).string_len(32))
                    .col(ColumnDef::new(Student::DateOfBirth).date())
                    .col(ColumnDef::new(Student::Address).text())
                    .col(ColumnDef::new(Student::EducationLevel).string_len(128))
                    .col(ColumnDef::new(Student::Interests).text())
                    .col(ColumnDef::new(Student::CounsellorId).string_len(32))
                    .col(ColumnDef::new(Student::Course).string_len(256))
                    .col(ColumnDef::new(Student::QuizResult).string_len(256))
                    .col(
                        ColumnDef::new(Student::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Student::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Student::LastLoginAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_counsellor")
                            .from(Student::Table, Student::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: counsellor_id (reassignment and counsellor dashboards)
        manager
            .create_index(
                Index::create()
                    .name("idx_student_counsellor_id")
                    .table(Student::Table)
                    .col(Student::CounsellorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Administrator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Administrator::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Administrator::Email)
                            .string_len(256)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Administrator::PasswordHash)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Administrator::FirstName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Administrator::LastName).string_len(128))
                    .col(ColumnDef::new(Administrator::Department).string_len(128))
                    .col(ColumnDef::new(Administrator::RoleDescription).text())
                    .col(
                        ColumnDef::new(Administrator::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Administrator::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Administrator::LastLoginAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CounsellorSchedule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CounsellorSchedule::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CounsellorSchedule::CounsellorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CounsellorSchedule::DayOfWeek)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounsellorSchedule::StartTime).time().not_null())
                    .col(ColumnDef::new(CounsellorSchedule::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(CounsellorSchedule::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_counsellor_schedule_counsellor")
                            .from(CounsellorSchedule::Table, CounsellorSchedule::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (counsellor_id, day_of_week) (slot validation)
        manager
            .create_index(
                Index::create()
                    .name("idx_counsellor_schedule_counsellor_day")
                    .table(CounsellorSchedule::Table)
                    .col(CounsellorSchedule::CounsellorId)
                    .col(CounsellorSchedule::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CounsellorSchedule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Administrator::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Counsellor::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Counsellor {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Specialization,
    Qualification,
    YearsOfExperience,
    Bio,
    IsAvailable,
    Rating,
    CreatedAt,
    LastLoginAt,
}

#[derive(Iden)]
enum Student {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    DateOfBirth,
    Address,
    EducationLevel,
    Interests,
    CounsellorId,
    Course,
    QuizResult,
    IsActive,
    CreatedAt,
    LastLoginAt,
}

#[derive(Iden)]
enum Administrator {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Department,
    RoleDescription,
    IsActive,
    CreatedAt,
    LastLoginAt,
}

#[derive(Iden)]
enum CounsellorSchedule {
    Table,
    Id,
    CounsellorId,
    DayOfWeek,
    StartTime,
    EndTime,
    IsRecurring,
}
