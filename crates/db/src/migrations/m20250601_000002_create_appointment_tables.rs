//! Create appointment, appointment request, session and feedback tables.
//!
//! Child rows reference their parents without `ON DELETE CASCADE`; the
//! student cleanup removes them in dependency order.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointment::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointment::StudentId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Appointment::CounsellorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointment::AppointmentDate).date().not_null())
                    .col(ColumnDef::new(Appointment::StartTime).time().not_null())
                    .col(ColumnDef::new(Appointment::EndTime).time())
                    .col(ColumnDef::new(Appointment::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Appointment::Mode).string_len(16).not_null())
                    .col(ColumnDef::new(Appointment::MeetingLink).string_len(512))
                    .col(ColumnDef::new(Appointment::Location).string_len(256))
                    .col(
                        ColumnDef::new(Appointment::IsFree)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Appointment::Fee)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Appointment::PaymentStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_student")
                            .from(Appointment::Table, Appointment::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_counsellor")
                            .from(Appointment::Table, Appointment::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: student_id (upcoming list, cleanup)
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_student_id")
                    .table(Appointment::Table)
                    .col(Appointment::StudentId)
                    .to_owned(),
            )
            .await?;

        // Index: (counsellor_id, appointment_date, start_time) (slot conflicts)
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_counsellor_slot")
                    .table(Appointment::Table)
                    .col(Appointment::CounsellorId)
                    .col(Appointment::AppointmentDate)
                    .col(Appointment::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppointmentRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppointmentRequest::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::StudentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::CounsellorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::AppointmentType)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::PreferredDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::PreferredTime)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::Mode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AppointmentRequest::Notes).text())
                    .col(
                        ColumnDef::new(AppointmentRequest::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AppointmentRequest::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_request_student")
                            .from(AppointmentRequest::Table, AppointmentRequest::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_request_counsellor")
                            .from(AppointmentRequest::Table, AppointmentRequest::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (counsellor_id, status) (pending list)
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_request_counsellor_status")
                    .table(AppointmentRequest::Table)
                    .col(AppointmentRequest::CounsellorId)
                    .col(AppointmentRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CounsellingSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CounsellingSession::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CounsellingSession::AppointmentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CounsellingSession::Notes).text())
                    .col(ColumnDef::new(CounsellingSession::Recommendations).text())
                    .col(ColumnDef::new(CounsellingSession::Resources).text())
                    .col(ColumnDef::new(CounsellingSession::FollowUpDate).date())
                    .col(ColumnDef::new(CounsellingSession::DurationMinutes).integer())
                    .col(
                        ColumnDef::new(CounsellingSession::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_counselling_session_appointment")
                            .from(CounsellingSession::Table, CounsellingSession::AppointmentId)
                            .to(Appointment::Table, Appointment::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::SessionId).string_len(32))
                    .col(ColumnDef::new(Feedback::StudentId).string_len(32))
                    .col(ColumnDef::new(Feedback::CounsellorId).string_len(32))
                    .col(ColumnDef::new(Feedback::Rating).integer().not_null())
                    .col(ColumnDef::new(Feedback::Comments).text())
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_session")
                            .from(Feedback::Table, Feedback::SessionId)
                            .to(CounsellingSession::Table, CounsellingSession::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_student")
                            .from(Feedback::Table, Feedback::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_counsellor")
                            .from(Feedback::Table, Feedback::CounsellorId)
                            .to(Counsellor::Table, Counsellor::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CounsellingSession::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppointmentRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Appointment {
    Table,
    Id,
    StudentId,
    CounsellorId,
    AppointmentDate,
    StartTime,
    EndTime,
    Status,
    Mode,
    MeetingLink,
    Location,
    IsFree,
    Fee,
    PaymentStatus,
    CreatedAt,
}

#[derive(Iden)]
enum AppointmentRequest {
    Table,
    Id,
    StudentId,
    CounsellorId,
    AppointmentType,
    PreferredDate,
    PreferredTime,
    Mode,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CounsellingSession {
    Table,
    Id,
    AppointmentId,
    Notes,
    Recommendations,
    Resources,
    FollowUpDate,
    DurationMinutes,
    CreatedAt,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    SessionId,
    StudentId,
    CounsellorId,
    Rating,
    Comments,
    CreatedAt,
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
