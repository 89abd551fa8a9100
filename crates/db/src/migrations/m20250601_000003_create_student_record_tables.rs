//! Create grievance, career goal, milestone, task and document tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grievance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grievance::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grievance::StudentId).string_len(32).not_null())
                    .col(ColumnDef::new(Grievance::Subject).string_len(256).not_null())
                    .col(ColumnDef::new(Grievance::Description).text().not_null())
                    .col(ColumnDef::new(Grievance::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Grievance::Response).text())
                    .col(
                        ColumnDef::new(Grievance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Grievance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grievance_student")
                            .from(Grievance::Table, Grievance::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grievance_student_id")
                    .table(Grievance::Table)
                    .col(Grievance::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CareerGoal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CareerGoal::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CareerGoal::StudentId).string_len(32).not_null())
                    .col(ColumnDef::new(CareerGoal::Title).string_len(256).not_null())
                    .col(ColumnDef::new(CareerGoal::Description).text())
                    .col(ColumnDef::new(CareerGoal::StartDate).date().not_null())
                    .col(ColumnDef::new(CareerGoal::TargetDate).date())
                    .col(ColumnDef::new(CareerGoal::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(CareerGoal::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_career_goal_student")
                            .from(CareerGoal::Table, CareerGoal::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GoalMilestone::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GoalMilestone::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GoalMilestone::GoalId).string_len(32).not_null())
                    .col(ColumnDef::new(GoalMilestone::Title).string_len(256).not_null())
                    .col(ColumnDef::new(GoalMilestone::DueDate).date())
                    .col(ColumnDef::new(GoalMilestone::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(GoalMilestone::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_goal_milestone_goal")
                            .from(GoalMilestone::Table, GoalMilestone::GoalId)
                            .to(CareerGoal::Table, CareerGoal::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Task::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Task::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Task::StudentId).string_len(32).not_null())
                    .col(ColumnDef::new(Task::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Task::Description).text())
                    .col(ColumnDef::new(Task::DueDate).date().not_null())
                    .col(ColumnDef::new(Task::Priority).string_len(16).not_null())
                    .col(ColumnDef::new(Task::Category).string_len(16).not_null())
                    .col(ColumnDef::new(Task::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(Task::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Task::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_student")
                            .from(Task::Table, Task::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (student_id, status) (filters and stats)
        manager
            .create_index(
                Index::create()
                    .name("idx_task_student_status")
                    .table(Task::Table)
                    .col(Task::StudentId)
                    .col(Task::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentDocument::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentDocument::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentDocument::StudentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentDocument::Title).string_len(256).not_null())
                    .col(
                        ColumnDef::new(StudentDocument::FilePath)
                            .string_len(512)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentDocument::DocumentType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentDocument::FileType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentDocument::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_document_student")
                            .from(StudentDocument::Table, StudentDocument::StudentId)
                            .to(Student::Table, Student::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentDocument::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Task::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GoalMilestone::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CareerGoal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grievance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Grievance {
    Table,
    Id,
    StudentId,
    Subject,
    Description,
    Status,
    Response,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CareerGoal {
    Table,
    Id,
    StudentId,
    Title,
    Description,
    StartDate,
    TargetDate,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum GoalMilestone {
    Table,
    Id,
    GoalId,
    Title,
    DueDate,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Task {
    Table,
    Id,
    StudentId,
    Title,
    Description,
    DueDate,
    Priority,
    Category,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum StudentDocument {
    Table,
    Id,
    StudentId,
    Title,
    FilePath,
    DocumentType,
    FileType,
    UploadedAt,
}

#[derive(Iden)]
enum Student {
    Table,
    Id,
}
