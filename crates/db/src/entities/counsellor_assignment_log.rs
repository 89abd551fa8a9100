//! Counsellor assignment log entity.
//!
//! One row per administrator-driven reassignment of a student.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "counsellor_assignment_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub student_id: String,

    #[sea_orm(nullable)]
    pub old_counsellor_id: Option<String>,

    pub new_counsellor_id: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,

    pub assigned_by_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::administrator::Entity",
        from = "Column::AssignedById",
        to = "super::administrator::Column::Id"
    )]
    AssignedBy,
}

impl ActiveModelBehavior for ActiveModel {}
