//! Appointment request entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::appointment::AppointmentMode;

/// Request status. Stored rows are `Pending`; a transition removes the row,
/// so the other states only appear in logs and return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub student_id: String,

    pub counsellor_id: String,

    /// Free-text purpose, e.g. "Career guidance"
    pub appointment_type: String,

    pub preferred_date: Date,

    pub preferred_time: Time,

    pub mode: AppointmentMode,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    pub status: RequestStatus,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
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
        belongs_to = "super::counsellor::Entity",
        from = "Column::CounsellorId",
        to = "super::counsellor::Column::Id"
    )]
    Counsellor,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::counsellor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counsellor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
