//! Counsellor entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "counsellor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,

    #[sea_orm(nullable)]
    pub last_name: Option<String>,

    /// Free-text category label, e.g. "Technology & Engineering"
    #[sea_orm(nullable)]
    pub specialization: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub qualification: Option<String>,

    #[sea_orm(nullable)]
    pub years_of_experience: Option<i32>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,

    /// Accepts new assignments and appointments
    #[sea_orm(default_value = true)]
    pub is_available: bool,

    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub last_login_at: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Display name used in notification text.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student::Entity")]
    Students,

    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,

    #[sea_orm(has_many = "super::counsellor_schedule::Entity")]
    Schedules,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl Related<super::counsellor_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
