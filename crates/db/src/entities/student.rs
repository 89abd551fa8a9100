//! Student entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
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

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,

    #[sea_orm(nullable)]
    pub education_level: Option<String>,

    /// Comma-separated free-text interests
    #[sea_orm(column_type = "Text", nullable)]
    pub interests: Option<String>,

    /// Assigned counsellor (NULL = unassigned)
    #[sea_orm(nullable)]
    pub counsellor_id: Option<String>,

    #[sea_orm(nullable)]
    pub course: Option<String>,

    #[sea_orm(nullable)]
    pub quiz_result: Option<String>,

    #[sea_orm(default_value = true)]
    pub is_active: bool,

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
    #[sea_orm(
        belongs_to = "super::counsellor::Entity",
        from = "Column::CounsellorId",
        to = "super::counsellor::Column::Id",
        on_delete = "SetNull"
    )]
    Counsellor,

    #[sea_orm(has_many = "super::appointment::Entity")]
    Appointments,

    #[sea_orm(has_many = "super::career_goal::Entity")]
    Goals,
}

impl Related<super::counsellor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Counsellor.def()
    }
}

impl Related<super::appointment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl Related<super::career_goal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Goals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
