//! Feedback entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(nullable)]
    pub session_id: Option<String>,

    #[sea_orm(nullable)]
    pub student_id: Option<String>,

    #[sea_orm(nullable)]
    pub counsellor_id: Option<String>,

    /// 1 to 5
    pub rating: i32,

    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::counselling_session::Entity",
        from = "Column::SessionId",
        to = "super::counselling_session::Column::Id"
    )]
    Session,

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

impl Related<super::counselling_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
