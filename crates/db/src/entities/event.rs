//! Event entity (webinars, workshops, Q&A sessions, seminars).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[sea_orm(string_value = "webinar")]
    Webinar,
    #[sea_orm(string_value = "workshop")]
    Workshop,
    #[sea_orm(string_value = "qna")]
    Qna,
    #[sea_orm(string_value = "seminar")]
    Seminar,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub event_type: EventType,

    /// Hosting counsellor, if any
    #[sea_orm(nullable)]
    pub counsellor_id: Option<String>,

    pub event_date: Date,

    pub start_time: Time,

    #[sea_orm(nullable)]
    pub end_time: Option<Time>,

    #[sea_orm(nullable)]
    pub location: Option<String>,

    #[sea_orm(nullable)]
    pub meeting_link: Option<String>,

    /// NULL = unlimited
    #[sea_orm(nullable)]
    pub capacity: Option<i32>,

    #[sea_orm(default_value = true)]
    pub is_online: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_registration::Entity")]
    Registrations,
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
