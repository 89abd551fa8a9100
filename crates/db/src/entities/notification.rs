//! Notification entity.
//!
//! A notification is addressed to exactly one account, identified by kind
//! and id, and is immutable apart from its read flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of account a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "counsellor")]
    Counsellor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Notification type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sea_orm(string_value = "general")]
    General,
    #[sea_orm(string_value = "appointment")]
    Appointment,
    #[sea_orm(string_value = "resource")]
    Resource,
    #[sea_orm(string_value = "payment")]
    Payment,
    #[sea_orm(string_value = "grievance")]
    Grievance,
    #[sea_orm(string_value = "appointment_request")]
    AppointmentRequest,
    #[sea_orm(string_value = "assignment")]
    Assignment,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub recipient_kind: RecipientKind,

    /// The account receiving the notification
    pub recipient_id: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    pub notification_type: NotificationType,

    /// Appointment, request, grievance or event the notification is about
    #[sea_orm(nullable)]
    pub related_entity_id: Option<String>,

    #[sea_orm(default_value = false)]
    pub is_read: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
