//! Direct message entity.
//!
//! Sender and recipient are plain account ids; messages can flow between any
//! account kinds so no foreign keys are declared.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub sender_id: String,

    pub recipient_id: String,

    #[sea_orm(column_type = "Text")]
    pub body: String,

    pub sent_at: DateTimeWithTimeZone,

    #[sea_orm(default_value = false)]
    pub is_read: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
