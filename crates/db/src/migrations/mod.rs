//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_account_tables;
mod m20250601_000002_create_appointment_tables;
mod m20250601_000003_create_student_record_tables;
mod m20250601_000004_create_event_tables;
mod m20250601_000005_create_notification_table;
mod m20250601_000006_create_message_and_assignment_log_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_account_tables::Migration),
            Box::new(m20250601_000002_create_appointment_tables::Migration),
            Box::new(m20250601_000003_create_student_record_tables::Migration),
            Box::new(m20250601_000004_create_event_tables::Migration),
            Box::new(m20250601_000005_create_notification_table::Migration),
            Box::new(m20250601_000006_create_message_and_assignment_log_tables::Migration),
        ]
    }
}
