//! Test utilities for database operations.
//!
//! Provides a migrated database for integration tests. By default every
//! `TestDatabase` is a private in-memory SQLite database; set
//! `TEST_DATABASE_URL` to run against another server instead.

use std::sync::Arc;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::migrations::Migrator;

/// Tables in reverse dependency order, children first.
pub const TABLES: [&str; 18] = [
    "feedback",
    "counselling_session",
    "appointment_request",
    "appointment",
    "grievance",
    "event_registration",
    "event",
    "goal_milestone",
    "career_goal",
    "student_document",
    "task",
    "counsellor_assignment_log",
    "notification",
    "message",
    "student",
    "counsellor_schedule",
    "administrator",
    "counsellor",
];

/// Test database configuration.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    /// Connection URL.
    pub url: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("TEST_DATABASE_URL")
                .unwrap_or_else(|_| "sqlite::memory:".to_string()),
        }
    }
}

impl TestDbConfig {
    /// Whether the database lives only for the life of one connection.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:")
    }
}

/// A migrated test database.
pub struct TestDatabase {
    /// Database connection.
    pub conn: Arc<DatabaseConnection>,
    /// Database configuration.
    pub config: TestDbConfig,
}

impl TestDatabase {
    /// Create a fresh, migrated test database.
    pub async fn new() -> Result<Self, DbErr> {
        Self::with_config(TestDbConfig::default()).await
    }

    /// Create a migrated test database with custom configuration.
    pub async fn with_config(config: TestDbConfig) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(&config.url);
        if config.is_in_memory() {
            // Each pooled connection would otherwise see its own empty database.
            opt.max_connections(1).min_connections(1);
        }
        opt.sqlx_logging(false);

        let conn = Database::connect(opt).await?;
        Migrator::up(&conn, None).await?;

        info!(url = %config.url, "Connected to test database");

        Ok(Self {
            conn: Arc::new(conn),
            config,
        })
    }

    /// Get the database connection.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        self.conn.as_ref()
    }

    /// Get a shared handle for repositories and services.
    #[must_use]
    pub fn arc(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }

    /// Number of rows in a table.
    pub async fn count_rows(&self, table: &str) -> Result<i64, DbErr> {
        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await?;

        match row {
            Some(row) => row.try_get::<i64>("", "n"),
            None => Ok(0),
        }
    }

    /// Execute raw SQL, e.g. to install a failing trigger.
    pub async fn execute_sql(&self, sql: &str) -> Result<(), DbErr> {
        self.conn.execute_unprepared(sql).await?;
        Ok(())
    }

    /// Delete every row from every application table.
    pub async fn cleanup(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        for table in TABLES {
            self.conn
                .execute(Statement::from_string(backend, format!("DELETE FROM {table}")))
                .await?;
        }

        info!("Cleaned up test database");
        Ok(())
    }
}

/// Row builders for integration tests.
///
/// Every helper inserts one row with sensible defaults and returns it.
pub mod fixtures {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use counselhub_common::IdGenerator;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

    use crate::entities::{
        administrator, appointment,
        appointment::{AppointmentMode, AppointmentStatus, PaymentStatus},
        appointment_request,
        appointment_request::RequestStatus,
        career_goal,
        career_goal::GoalStatus,
        counselling_session, counsellor, counsellor_assignment_log, event,
        event::EventType,
        event_registration,
        event_registration::AttendanceStatus,
        feedback, goal_milestone,
        goal_milestone::MilestoneStatus,
        grievance,
        grievance::GrievanceStatus,
        message, notification,
        notification::{NotificationType, RecipientKind},
        student, student_document,
        student_document::{DocumentType, FileType},
        task,
        task::{TaskCategory, TaskPriority, TaskStatus},
    };

    fn id() -> String {
        IdGenerator::new().generate()
    }

    /// Parse `HH:MM` for test data.
    #[must_use]
    pub fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
    }

    /// An available counsellor.
    pub async fn counsellor<C: ConnectionTrait>(
        conn: &C,
        first_name: &str,
        specialization: &str,
        rating: f64,
    ) -> Result<counsellor::Model, DbErr> {
        let id = id();
        counsellor::ActiveModel {
            id: Set(id.clone()),
            email: Set(format!("{id}@counsellors.test")),
            password_hash: Set("not-a-hash".to_string()),
            first_name: Set(first_name.to_string()),
            last_name: Set(None),
            specialization: Set(Some(specialization.to_string())),
            qualification: Set(None),
            years_of_experience: Set(Some(5)),
            bio: Set(None),
            is_available: Set(true),
            rating: Set(Some(rating)),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        }
        .insert(conn)
        .await
    }

    /// An active student.
    pub async fn student<C: ConnectionTrait>(
        conn: &C,
        counsellor_id: Option<&str>,
        interests: &str,
    ) -> Result<student::Model, DbErr> {
        let id = id();
        student::ActiveModel {
            id: Set(id.clone()),
            email: Set(format!("{id}@students.test")),
            password_hash: Set("not-a-hash".to_string()),
            first_name: Set("Student".to_string()),
            last_name: Set(Some(id.clone())),
            phone: Set(None),
            date_of_birth: Set(None),
            address: Set(None),
            education_level: Set(Some("Undergraduate".to_string())),
            interests: Set(Some(interests.to_string())),
            counsellor_id: Set(counsellor_id.map(str::to_string)),
            course: Set(None),
            quiz_result: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        }
        .insert(conn)
        .await
    }

    /// An active administrator.
    pub async fn administrator<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<administrator::Model, DbErr> {
        let id = id();
        administrator::ActiveModel {
            id: Set(id.clone()),
            email: Set(format!("{id}@admins.test")),
            password_hash: Set("not-a-hash".to_string()),
            first_name: Set("Admin".to_string()),
            last_name: Set(None),
            department: Set(None),
            role_description: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        }
        .insert(conn)
        .await
    }

    /// A one-hour appointment.
    pub async fn appointment<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
        counsellor_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        status: AppointmentStatus,
    ) -> Result<appointment::Model, DbErr> {
        appointment::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            counsellor_id: Set(counsellor_id.to_string()),
            appointment_date: Set(date),
            start_time: Set(start),
            end_time: Set(Some(start + chrono::Duration::hours(1))),
            status: Set(status),
            mode: Set(AppointmentMode::Online),
            meeting_link: Set(None),
            location: Set(None),
            is_free: Set(true),
            fee: Set(0.0),
            payment_status: Set(PaymentStatus::NotRequired),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A pending appointment request.
    pub async fn appointment_request<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
        counsellor_id: &str,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<appointment_request::Model, DbErr> {
        appointment_request::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            counsellor_id: Set(counsellor_id.to_string()),
            appointment_type: Set("Career guidance".to_string()),
            preferred_date: Set(date),
            preferred_time: Set(time),
            mode: Set(AppointmentMode::Online),
            notes: Set(None),
            status: Set(RequestStatus::Pending),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A session recorded for an appointment.
    pub async fn session<C: ConnectionTrait>(
        conn: &C,
        appointment_id: &str,
    ) -> Result<counselling_session::Model, DbErr> {
        counselling_session::ActiveModel {
            id: Set(id()),
            appointment_id: Set(appointment_id.to_string()),
            notes: Set(Some("Discussed options".to_string())),
            recommendations: Set(None),
            resources: Set(None),
            follow_up_date: Set(None),
            duration_minutes: Set(Some(60)),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// Feedback, optionally tied to a session.
    pub async fn feedback<C: ConnectionTrait>(
        conn: &C,
        session_id: Option<&str>,
        student_id: Option<&str>,
        counsellor_id: Option<&str>,
    ) -> Result<feedback::Model, DbErr> {
        feedback::ActiveModel {
            id: Set(id()),
            session_id: Set(session_id.map(str::to_string)),
            student_id: Set(student_id.map(str::to_string)),
            counsellor_id: Set(counsellor_id.map(str::to_string)),
            rating: Set(5),
            comments: Set(None),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A pending grievance.
    pub async fn grievance<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
    ) -> Result<grievance::Model, DbErr> {
        grievance::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            subject: Set("Scheduling".to_string()),
            description: Set("Could not book a slot".to_string()),
            status: Set(GrievanceStatus::Pending),
            response: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A webinar on `date`.
    pub async fn event<C: ConnectionTrait>(
        conn: &C,
        date: NaiveDate,
        capacity: Option<i32>,
    ) -> Result<event::Model, DbErr> {
        event::ActiveModel {
            id: Set(id()),
            title: Set("Careers in tech".to_string()),
            description: Set(None),
            event_type: Set(EventType::Webinar),
            counsellor_id: Set(None),
            event_date: Set(date),
            start_time: Set(hm(17, 0)),
            end_time: Set(Some(hm(18, 0))),
            location: Set(None),
            meeting_link: Set(None),
            capacity: Set(capacity),
            is_online: Set(true),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A registration of a student for an event.
    pub async fn event_registration<C: ConnectionTrait>(
        conn: &C,
        event_id: &str,
        student_id: &str,
    ) -> Result<event_registration::Model, DbErr> {
        event_registration::ActiveModel {
            id: Set(id()),
            event_id: Set(event_id.to_string()),
            student_id: Set(student_id.to_string()),
            registered_at: Set(Utc::now().into()),
            reminder_sent: Set(false),
            attendance_status: Set(AttendanceStatus::Registered),
        }
        .insert(conn)
        .await
    }

    /// A career goal with one milestone.
    pub async fn goal_with_milestone<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
    ) -> Result<(career_goal::Model, goal_milestone::Model), DbErr> {
        let goal = career_goal::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            title: Set("Become a data engineer".to_string()),
            description: Set(None),
            start_date: Set(Utc::now().date_naive()),
            target_date: Set(None),
            status: Set(GoalStatus::InProgress),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await?;

        let milestone = goal_milestone::ActiveModel {
            id: Set(id()),
            goal_id: Set(goal.id.clone()),
            title: Set("Finish SQL course".to_string()),
            due_date: Set(None),
            status: Set(MilestoneStatus::Pending),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await?;

        Ok((goal, milestone))
    }

    /// A pending task.
    pub async fn task<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
        due: NaiveDate,
    ) -> Result<task::Model, DbErr> {
        task::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            title: Set("Update resume".to_string()),
            description: Set(None),
            due_date: Set(due),
            priority: Set(TaskPriority::Medium),
            category: Set(TaskCategory::Career),
            status: Set(TaskStatus::Pending),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// Document metadata.
    pub async fn document<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
    ) -> Result<student_document::Model, DbErr> {
        student_document::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            title: Set("Transcript".to_string()),
            file_path: Set(format!("uploads/{student_id}/transcript.pdf")),
            document_type: Set(DocumentType::Transcript),
            file_type: Set(FileType::Pdf),
            uploaded_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A general notification.
    pub async fn notification<C: ConnectionTrait>(
        conn: &C,
        kind: RecipientKind,
        recipient_id: &str,
    ) -> Result<notification::Model, DbErr> {
        notification::ActiveModel {
            id: Set(id()),
            recipient_kind: Set(kind),
            recipient_id: Set(recipient_id.to_string()),
            message: Set("Welcome".to_string()),
            notification_type: Set(NotificationType::General),
            related_entity_id: Set(None),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// A direct message.
    pub async fn message<C: ConnectionTrait>(
        conn: &C,
        sender_id: &str,
        recipient_id: &str,
    ) -> Result<message::Model, DbErr> {
        message::ActiveModel {
            id: Set(id()),
            sender_id: Set(sender_id.to_string()),
            recipient_id: Set(recipient_id.to_string()),
            body: Set("Hello".to_string()),
            sent_at: Set(Utc::now().into()),
            is_read: Set(false),
        }
        .insert(conn)
        .await
    }

    /// An assignment log row.
    pub async fn assignment_log<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
        new_counsellor_id: &str,
        admin_id: &str,
    ) -> Result<counsellor_assignment_log::Model, DbErr> {
        counsellor_assignment_log::ActiveModel {
            id: Set(id()),
            student_id: Set(student_id.to_string()),
            old_counsellor_id: Set(None),
            new_counsellor_id: Set(new_counsellor_id.to_string()),
            reason: Set(None),
            assigned_by_id: Set(admin_id.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(conn)
        .await
    }

    /// Give a student one row in every dependent table.
    pub async fn full_student_history<C: ConnectionTrait>(
        conn: &C,
        student_id: &str,
        counsellor_id: &str,
        admin_id: &str,
    ) -> Result<(), DbErr> {
        let day = Utc::now().date_naive() + chrono::Duration::days(7);

        appointment_request(conn, student_id, counsellor_id, day, hm(11, 0)).await?;
        let appt = appointment(
            conn,
            student_id,
            counsellor_id,
            day,
            hm(10, 0),
            AppointmentStatus::Completed,
        )
        .await?;
        let sess = session(conn, &appt.id).await?;
        feedback(conn, Some(&sess.id), Some(student_id), Some(counsellor_id)).await?;
        feedback(conn, None, Some(student_id), Some(counsellor_id)).await?;
        grievance(conn, student_id).await?;
        let ev = event(conn, day, None).await?;
        event_registration(conn, &ev.id, student_id).await?;
        goal_with_milestone(conn, student_id).await?;
        document(conn, student_id).await?;
        task(conn, student_id, day).await?;
        assignment_log(conn, student_id, counsellor_id, admin_id).await?;
        notification(conn, RecipientKind::Student, student_id).await?;
        message(conn, student_id, counsellor_id).await?;
        message(conn, counsellor_id, student_id).await?;

        Ok(())
    }
}
