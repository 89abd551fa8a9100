//! Registration, sign-in, events and appointment follow-up on a migrated
//! in-memory database.

#![allow(clippy::unwrap_used)]

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use counselhub_common::AppError;
use counselhub_core::{
    Account, AccountRef, CompleteAppointmentInput, FeedbackInput, RegisterCounsellorInput,
    RegisterStudentInput, RescheduleInput, SendMessageInput, Services,
};
use counselhub_db::{
    entities::{appointment::AppointmentStatus, notification::NotificationType},
    test_utils::{TestDatabase, fixtures},
};

fn student_input(email: &str, interests: &[&str]) -> RegisterStudentInput {
    RegisterStudentInput {
        email: email.to_string(),
        password: "correct horse battery".to_string(),
        first_name: "Priya".to_string(),
        last_name: Some("Sharma".to_string()),
        phone: None,
        date_of_birth: Some("2004-05-17".to_string()),
        address: None,
        education_level: Some("Undergraduate".to_string()),
        interests: interests.iter().map(ToString::to_string).collect(),
        course: None,
    }
}

fn counsellor_input(email: &str, specialization: &str) -> RegisterCounsellorInput {
    RegisterCounsellorInput {
        email: email.to_string(),
        password: "counsel-me-please".to_string(),
        first_name: "Grace".to_string(),
        last_name: Some("Hopper".to_string()),
        specialization: specialization.to_string(),
        qualification: None,
        years_of_experience: Some(15),
        bio: None,
        rating: Some(4.2),
    }
}

/// The first date strictly after today that falls on `weekday`.
fn next(weekday: Weekday) -> NaiveDate {
    let mut day = Utc::now().date_naive() + Days::new(1);
    while day.weekday() != weekday {
        day = day + Days::new(1);
    }
    day
}

// === Registration and matching ===

#[tokio::test]
async fn test_unmatched_interests_fall_back_to_top_rated() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    fixtures::counsellor(conn, "John", "Technology & Engineering", 4.5)
        .await
        .unwrap();
    let top = fixtures::counsellor(conn, "Michael", "Business & Finance", 4.9)
        .await
        .unwrap();

    let student = services
        .registration
        .register_student(student_input("priya@example.com", &["software", "marketing"]))
        .await
        .unwrap();

    assert_eq!(student.counsellor_id.as_deref(), Some(top.id.as_str()));
    assert_eq!(student.interests.as_deref(), Some("software,marketing"));

    let inbox = services
        .notifications
        .recent(&AccountRef::counsellor(top.id.clone()))
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].notification_type, NotificationType::Assignment);
}

#[tokio::test]
async fn test_category_keyword_beats_rating() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let health = fixtures::counsellor(conn, "Jane", "Healthcare", 4.6)
        .await
        .unwrap();
    fixtures::counsellor(conn, "Michael", "Business & Finance", 4.9)
        .await
        .unwrap();

    let student = services
        .registration
        .register_student(student_input("nurse@example.com", &["nursing"]))
        .await
        .unwrap();

    assert_eq!(student.counsellor_id.as_deref(), Some(health.id.as_str()));
}

#[tokio::test]
async fn test_registration_without_counsellors_leaves_student_unassigned() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    let student = services
        .registration
        .register_student(student_input("alone@example.com", &["art"]))
        .await
        .unwrap();

    assert!(student.counsellor_id.is_none());
    assert_eq!(db.count_rows("notification").await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_student_email_is_a_conflict() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    services
        .registration
        .register_student(student_input("twice@example.com", &[]))
        .await
        .unwrap();
    let again = services
        .registration
        .register_student(student_input("twice@example.com", &[]))
        .await;

    assert!(matches!(again, Err(AppError::Conflict(_))));
    assert_eq!(db.count_rows("student").await.unwrap(), 1);
}

#[tokio::test]
async fn test_counsellor_gets_default_week() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    services
        .registration
        .register_counsellor(counsellor_input("grace@example.com", "Technology & Engineering"))
        .await
        .unwrap();

    assert_eq!(db.count_rows("counsellor").await.unwrap(), 1);
    assert_eq!(db.count_rows("counsellor_schedule").await.unwrap(), 5);
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    assert_eq!(services.registration.seed_counsellors().await.unwrap(), 6);
    assert_eq!(services.registration.seed_counsellors().await.unwrap(), 0);
    assert_eq!(db.count_rows("counsellor").await.unwrap(), 6);
}

// === Sign-in ===

#[tokio::test]
async fn test_authenticate_student() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    let student = services
        .registration
        .register_student(student_input("login@example.com", &[]))
        .await
        .unwrap();

    let account = services
        .accounts
        .authenticate("login@example.com", "correct horse battery")
        .await
        .unwrap();
    assert!(matches!(&account, Account::Student(s) if s.id == student.id));

    let wrong = services
        .accounts
        .authenticate("login@example.com", "incorrect horse")
        .await;
    assert!(matches!(wrong, Err(AppError::Unauthorized)));

    let unknown = services
        .accounts
        .authenticate("nobody@example.com", "correct horse battery")
        .await;
    assert!(matches!(unknown, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_deactivated_student_cannot_sign_in() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    let student = services
        .registration
        .register_student(student_input("gone@example.com", &[]))
        .await
        .unwrap();
    services
        .deactivation
        .deactivate_student(&student.id)
        .await
        .unwrap();

    let result = services
        .accounts
        .authenticate("gone@example.com", "correct horse battery")
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_bootstrap_admin_signs_in() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());
    let bootstrap = counselhub_common::config::BootstrapConfig::default();

    let admin = services.registration.ensure_admin(&bootstrap).await.unwrap();
    let same = services.registration.ensure_admin(&bootstrap).await.unwrap();
    assert_eq!(admin.id, same.id);

    let account = services
        .accounts
        .authenticate(&bootstrap.admin_email, &bootstrap.admin_password)
        .await
        .unwrap();
    let ctx = services
        .accounts
        .context_for(&account.account_ref())
        .await
        .unwrap();
    assert!(ctx.require_admin().is_ok());
    assert!(matches!(ctx.require_student(), Err(AppError::Forbidden(_))));
}

// === Events ===

#[tokio::test]
async fn test_event_capacity_and_duplicates() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let s1 = fixtures::student(conn, None, "design").await.unwrap();
    let s2 = fixtures::student(conn, None, "design").await.unwrap();
    let event = fixtures::event(conn, Utc::now().date_naive() + Days::new(10), Some(1))
        .await
        .unwrap();

    services.events.register(&s1.id, &event.id).await.unwrap();

    let duplicate = services.events.register(&s1.id, &event.id).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    let full = services.events.register(&s2.id, &event.id).await;
    assert!(matches!(full, Err(AppError::Conflict(_))));
    assert_eq!(db.count_rows("event_registration").await.unwrap(), 1);

    let listing = services.events.upcoming_for_student(&s1.id).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert!(listing[0].registered);
    let listing = services.events.upcoming_for_student(&s2.id).await.unwrap();
    assert!(!listing[0].registered);
}

#[tokio::test]
async fn test_past_events_are_closed() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let student = fixtures::student(conn, None, "law").await.unwrap();
    let event = fixtures::event(conn, Utc::now().date_naive() - Days::new(2), None)
        .await
        .unwrap();

    let result = services.events.register(&student.id, &event.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(
        services
            .events
            .upcoming_for_student(&student.id)
            .await
            .unwrap()
            .is_empty()
    );
}

// === Appointment follow-up ===

#[tokio::test]
async fn test_reschedule_respects_working_hours() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = services
        .registration
        .register_counsellor(counsellor_input("grace@example.com", "Technology & Engineering"))
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "software")
        .await
        .unwrap();
    let appt = fixtures::appointment(
        conn,
        &student.id,
        &counsellor.id,
        next(Weekday::Tue),
        fixtures::hm(10, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();

    let to = |date: NaiveDate, time: &str| RescheduleInput {
        new_date: date.format("%Y-%m-%d").to_string(),
        new_time: time.to_string(),
    };

    let weekend = services
        .appointments
        .reschedule(&student.id, &appt.id, to(next(Weekday::Sat), "10:00"))
        .await;
    assert!(matches!(weekend, Err(AppError::Conflict(_))));

    let overruns = services
        .appointments
        .reschedule(&student.id, &appt.id, to(next(Weekday::Mon), "19:30"))
        .await;
    assert!(matches!(overruns, Err(AppError::Conflict(_))));

    let moved = services
        .appointments
        .reschedule(&student.id, &appt.id, to(next(Weekday::Mon), "14:00"))
        .await
        .unwrap();
    assert_eq!(moved.status, AppointmentStatus::Rescheduled);
    assert_eq!(moved.appointment_date, next(Weekday::Mon));
    assert_eq!(moved.end_time, Some(fixtures::hm(15, 0)));

    let again = services
        .appointments
        .reschedule(&student.id, &appt.id, to(next(Weekday::Wed), "09:00"))
        .await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_complete_then_feedback_once() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "Ahmed", "Public Health & Research", 4.8)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "research")
        .await
        .unwrap();
    let appt = fixtures::appointment(
        conn,
        &student.id,
        &counsellor.id,
        Utc::now().date_naive(),
        fixtures::hm(9, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();

    let session = services
        .appointments
        .complete(
            &counsellor.id,
            &appt.id,
            CompleteAppointmentInput {
                notes: Some("Discussed MPH programmes".to_string()),
                duration_minutes: Some(50),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(session.appointment_id, appt.id);

    let twice = services
        .appointments
        .complete(&counsellor.id, &appt.id, CompleteAppointmentInput::default())
        .await;
    assert!(matches!(twice, Err(AppError::Conflict(_))));

    let rating = || FeedbackInput {
        rating: 5,
        comments: Some("Very helpful".to_string()),
    };
    services
        .appointments
        .leave_feedback(&student.id, &session.id, rating())
        .await
        .unwrap();
    let duplicate = services
        .appointments
        .leave_feedback(&student.id, &session.id, rating())
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert_eq!(db.count_rows("feedback").await.unwrap(), 1);
}

// === Messaging ===

#[tokio::test]
async fn test_messages_between_student_and_counsellor() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "Rachel", "Entrepreneurship & MBA", 4.4)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "startups")
        .await
        .unwrap();
    let me = AccountRef::student(student.id.clone());

    services
        .messaging
        .send(
            &me,
            SendMessageInput {
                recipient: AccountRef::counsellor(counsellor.id.clone()),
                body: "Could we talk about pitch decks?".to_string(),
            },
        )
        .await
        .unwrap();

    let to_self = services
        .messaging
        .send(
            &me,
            SendMessageInput {
                recipient: me.clone(),
                body: "note to self".to_string(),
            },
        )
        .await;
    assert!(matches!(to_self, Err(AppError::BadRequest(_))));

    let to_nobody = services
        .messaging
        .send(
            &me,
            SendMessageInput {
                recipient: AccountRef::counsellor("missing"),
                body: "hello?".to_string(),
            },
        )
        .await;
    assert!(matches!(to_nobody, Err(AppError::NotFound(_))));

    let thread = services
        .messaging
        .conversation(&AccountRef::counsellor(counsellor.id.clone()))
        .await
        .unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].sender_id, student.id);
}
