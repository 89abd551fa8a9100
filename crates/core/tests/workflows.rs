//! Deactivation cascades and the appointment request workflow, end to end
//! on a migrated in-memory database.

#![allow(clippy::unwrap_used)]

use chrono::{Days, NaiveDate, Utc};
use counselhub_common::AppError;
use counselhub_core::{CreateRequestInput, Services};
use counselhub_db::{
    entities::{
        Appointment, AppointmentRequest, Counsellor, Notification, Student,
        appointment::{AppointmentMode, AppointmentStatus},
        appointment_request, notification,
        notification::NotificationType,
    },
    test_utils::{TestDatabase, fixtures},
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
};

fn in_days(n: u64) -> NaiveDate {
    Utc::now().date_naive() + Days::new(n)
}

fn days_ago(n: u64) -> NaiveDate {
    Utc::now().date_naive() - Days::new(n)
}

async fn notifications_for(conn: &DatabaseConnection, recipient_id: &str) -> Vec<notification::Model> {
    Notification::find()
        .filter(notification::Column::RecipientId.eq(recipient_id))
        .all(conn)
        .await
        .unwrap()
}

// === Student deactivation ===

#[tokio::test]
async fn test_deactivate_student_removes_dependents_and_clears_flag() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "John", "Technology & Engineering", 4.5)
        .await
        .unwrap();
    let admin = fixtures::administrator(conn).await.unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "software")
        .await
        .unwrap();
    fixtures::full_student_history(conn, &student.id, &counsellor.id, &admin.id)
        .await
        .unwrap();

    let report = services
        .deactivation
        .deactivate_student(&student.id)
        .await
        .unwrap();
    assert!(report.total() >= 16);

    for table in [
        "appointment_request",
        "feedback",
        "counselling_session",
        "appointment",
        "grievance",
        "event_registration",
        "goal_milestone",
        "career_goal",
        "student_document",
        "task",
        "counsellor_assignment_log",
        "notification",
        "message",
    ] {
        assert_eq!(db.count_rows(table).await.unwrap(), 0, "{table} not empty");
    }

    let stored = Student::find_by_id(&student.id).one(conn).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(db.count_rows("event").await.unwrap(), 1);
}

#[tokio::test]
async fn test_failed_student_cascade_changes_nothing() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    if conn.get_database_backend() != DatabaseBackend::Sqlite {
        return;
    }
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "Jane", "Healthcare & Medicine", 4.6)
        .await
        .unwrap();
    let admin = fixtures::administrator(conn).await.unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "nursing")
        .await
        .unwrap();
    fixtures::full_student_history(conn, &student.id, &counsellor.id, &admin.id)
        .await
        .unwrap();

    db.execute_sql(
        "CREATE TRIGGER block_document_delete BEFORE DELETE ON student_document \
         BEGIN SELECT RAISE(ABORT, 'documents are locked'); END;",
    )
    .await
    .unwrap();

    let result = services.deactivation.deactivate_student(&student.id).await;
    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Transaction(_)));
    assert!(!err.user_message().contains("locked"));

    let stored = Student::find_by_id(&student.id).one(conn).await.unwrap().unwrap();
    assert!(stored.is_active);
    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 1);
    assert_eq!(db.count_rows("feedback").await.unwrap(), 2);
    assert_eq!(db.count_rows("career_goal").await.unwrap(), 1);
}

#[tokio::test]
async fn test_reactivation_only_flips_the_flag() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "Aisha", "Technology & Startups", 4.7)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "startups")
        .await
        .unwrap();
    fixtures::task(conn, &student.id, in_days(2)).await.unwrap();

    assert!(!services.deactivation.toggle_student(&student.id).await.unwrap());
    assert!(services.deactivation.toggle_student(&student.id).await.unwrap());

    let stored = Student::find_by_id(&student.id).one(conn).await.unwrap().unwrap();
    assert!(stored.is_active);
    assert_eq!(db.count_rows("task").await.unwrap(), 0);
}

#[tokio::test]
async fn test_deactivate_unknown_student() {
    let db = TestDatabase::new().await.unwrap();
    let services = Services::new(db.arc());

    let result = services.deactivation.deactivate_student("missing").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// === Counsellor deactivation ===

#[tokio::test]
async fn test_deactivate_counsellor_hands_everything_to_replacement() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let old = fixtures::counsellor(conn, "Michael", "Business & Finance", 4.9)
        .await
        .unwrap();
    let replacement = fixtures::counsellor(conn, "Rachel", "Entrepreneurship & MBA", 4.4)
        .await
        .unwrap();
    let s1 = fixtures::student(conn, Some(&old.id), "finance").await.unwrap();
    let s2 = fixtures::student(conn, Some(&old.id), "marketing").await.unwrap();

    let future = fixtures::appointment(
        conn,
        &s1.id,
        &old.id,
        in_days(3),
        fixtures::hm(10, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();
    let past = fixtures::appointment(
        conn,
        &s1.id,
        &old.id,
        days_ago(3),
        fixtures::hm(10, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();
    let done = fixtures::appointment(
        conn,
        &s2.id,
        &old.id,
        in_days(1),
        fixtures::hm(9, 0),
        AppointmentStatus::Completed,
    )
    .await
    .unwrap();
    let request = fixtures::appointment_request(conn, &s2.id, &old.id, in_days(5), fixtures::hm(14, 0))
        .await
        .unwrap();

    let summary = services
        .deactivation
        .deactivate_counsellor(&old.id, &replacement.id)
        .await
        .unwrap();

    assert_eq!(summary.students_reassigned, 2);
    assert_eq!(summary.appointments_reassigned, 1);
    assert_eq!(summary.requests_reassigned, 1);

    let old_row = Counsellor::find_by_id(&old.id).one(conn).await.unwrap().unwrap();
    assert!(!old_row.is_available);

    for s in [&s1, &s2] {
        let row = Student::find_by_id(&s.id).one(conn).await.unwrap().unwrap();
        assert_eq!(row.counsellor_id.as_deref(), Some(replacement.id.as_str()));
    }

    let moved = Appointment::find_by_id(&future.id).one(conn).await.unwrap().unwrap();
    assert_eq!(moved.counsellor_id, replacement.id);
    let kept = Appointment::find_by_id(&past.id).one(conn).await.unwrap().unwrap();
    assert_eq!(kept.counsellor_id, old.id);
    let kept = Appointment::find_by_id(&done.id).one(conn).await.unwrap().unwrap();
    assert_eq!(kept.counsellor_id, old.id);

    let req = AppointmentRequest::find_by_id(&request.id)
        .one(conn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(req.counsellor_id, replacement.id);

    let summary_notes = notifications_for(conn, &replacement.id).await;
    assert_eq!(summary_notes.len(), 1);
    assert_eq!(summary_notes[0].notification_type, NotificationType::Assignment);

    let s1_notes = notifications_for(conn, &s1.id).await;
    assert_eq!(s1_notes.len(), 2);
    assert!(
        s1_notes
            .iter()
            .any(|n| n.notification_type == NotificationType::Appointment
                && n.related_entity_id.as_deref() == Some(future.id.as_str()))
    );
    assert_eq!(notifications_for(conn, &s2.id).await.len(), 1);
}

#[tokio::test]
async fn test_invalid_replacement_changes_nothing() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let old = fixtures::counsellor(conn, "John", "Technology & Engineering", 4.5)
        .await
        .unwrap();
    let busy = fixtures::counsellor(conn, "Jane", "Healthcare & Medicine", 4.6)
        .await
        .unwrap();
    counselhub_db::repositories::CounsellorRepository::new(db.arc())
        .set_available(&busy.id, false)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&old.id), "software").await.unwrap();
    fixtures::appointment_request(conn, &student.id, &old.id, in_days(2), fixtures::hm(11, 0))
        .await
        .unwrap();

    let unavailable = services.deactivation.deactivate_counsellor(&old.id, &busy.id).await;
    assert!(matches!(unavailable, Err(AppError::Conflict(_))));

    let missing = services.deactivation.deactivate_counsellor(&old.id, "nobody").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let same = services.deactivation.deactivate_counsellor(&old.id, &old.id).await;
    assert!(matches!(same, Err(AppError::Validation(_))));

    let empty = services.deactivation.deactivate_counsellor(&old.id, "").await;
    assert!(matches!(empty, Err(AppError::Validation(_))));

    let old_row = Counsellor::find_by_id(&old.id).one(conn).await.unwrap().unwrap();
    assert!(old_row.is_available);
    let row = Student::find_by_id(&student.id).one(conn).await.unwrap().unwrap();
    assert_eq!(row.counsellor_id.as_deref(), Some(old.id.as_str()));
    let pending = AppointmentRequest::find()
        .filter(appointment_request::Column::CounsellorId.eq(old.id.as_str()))
        .all(conn)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(db.count_rows("notification").await.unwrap(), 0);
}

#[tokio::test]
async fn test_appointment_today_moves_with_caseload() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let old = fixtures::counsellor(conn, "John", "Technology & Engineering", 4.5)
        .await
        .unwrap();
    let replacement = fixtures::counsellor(conn, "Aisha", "Technology & Startups", 4.7)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&old.id), "software").await.unwrap();
    let today = fixtures::appointment(
        conn,
        &student.id,
        &old.id,
        Utc::now().date_naive(),
        fixtures::hm(18, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();

    let summary = services
        .deactivation
        .deactivate_counsellor(&old.id, &replacement.id)
        .await
        .unwrap();
    assert_eq!(summary.appointments_reassigned, 1);

    let moved = Appointment::find_by_id(&today.id).one(conn).await.unwrap().unwrap();
    assert_eq!(moved.counsellor_id, replacement.id);

    let notes = notifications_for(conn, &student.id).await;
    assert!(
        notes
            .iter()
            .any(|n| n.notification_type == NotificationType::Appointment
                && n.related_entity_id.as_deref() == Some(today.id.as_str()))
    );
}

#[tokio::test]
async fn test_failed_counsellor_cascade_changes_nothing() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    if conn.get_database_backend() != DatabaseBackend::Sqlite {
        return;
    }
    let services = Services::new(db.arc());

    let old = fixtures::counsellor(conn, "Michael", "Business & Finance", 4.9)
        .await
        .unwrap();
    let replacement = fixtures::counsellor(conn, "Rachel", "Entrepreneurship & MBA", 4.4)
        .await
        .unwrap();
    let s1 = fixtures::student(conn, Some(&old.id), "finance").await.unwrap();
    let s2 = fixtures::student(conn, Some(&old.id), "marketing").await.unwrap();
    let appt = fixtures::appointment(
        conn,
        &s1.id,
        &old.id,
        in_days(2),
        fixtures::hm(10, 0),
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();
    let request = fixtures::appointment_request(conn, &s2.id, &old.id, in_days(5), fixtures::hm(14, 0))
        .await
        .unwrap();

    db.execute_sql(
        "CREATE TRIGGER block_notifications BEFORE INSERT ON notification \
         BEGIN SELECT RAISE(ABORT, 'notifications are locked'); END;",
    )
    .await
    .unwrap();

    let result = services
        .deactivation
        .deactivate_counsellor(&old.id, &replacement.id)
        .await;
    assert!(matches!(result, Err(AppError::Transaction(_))));

    let old_row = Counsellor::find_by_id(&old.id).one(conn).await.unwrap().unwrap();
    assert!(old_row.is_available);
    for s in [&s1, &s2] {
        let row = Student::find_by_id(&s.id).one(conn).await.unwrap().unwrap();
        assert_eq!(row.counsellor_id.as_deref(), Some(old.id.as_str()));
    }
    let kept = Appointment::find_by_id(&appt.id).one(conn).await.unwrap().unwrap();
    assert_eq!(kept.counsellor_id, old.id);
    let req = AppointmentRequest::find_by_id(&request.id)
        .one(conn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(req.counsellor_id, old.id);
    assert_eq!(db.count_rows("notification").await.unwrap(), 0);
}

// === Appointment requests ===

async fn request_setup(
    db: &TestDatabase,
) -> (String, String, appointment_request::Model) {
    let conn = db.connection();
    let counsellor = fixtures::counsellor(conn, "Ahmed", "Public Health & Research", 4.8)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "research")
        .await
        .unwrap();
    let request = fixtures::appointment_request(
        conn,
        &student.id,
        &counsellor.id,
        in_days(4),
        fixtures::hm(15, 0),
    )
    .await
    .unwrap();
    (counsellor.id, student.id, request)
}

#[tokio::test]
async fn test_approve_books_one_hour_and_removes_request() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());
    let (counsellor_id, student_id, request) = request_setup(&db).await;

    let appt = services
        .requests
        .approve(&counsellor_id, &request.id)
        .await
        .unwrap();

    assert_eq!(appt.status, AppointmentStatus::Scheduled);
    assert_eq!(appt.appointment_date, request.preferred_date);
    assert_eq!(appt.start_time, fixtures::hm(15, 0));
    assert_eq!(appt.end_time, Some(fixtures::hm(16, 0)));
    assert_eq!(appt.student_id, student_id);

    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 0);
    assert_eq!(db.count_rows("appointment").await.unwrap(), 1);

    let notes = notifications_for(conn, &student_id).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].notification_type, NotificationType::Appointment);
}

#[tokio::test]
async fn test_approve_into_booked_slot_is_a_conflict() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());
    let (counsellor_id, _, request) = request_setup(&db).await;

    let other = fixtures::student(conn, Some(&counsellor_id), "biology").await.unwrap();
    fixtures::appointment(
        conn,
        &other.id,
        &counsellor_id,
        request.preferred_date,
        request.preferred_time,
        AppointmentStatus::Scheduled,
    )
    .await
    .unwrap();

    let result = services.requests.approve(&counsellor_id, &request.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 1);
    assert_eq!(db.count_rows("appointment").await.unwrap(), 1);
    assert_eq!(db.count_rows("notification").await.unwrap(), 0);
}

#[tokio::test]
async fn test_only_the_addressed_counsellor_can_decide() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());
    let (_, _, request) = request_setup(&db).await;
    let stranger = fixtures::counsellor(conn, "Rachel", "Entrepreneurship & MBA", 4.4)
        .await
        .unwrap();

    let approve = services.requests.approve(&stranger.id, &request.id).await;
    assert!(matches!(approve, Err(AppError::NotFound(_))));
    let reject = services.requests.reject(&stranger.id, &request.id).await;
    assert!(matches!(reject, Err(AppError::NotFound(_))));

    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 1);
}

#[tokio::test]
async fn test_reject_notifies_and_removes_request() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());
    let (counsellor_id, student_id, request) = request_setup(&db).await;

    services.requests.reject(&counsellor_id, &request.id).await.unwrap();

    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 0);
    assert_eq!(db.count_rows("appointment").await.unwrap(), 0);
    let notes = notifications_for(conn, &student_id).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].notification_type, NotificationType::AppointmentRequest);

    let again = services.requests.reject(&counsellor_id, &request.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_student_cancel_notifies_both_parties() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());
    let (counsellor_id, student_id, request) = request_setup(&db).await;

    let wrong_student = services.requests.cancel("someone-else", &request.id).await;
    assert!(matches!(wrong_student, Err(AppError::NotFound(_))));

    services.requests.cancel(&student_id, &request.id).await.unwrap();

    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 0);
    assert_eq!(notifications_for(conn, &student_id).await.len(), 1);
    assert_eq!(notifications_for(conn, &counsellor_id).await.len(), 1);
}

#[tokio::test]
async fn test_create_request_goes_to_assigned_counsellor() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    let services = Services::new(db.arc());

    let counsellor = fixtures::counsellor(conn, "John", "Technology & Engineering", 4.5)
        .await
        .unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "software")
        .await
        .unwrap();

    let input = |date: NaiveDate| CreateRequestInput {
        appointment_type: "Career guidance".to_string(),
        preferred_date: date.format("%Y-%m-%d").to_string(),
        preferred_time: "11:30".to_string(),
        mode: AppointmentMode::Online,
        notes: Some("Internship applications".to_string()),
    };

    let request = services
        .requests
        .create(&student.id, input(in_days(6)))
        .await
        .unwrap();
    assert_eq!(request.counsellor_id, counsellor.id);
    assert_eq!(request.preferred_time, fixtures::hm(11, 30));
    assert_eq!(notifications_for(conn, &counsellor.id).await.len(), 1);
    assert_eq!(notifications_for(conn, &student.id).await.len(), 1);

    let past = services.requests.create(&student.id, input(days_ago(1))).await;
    assert!(matches!(past, Err(AppError::Validation(_))));

    let unassigned = fixtures::student(conn, None, "law").await.unwrap();
    let result = services.requests.create(&unassigned.id, input(in_days(6))).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let pending = services
        .requests
        .pending_for_counsellor(&counsellor.id)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
}
