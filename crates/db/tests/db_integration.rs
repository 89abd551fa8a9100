//! Database integration tests.
//!
//! Run against a private in-memory SQLite database per test. Set
//! `TEST_DATABASE_URL` to point them at another server.

#![allow(clippy::unwrap_used)]

use counselhub_db::{
    cleanup::{STUDENT_CLEANUP_ORDER, StudentCleanupStep, run_student_cleanup},
    test_utils::{TABLES, TestDatabase, fixtures},
};
use sea_orm::{ConnectionTrait, DatabaseBackend, TransactionTrait};

const STUDENT_DEPENDENT_TABLES: [&str; 13] = [
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
];

#[tokio::test]
async fn test_migrations_run_on_fresh_database() {
    let db = TestDatabase::new().await.unwrap();
    for table in TABLES {
        assert_eq!(db.count_rows(table).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_student_cleanup_removes_every_dependent_row() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();

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

    let txn = conn.begin().await.unwrap();
    let report = run_student_cleanup(&txn, &student.id).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(report.steps.len(), STUDENT_CLEANUP_ORDER.len());
    assert_eq!(report.removed(StudentCleanupStep::SessionFeedback), 1);
    assert_eq!(report.removed(StudentCleanupStep::StudentFeedback), 1);
    assert_eq!(report.removed(StudentCleanupStep::Messages), 2);

    for table in STUDENT_DEPENDENT_TABLES {
        assert_eq!(db.count_rows(table).await.unwrap(), 0, "{table} not empty");
    }

    // Parents survive: the student row, counsellor and the event itself
    assert_eq!(db.count_rows("student").await.unwrap(), 1);
    assert_eq!(db.count_rows("counsellor").await.unwrap(), 1);
    assert_eq!(db.count_rows("event").await.unwrap(), 1);
}

#[tokio::test]
async fn test_student_cleanup_is_idempotent() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();

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

    let first = run_student_cleanup(conn, &student.id).await.unwrap();
    let second = run_student_cleanup(conn, &student.id).await.unwrap();

    assert!(first.total() > 0);
    assert_eq!(second.total(), 0);
}

#[tokio::test]
async fn test_student_cleanup_leaves_other_students_alone() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();

    let counsellor = fixtures::counsellor(conn, "Aisha", "Technology & Startups", 4.7)
        .await
        .unwrap();
    let admin = fixtures::administrator(conn).await.unwrap();
    let leaving = fixtures::student(conn, Some(&counsellor.id), "software")
        .await
        .unwrap();
    let staying = fixtures::student(conn, Some(&counsellor.id), "design")
        .await
        .unwrap();
    fixtures::full_student_history(conn, &leaving.id, &counsellor.id, &admin.id)
        .await
        .unwrap();
    fixtures::full_student_history(conn, &staying.id, &counsellor.id, &admin.id)
        .await
        .unwrap();

    run_student_cleanup(conn, &leaving.id).await.unwrap();

    assert_eq!(db.count_rows("appointment").await.unwrap(), 1);
    assert_eq!(db.count_rows("counselling_session").await.unwrap(), 1);
    assert_eq!(db.count_rows("feedback").await.unwrap(), 2);
    assert_eq!(db.count_rows("goal_milestone").await.unwrap(), 1);
    assert_eq!(db.count_rows("message").await.unwrap(), 2);
}

#[tokio::test]
async fn test_failed_step_rolls_back_with_transaction() {
    let db = TestDatabase::new().await.unwrap();
    let conn = db.connection();
    if conn.get_database_backend() != DatabaseBackend::Sqlite {
        return;
    }

    let counsellor = fixtures::counsellor(conn, "Ahmed", "Public Health & Research", 4.8)
        .await
        .unwrap();
    let admin = fixtures::administrator(conn).await.unwrap();
    let student = fixtures::student(conn, Some(&counsellor.id), "research")
        .await
        .unwrap();
    fixtures::full_student_history(conn, &student.id, &counsellor.id, &admin.id)
        .await
        .unwrap();

    db.execute_sql(
        "CREATE TRIGGER block_goal_delete BEFORE DELETE ON career_goal \
         BEGIN SELECT RAISE(ABORT, 'career goals are locked'); END;",
    )
    .await
    .unwrap();

    let txn = conn.begin().await.unwrap();
    let result = run_student_cleanup(&txn, &student.id).await;
    assert!(result.is_err());
    txn.rollback().await.unwrap();

    // Steps before the failure were undone
    assert_eq!(db.count_rows("appointment_request").await.unwrap(), 1);
    assert_eq!(db.count_rows("appointment").await.unwrap(), 1);
    assert_eq!(db.count_rows("goal_milestone").await.unwrap(), 1);
}
