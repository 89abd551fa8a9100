//! Ordered removal of a student's dependent records.
//!
//! Foreign keys carry no `ON DELETE CASCADE`, so rows must be removed
//! children first. Each step is a filtered bulk delete: running it twice
//! removes nothing the second time.

use crate::entities::{
    Appointment, AppointmentRequest, CareerGoal, CounsellingSession, CounsellorAssignmentLog,
    EventRegistration, Feedback, GoalMilestone, Grievance, Message, Notification, StudentDocument,
    Task, appointment, appointment_request, career_goal, counselling_session,
    counsellor_assignment_log, event_registration, feedback, goal_milestone, grievance, message,
    notification, notification::RecipientKind, student_document, task,
};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    sea_query::{Query, SelectStatement},
};
use serde::Serialize;
use tracing::debug;

/// One dependent-record removal in the student cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentCleanupStep {
    AppointmentRequests,
    SessionFeedback,
    CounsellingSessions,
    Appointments,
    Grievances,
    EventRegistrations,
    StudentFeedback,
    GoalMilestones,
    CareerGoals,
    Documents,
    Tasks,
    AssignmentLogs,
    Notifications,
    Messages,
}

/// Steps in dependency order, children before parents.
pub const STUDENT_CLEANUP_ORDER: [StudentCleanupStep; 14] = [
    StudentCleanupStep::AppointmentRequests,
    StudentCleanupStep::SessionFeedback,
    StudentCleanupStep::CounsellingSessions,
    StudentCleanupStep::Appointments,
    StudentCleanupStep::Grievances,
    StudentCleanupStep::EventRegistrations,
    StudentCleanupStep::StudentFeedback,
    StudentCleanupStep::GoalMilestones,
    StudentCleanupStep::CareerGoals,
    StudentCleanupStep::Documents,
    StudentCleanupStep::Tasks,
    StudentCleanupStep::AssignmentLogs,
    StudentCleanupStep::Notifications,
    StudentCleanupStep::Messages,
];

/// Rows removed per step, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// `(step, rows removed)` pairs.
    pub steps: Vec<(StudentCleanupStep, u64)>,
}

impl CleanupReport {
    /// Total rows removed across all steps.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.steps.iter().map(|(_, n)| n).sum()
    }

    /// Rows removed by one step, zero if it did not run.
    #[must_use]
    pub fn removed(&self, step: StudentCleanupStep) -> u64 {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map_or(0, |(_, n)| *n)
    }
}

fn student_appointment_ids(student_id: &str) -> SelectStatement {
    Query::select()
        .column(appointment::Column::Id)
        .from(Appointment)
        .and_where(appointment::Column::StudentId.eq(student_id))
        .to_owned()
}

fn student_session_ids(student_id: &str) -> SelectStatement {
    Query::select()
        .column(counselling_session::Column::Id)
        .from(CounsellingSession)
        .and_where(
            counselling_session::Column::AppointmentId
                .in_subquery(student_appointment_ids(student_id)),
        )
        .to_owned()
}

fn student_goal_ids(student_id: &str) -> SelectStatement {
    Query::select()
        .column(career_goal::Column::Id)
        .from(CareerGoal)
        .and_where(career_goal::Column::StudentId.eq(student_id))
        .to_owned()
}

impl StudentCleanupStep {
    /// Stable label for logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AppointmentRequests => "appointment_requests",
            Self::SessionFeedback => "session_feedback",
            Self::CounsellingSessions => "counselling_sessions",
            Self::Appointments => "appointments",
            Self::Grievances => "grievances",
            Self::EventRegistrations => "event_registrations",
            Self::StudentFeedback => "student_feedback",
            Self::GoalMilestones => "goal_milestones",
            Self::CareerGoals => "career_goals",
            Self::Documents => "documents",
            Self::Tasks => "tasks",
            Self::AssignmentLogs => "assignment_logs",
            Self::Notifications => "notifications",
            Self::Messages => "messages",
        }
    }

    /// Run this step for one student. Returns the number of rows removed.
    pub async fn run<C: ConnectionTrait>(self, conn: &C, student_id: &str) -> Result<u64, DbErr> {
        let result = match self {
            Self::AppointmentRequests => {
                AppointmentRequest::delete_many()
                    .filter(appointment_request::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::SessionFeedback => {
                Feedback::delete_many()
                    .filter(feedback::Column::SessionId.in_subquery(student_session_ids(student_id)))
                    .exec(conn)
                    .await?
            }
            Self::CounsellingSessions => {
                CounsellingSession::delete_many()
                    .filter(
                        counselling_session::Column::AppointmentId
                            .in_subquery(student_appointment_ids(student_id)),
                    )
                    .exec(conn)
                    .await?
            }
            Self::Appointments => {
                Appointment::delete_many()
                    .filter(appointment::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::Grievances => {
                Grievance::delete_many()
                    .filter(grievance::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::EventRegistrations => {
                EventRegistration::delete_many()
                    .filter(event_registration::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::StudentFeedback => {
                Feedback::delete_many()
                    .filter(feedback::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::GoalMilestones => {
                GoalMilestone::delete_many()
                    .filter(goal_milestone::Column::GoalId.in_subquery(student_goal_ids(student_id)))
                    .exec(conn)
                    .await?
            }
            Self::CareerGoals => {
                CareerGoal::delete_many()
                    .filter(career_goal::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::Documents => {
                StudentDocument::delete_many()
                    .filter(student_document::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::Tasks => {
                Task::delete_many()
                    .filter(task::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::AssignmentLogs => {
                CounsellorAssignmentLog::delete_many()
                    .filter(counsellor_assignment_log::Column::StudentId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::Notifications => {
                Notification::delete_many()
                    .filter(notification::Column::RecipientKind.eq(RecipientKind::Student))
                    .filter(notification::Column::RecipientId.eq(student_id))
                    .exec(conn)
                    .await?
            }
            Self::Messages => {
                Message::delete_many()
                    .filter(
                        Condition::any()
                            .add(message::Column::SenderId.eq(student_id))
                            .add(message::Column::RecipientId.eq(student_id)),
                    )
                    .exec(conn)
                    .await?
            }
        };

        debug!(
            step = self.as_str(),
            student_id = %student_id,
            rows = result.rows_affected,
            "Cleanup step finished"
        );

        Ok(result.rows_affected)
    }
}

/// Run every cleanup step in order on `conn`.
///
/// The caller owns the transaction; on error nothing here is committed.
pub async fn run_student_cleanup<C: ConnectionTrait>(
    conn: &C,
    student_id: &str,
) -> AppResult<CleanupReport> {
    let mut report = CleanupReport::default();

    for step in STUDENT_CLEANUP_ORDER {
        let removed = step
            .run(conn, student_id)
            .await
            .map_err(|e| AppError::Transaction(format!("{}: {e}", step.as_str())))?;
        report.steps.push((step, removed));
    }

    Ok(report)
}
