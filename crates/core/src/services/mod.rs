//! Business logic services.

#![allow(missing_docs)]

pub mod account;
pub mod admin;
pub mod appointment;
pub mod appointment_request;
pub mod deactivation;
pub mod document;
pub mod event;
pub mod goal;
pub mod grievance;
pub mod matcher;
pub mod messaging;
pub mod notification;
pub mod registration;
pub mod task;

pub use account::{Account, AccountKind, AccountRef, AccountService, RequestContext};
pub use admin::{AdminService, CreateEventInput, RespondGrievanceInput};
pub use appointment::{
    AppointmentService, CompleteAppointmentInput, FeedbackInput, RescheduleInput,
};
pub use appointment_request::{AppointmentRequestService, CreateRequestInput};
pub use deactivation::{CounsellorDeactivation, DeactivationService};
pub use document::{DocumentService, RecordDocumentInput};
pub use event::{EventListing, EventService};
pub use goal::{
    CreateGoalInput, CreateMilestoneInput, GoalService, GoalWithMilestones, UpdateGoalInput,
};
pub use grievance::{GrievanceService, SubmitGrievanceInput};
pub use matcher::MatcherService;
pub use messaging::{MessagingService, SendMessageInput};
pub use notification::{NotificationPage, NotificationService};
pub use registration::{RegisterCounsellorInput, RegisterStudentInput, RegistrationService};
pub use task::{CreateTaskInput, TaskService, TaskSort, TaskStats, UpdateTaskInput};

use chrono::{NaiveDate, NaiveTime, Utc};
use counselhub_common::{AppError, AppResult};
use tracing::error;

/// Today's date in UTC.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` field.
pub(crate) fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{field} must be a date in YYYY-MM-DD format")))
}

/// Parse an `HH:MM` field.
pub(crate) fn parse_time(raw: &str, field: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| AppError::Validation(format!("{field} must be a time in HH:MM format")))
}

/// Reject dates before today.
pub(crate) fn ensure_not_past(date: NaiveDate) -> AppResult<()> {
    if date < today() {
        return Err(AppError::Validation(
            "Cannot choose a date in the past".to_string(),
        ));
    }
    Ok(())
}

/// Map a failure from inside a transaction for the caller.
///
/// Client errors pass through. Server-side failures are logged in full and
/// become [`AppError::Transaction`]; the transaction has already been rolled
/// back by the time this runs.
pub(crate) fn transaction_failed(err: AppError) -> AppError {
    match err {
        AppError::Transaction(_) => err,
        e if e.is_server_error() => {
            error!(error = %e, "Transaction rolled back");
            AppError::Transaction(e.to_string())
        }
        e => e,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_date(" 2030-02-01 ", "d").unwrap(),
            NaiveDate::from_ymd_opt(2030, 2, 1).unwrap()
        );
        assert!(matches!(
            parse_date("01-02-2030", "d"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            parse_time("09:30", "t").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("9.30am", "t").is_err());
    }

    #[test]
    fn test_ensure_not_past() {
        assert!(ensure_not_past(today()).is_ok());
        assert!(ensure_not_past(today().pred_opt().unwrap()).is_err());
    }

    #[test]
    fn test_transaction_failed_keeps_client_errors() {
        let conflict = transaction_failed(AppError::Conflict("slot".into()));
        assert!(matches!(conflict, AppError::Conflict(_)));

        let db = transaction_failed(AppError::Database("fk violation".into()));
        assert!(matches!(db, AppError::Transaction(_)));
    }
}
