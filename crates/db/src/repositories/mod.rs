//! Repositories.

mod administrator;
mod appointment;
mod appointment_request;
mod career_goal;
mod counselling_session;
mod counsellor;
mod counsellor_assignment_log;
mod counsellor_schedule;
mod event;
mod grievance;
mod message;
mod notification;
mod student;
mod student_document;
mod task;

pub use administrator::AdministratorRepository;
pub use appointment::AppointmentRepository;
pub use appointment_request::AppointmentRequestRepository;
pub use career_goal::CareerGoalRepository;
pub use counselling_session::CounsellingSessionRepository;
pub use counsellor::CounsellorRepository;
pub use counsellor_assignment_log::CounsellorAssignmentLogRepository;
pub use counsellor_schedule::CounsellorScheduleRepository;
pub use event::EventRepository;
pub use grievance::GrievanceRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use student::StudentRepository;
pub use student_document::StudentDocumentRepository;
pub use task::{TaskFilter, TaskRepository};
