//! Database entities.

pub mod administrator;
pub mod appointment;
pub mod appointment_request;
pub mod career_goal;
pub mod counselling_session;
pub mod counsellor;
pub mod counsellor_assignment_log;
pub mod counsellor_schedule;
pub mod event;
pub mod event_registration;
pub mod feedback;
pub mod goal_milestone;
pub mod grievance;
pub mod message;
pub mod notification;
pub mod student;
pub mod student_document;
pub mod task;

pub use administrator::Entity as Administrator;
pub use appointment::Entity as Appointment;
pub use appointment_request::Entity as AppointmentRequest;
pub use career_goal::Entity as CareerGoal;
pub use counselling_session::Entity as CounsellingSession;
pub use counsellor::Entity as Counsellor;
pub use counsellor_assignment_log::Entity as CounsellorAssignmentLog;
pub use counsellor_schedule::Entity as CounsellorSchedule;
pub use event::Entity as Event;
pub use event_registration::Entity as EventRegistration;
pub use feedback::Entity as Feedback;
pub use goal_milestone::Entity as GoalMilestone;
pub use grievance::Entity as Grievance;
pub use message::Entity as Message;
pub use notification::Entity as Notification;
pub use student::Entity as Student;
pub use student_document::Entity as StudentDocument;
pub use task::Entity as Task;
