//! Core business logic for counselhub.

use std::sync::Arc;

use counselhub_db::repositories::{
    AdministratorRepository, AppointmentRepository, AppointmentRequestRepository,
    CareerGoalRepository, CounsellingSessionRepository, CounsellorAssignmentLogRepository,
    CounsellorRepository, CounsellorScheduleRepository, EventRepository, GrievanceRepository,
    MessageRepository, NotificationRepository, StudentDocumentRepository, StudentRepository,
    TaskRepository,
};
use sea_orm::DatabaseConnection;

pub mod services;

pub use services::*;

/// Every service, wired to one database connection.
#[allow(missing_docs)]
#[derive(Clone)]
pub struct Services {
    pub accounts: AccountService,
    pub admin: AdminService,
    pub appointments: AppointmentService,
    pub deactivation: DeactivationService,
    pub documents: DocumentService,
    pub events: EventService,
    pub goals: GoalService,
    pub grievances: GrievanceService,
    pub matcher: MatcherService,
    pub messaging: MessagingService,
    pub notifications: NotificationService,
    pub registration: RegistrationService,
    pub requests: AppointmentRequestService,
    pub tasks: TaskService,
}

impl Services {
    /// Build all services over `db`.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let student_repo = StudentRepository::new(db.clone());
        let counsellor_repo = CounsellorRepository::new(db.clone());
        let admin_repo = AdministratorRepository::new(db.clone());
        let appointment_repo = AppointmentRepository::new(db.clone());
        let request_repo = AppointmentRequestRepository::new(db.clone());
        let event_repo = EventRepository::new(db.clone());
        let grievance_repo = GrievanceRepository::new(db.clone());

        let notifications = NotificationService::new(NotificationRepository::new(db.clone()));
        let matcher = MatcherService::new(counsellor_repo.clone());
        let accounts = AccountService::new(
            student_repo.clone(),
            counsellor_repo.clone(),
            admin_repo.clone(),
        );

        Self {
            admin: AdminService::new(
                db.clone(),
                student_repo.clone(),
                counsellor_repo.clone(),
                CounsellorAssignmentLogRepository::new(db.clone()),
                event_repo.clone(),
                grievance_repo.clone(),
                notifications.clone(),
            ),
            appointments: AppointmentService::new(
                db.clone(),
                appointment_repo.clone(),
                CounsellorScheduleRepository::new(db.clone()),
                CounsellingSessionRepository::new(db.clone()),
                notifications.clone(),
            ),
            deactivation: DeactivationService::new(
                db.clone(),
                student_repo.clone(),
                counsellor_repo.clone(),
                appointment_repo.clone(),
                request_repo.clone(),
                notifications.clone(),
            ),
            documents: DocumentService::new(StudentDocumentRepository::new(db.clone())),
            events: EventService::new(event_repo, notifications.clone()),
            goals: GoalService::new(CareerGoalRepository::new(db.clone())),
            grievances: GrievanceService::new(grievance_repo, notifications.clone()),
            messaging: MessagingService::new(MessageRepository::new(db.clone()), accounts.clone()),
            registration: RegistrationService::new(
                db.clone(),
                student_repo.clone(),
                counsellor_repo.clone(),
                admin_repo,
                CounsellorScheduleRepository::new(db.clone()),
                matcher.clone(),
                notifications.clone(),
            ),
            requests: AppointmentRequestService::new(
                db.clone(),
                student_repo,
                counsellor_repo,
                request_repo,
                appointment_repo,
                notifications.clone(),
            ),
            tasks: TaskService::new(TaskRepository::new(db)),
            accounts,
            matcher,
            notifications,
        }
    }
}
