//! Account registration and seeding.

use std::sync::Arc;

use chrono::{NaiveTime, Utc, Weekday};
use counselhub_common::{AppError, AppResult, IdGenerator, config::BootstrapConfig};
use counselhub_db::{
    entities::{
        administrator, counsellor,
        counsellor_schedule::{self, DayOfWeek},
        notification::NotificationType,
        student,
    },
    repositories::{
        AdministratorRepository, CounsellorRepository, CounsellorScheduleRepository,
        StudentRepository,
    },
};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use tracing::{debug, info, warn};
use validator::Validate;

use super::{
    account::{AccountRef, hash_password},
    matcher::MatcherService,
    notification::NotificationService,
    parse_date, transaction_failed,
};

/// Weekdays covered by a new counsellor's default schedule.
const DEFAULT_WORKING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const DEFAULT_DAY_START: (u32, u32) = (9, 0);
const DEFAULT_DAY_END: (u32, u32) = (20, 0);

/// Initial password of seeded counsellors.
const SEED_PASSWORD: &str = "password123";

struct SeedCounsellor {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    specialization: &'static str,
    qualification: &'static str,
    years_of_experience: i32,
    bio: &'static str,
    rating: f64,
}

const SEED_COUNSELLORS: [SeedCounsellor; 6] = [
    SeedCounsellor {
        first_name: "John",
        last_name: "Doe",
        email: "john.doe@example.com",
        specialization: "Technology & Engineering",
        qualification: "MSc Computer Science",
        years_of_experience: 10,
        bio: "Experienced technology counsellor.",
        rating: 4.5,
    },
    SeedCounsellor {
        first_name: "Aisha",
        last_name: "Patel",
        email: "aisha.patel@example.com",
        specialization: "Technology & Startups",
        qualification: "MBA Entrepreneurship",
        years_of_experience: 6,
        bio: "Startup and technology expert.",
        rating: 4.7,
    },
    SeedCounsellor {
        first_name: "Jane",
        last_name: "Smith",
        email: "jane.smith@example.com",
        specialization: "Healthcare & Medicine",
        qualification: "MD Medicine",
        years_of_experience: 8,
        bio: "Healthcare career counsellor.",
        rating: 4.6,
    },
    SeedCounsellor {
        first_name: "Ahmed",
        last_name: "Khan",
        email: "ahmed.khan@example.com",
        specialization: "Public Health & Research",
        qualification: "PhD Public Health",
        years_of_experience: 11,
        bio: "Public health specialist.",
        rating: 4.8,
    },
    SeedCounsellor {
        first_name: "Michael",
        last_name: "Brown",
        email: "michael.brown@example.com",
        specialization: "Business & Finance",
        qualification: "MBA Finance",
        years_of_experience: 12,
        bio: "Business and finance counsellor.",
        rating: 4.9,
    },
    SeedCounsellor {
        first_name: "Rachel",
        last_name: "Lee",
        email: "rachel.lee@example.com",
        specialization: "Entrepreneurship & MBA",
        qualification: "MBA Business",
        years_of_experience: 7,
        bio: "Entrepreneurship expert.",
        rating: 4.4,
    },
];

/// Input for registering a student.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 64))]
    pub first_name: String,

    #[validate(length(max = 64))]
    pub last_name: Option<String>,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,

    #[validate(length(max = 512))]
    pub address: Option<String>,

    #[validate(length(max = 64))]
    pub education_level: Option<String>,

    /// Free-text interests, stored comma-separated.
    #[serde(default)]
    pub interests: Vec<String>,

    #[validate(length(max = 128))]
    pub course: Option<String>,
}

/// Input for registering a counsellor.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCounsellorInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 64))]
    pub first_name: String,

    #[validate(length(max = 64))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub specialization: String,

    #[validate(length(max = 256))]
    pub qualification: Option<String>,

    #[validate(range(min = 0, max = 80))]
    pub years_of_experience: Option<i32>,

    #[validate(length(max = 2048))]
    pub bio: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,
}

/// Registration service.
#[derive(Clone)]
pub struct RegistrationService {
    db: Arc<DatabaseConnection>,
    student_repo: StudentRepository,
    counsellor_repo: CounsellorRepository,
    admin_repo: AdministratorRepository,
    schedule_repo: CounsellorScheduleRepository,
    matcher: MatcherService,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl RegistrationService {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        student_repo: StudentRepository,
        counsellor_repo: CounsellorRepository,
        admin_repo: AdministratorRepository,
        schedule_repo: CounsellorScheduleRepository,
        matcher: MatcherService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            db,
            student_repo,
            counsellor_repo,
            admin_repo,
            schedule_repo,
            matcher,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a student and assign the best-matching counsellor.
    pub async fn register_student(&self, input: RegisterStudentInput) -> AppResult<student::Model> {
        input.validate()?;

        if self.student_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let date_of_birth = input
            .date_of_birth
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(|d| parse_date(d, "date_of_birth"))
            .transpose()?;

        let interests = input
            .interests
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        let matched = self.matcher.match_counsellor(&interests).await?;

        let model = student::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(hash_password(&input.password)?),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            phone: Set(input.phone),
            date_of_birth: Set(date_of_birth),
            address: Set(input.address),
            education_level: Set(input.education_level),
            interests: Set(Some(interests)),
            counsellor_id: Set(matched.as_ref().map(|c| c.id.clone())),
            course: Set(input.course),
            quiz_result: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        };
        let student = self.student_repo.create(model).await?;

        if let Some(counsellor) = &matched {
            // The student exists either way; a lost notification is not fatal.
            if let Err(e) = self
                .notifications
                .notify(
                    &AccountRef::counsellor(counsellor.id.clone()),
                    format!("New student {} has been assigned to you.", student.full_name()),
                    NotificationType::Assignment,
                    Some(&student.id),
                )
                .await
            {
                warn!(error = %e, student_id = %student.id, "Failed to notify matched counsellor");
            }
        }

        info!(
            student_id = %student.id,
            counsellor_id = ?student.counsellor_id,
            "Student registered"
        );
        Ok(student)
    }

    /// Register a counsellor with the default weekly schedule.
    pub async fn register_counsellor(
        &self,
        input: RegisterCounsellorInput,
    ) -> AppResult<counsellor::Model> {
        input.validate()?;

        if self.counsellor_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let model = counsellor::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            password_hash: Set(hash_password(&input.password)?),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            specialization: Set(Some(input.specialization)),
            qualification: Set(input.qualification),
            years_of_experience: Set(input.years_of_experience),
            bio: Set(input.bio),
            is_available: Set(true),
            rating: Set(input.rating),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        };

        let counsellor = self
            .create_counsellor_with_schedule(model)
            .await
            .map_err(transaction_failed)?;

        info!(counsellor_id = %counsellor.id, "Counsellor registered");
        Ok(counsellor)
    }

    async fn create_counsellor_with_schedule(
        &self,
        model: counsellor::ActiveModel,
    ) -> AppResult<counsellor::Model> {
        let txn = self.db.begin().await?;

        let counsellor = self.counsellor_repo.create_in(&txn, model).await?;
        self.schedule_repo
            .create_many_in(&txn, self.default_schedule(&counsellor.id))
            .await?;

        txn.commit().await?;
        Ok(counsellor)
    }

    /// Monday to Friday, 09:00 to 20:00, recurring.
    fn default_schedule(&self, counsellor_id: &str) -> Vec<counsellor_schedule::ActiveModel> {
        let start = NaiveTime::from_hms_opt(DEFAULT_DAY_START.0, DEFAULT_DAY_START.1, 0)
            .unwrap_or(NaiveTime::MIN);
        let end = NaiveTime::from_hms_opt(DEFAULT_DAY_END.0, DEFAULT_DAY_END.1, 0)
            .unwrap_or(NaiveTime::MIN);

        DEFAULT_WORKING_DAYS
            .iter()
            .map(|day| counsellor_schedule::ActiveModel {
                id: Set(self.id_gen.generate()),
                counsellor_id: Set(counsellor_id.to_string()),
                day_of_week: Set(DayOfWeek::from(*day)),
                start_time: Set(start),
                end_time: Set(end),
                is_recurring: Set(true),
            })
            .collect()
    }

    /// Insert the initial counsellor roster. Existing emails are skipped.
    ///
    /// Returns the number of counsellors created.
    pub async fn seed_counsellors(&self) -> AppResult<usize> {
        let mut created = 0;

        for seed in &SEED_COUNSELLORS {
            if self.counsellor_repo.find_by_email(seed.email).await?.is_some() {
                debug!(email = seed.email, "Seed counsellor already present");
                continue;
            }

            self.register_counsellor(RegisterCounsellorInput {
                email: seed.email.to_string(),
                password: SEED_PASSWORD.to_string(),
                first_name: seed.first_name.to_string(),
                last_name: Some(seed.last_name.to_string()),
                specialization: seed.specialization.to_string(),
                qualification: Some(seed.qualification.to_string()),
                years_of_experience: Some(seed.years_of_experience),
                bio: Some(seed.bio.to_string()),
                rating: Some(seed.rating),
            })
            .await?;
            created += 1;
        }

        info!(created, "Counsellor roster seeded");
        Ok(created)
    }

    /// Create the bootstrap administrator unless one with that email exists.
    pub async fn ensure_admin(&self, bootstrap: &BootstrapConfig) -> AppResult<administrator::Model> {
        if let Some(existing) = self.admin_repo.find_by_email(&bootstrap.admin_email).await? {
            debug!(email = %existing.email, "Administrator already present");
            return Ok(existing);
        }

        let model = administrator::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(bootstrap.admin_email.clone()),
            password_hash: Set(hash_password(&bootstrap.admin_password)?),
            first_name: Set(bootstrap.admin_first_name.clone()),
            last_name: Set(Some(bootstrap.admin_last_name.clone())),
            department: Set(None),
            role_description: Set(None),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
            last_login_at: Set(None),
        };

        let admin = self.admin_repo.create(model).await?;
        info!(admin_id = %admin.id, email = %admin.email, "Administrator created");
        Ok(admin)
    }
}
