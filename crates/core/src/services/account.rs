//! Accounts, authentication and the per-request caller context.

use std::{fmt, str::FromStr};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use counselhub_common::{AppError, AppResult};
use counselhub_db::{
    entities::{administrator, counsellor, notification::RecipientKind, student},
    repositories::{AdministratorRepository, CounsellorRepository, StudentRepository},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::info;

/// Which table an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Student,
    Counsellor,
    Admin,
}

impl AccountKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Counsellor => "counsellor",
            Self::Admin => "admin",
        }
    }
}

impl From<AccountKind> for RecipientKind {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Student => Self::Student,
            AccountKind::Counsellor => Self::Counsellor,
            AccountKind::Admin => Self::Admin,
        }
    }
}

/// Kind plus id; identifies any account.
///
/// Renders as `student-<id>`, `counsellor-<id>` or `admin-<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountRef {
    pub kind: AccountKind,
    pub id: String,
}

impl AccountRef {
    #[must_use]
    pub fn student(id: impl Into<String>) -> Self {
        Self {
            kind: AccountKind::Student,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn counsellor(id: impl Into<String>) -> Self {
        Self {
            kind: AccountKind::Counsellor,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            kind: AccountKind::Admin,
            id: id.into(),
        }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.id)
    }
}

impl FromStr for AccountRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s
            .split_once('-')
            .ok_or_else(|| AppError::BadRequest(format!("Malformed account reference: {s}")))?;

        let kind = match prefix {
            "student" => AccountKind::Student,
            "counsellor" => AccountKind::Counsellor,
            "admin" => AccountKind::Admin,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Unknown account kind: {prefix}"
                )));
            }
        };

        if id.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Malformed account reference: {s}"
            )));
        }

        Ok(Self {
            kind,
            id: id.to_string(),
        })
    }
}

impl Serialize for AccountRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An authenticated account with its row.
#[derive(Debug, Clone)]
pub enum Account {
    Student(student::Model),
    Counsellor(counsellor::Model),
    Administrator(administrator::Model),
}

impl Account {
    #[must_use]
    pub const fn kind(&self) -> AccountKind {
        match self {
            Self::Student(_) => AccountKind::Student,
            Self::Counsellor(_) => AccountKind::Counsellor,
            Self::Administrator(_) => AccountKind::Admin,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Student(s) => &s.id,
            Self::Counsellor(c) => &c.id,
            Self::Administrator(a) => &a.id,
        }
    }

    #[must_use]
    pub fn account_ref(&self) -> AccountRef {
        AccountRef {
            kind: self.kind(),
            id: self.id().to_string(),
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Student(s) => &s.email,
            Self::Counsellor(c) => &c.email,
            Self::Administrator(a) => &a.email,
        }
    }
}

/// The caller of one operation, passed explicitly instead of global state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    account: Account,
}

impl RequestContext {
    #[must_use]
    pub const fn new(account: Account) -> Self {
        Self { account }
    }

    #[must_use]
    pub const fn account(&self) -> &Account {
        &self.account
    }

    pub fn require_student(&self) -> AppResult<&student::Model> {
        match &self.account {
            Account::Student(s) => Ok(s),
            _ => Err(AppError::Forbidden("Students only".to_string())),
        }
    }

    pub fn require_counsellor(&self) -> AppResult<&counsellor::Model> {
        match &self.account {
            Account::Counsellor(c) => Ok(c),
            _ => Err(AppError::Forbidden("Counsellors only".to_string())),
        }
    }

    pub fn require_admin(&self) -> AppResult<&administrator::Model> {
        match &self.account {
            Account::Administrator(a) => Ok(a),
            _ => Err(AppError::Forbidden("Administrators only".to_string())),
        }
    }
}

/// Looks up and authenticates accounts of every kind.
#[derive(Clone)]
pub struct AccountService {
    student_repo: StudentRepository,
    counsellor_repo: CounsellorRepository,
    admin_repo: AdministratorRepository,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(
        student_repo: StudentRepository,
        counsellor_repo: CounsellorRepository,
        admin_repo: AdministratorRepository,
    ) -> Self {
        Self {
            student_repo,
            counsellor_repo,
            admin_repo,
        }
    }

    /// Authenticate by email and password.
    ///
    /// Administrators are checked first, then students, then counsellors.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<Account> {
        if let Some(admin) = self.admin_repo.find_by_email(email).await? {
            if verify_password(password, &admin.password_hash)? {
                if !admin.is_active {
                    return Err(AppError::Forbidden("Account is deactivated".to_string()));
                }
                let admin = self.admin_repo.touch_last_login(admin).await?;
                info!(admin_id = %admin.id, "Administrator signed in");
                return Ok(Account::Administrator(admin));
            }
        }

        if let Some(student) = self.student_repo.find_by_email(email).await? {
            if verify_password(password, &student.password_hash)? {
                if !student.is_active {
                    return Err(AppError::Forbidden("Account is deactivated".to_string()));
                }
                let student = self.student_repo.touch_last_login(student).await?;
                info!(student_id = %student.id, "Student signed in");
                return Ok(Account::Student(student));
            }
        }

        if let Some(counsellor) = self.counsellor_repo.find_by_email(email).await? {
            if verify_password(password, &counsellor.password_hash)? {
                let counsellor = self.counsellor_repo.touch_last_login(counsellor).await?;
                info!(counsellor_id = %counsellor.id, "Counsellor signed in");
                return Ok(Account::Counsellor(counsellor));
            }
        }

        Err(AppError::Unauthorized)
    }

    /// Load the account an [`AccountRef`] points at.
    pub async fn resolve(&self, account: &AccountRef) -> AppResult<Account> {
        let not_found = || AppError::NotFound(format!("Account {account} not found"));
        match account.kind {
            AccountKind::Student => self
                .student_repo
                .find_by_id(&account.id)
                .await?
                .map(Account::Student)
                .ok_or_else(not_found),
            AccountKind::Counsellor => self
                .counsellor_repo
                .find_by_id(&account.id)
                .await?
                .map(Account::Counsellor)
                .ok_or_else(not_found),
            AccountKind::Admin => self
                .admin_repo
                .find_by_id(&account.id)
                .await?
                .map(Account::Administrator)
                .ok_or_else(not_found),
        }
    }

    /// Build a request context for an account reference.
    pub async fn context_for(&self, account: &AccountRef) -> AppResult<RequestContext> {
        Ok(RequestContext::new(self.resolve(account).await?))
    }
}

/// Hash a password.
pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
///
/// A stored value that is not a PHC string never verifies.
pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return Ok(false);
    };

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
