//! Command-line parsing.

use counselhub_common::{AppError, AppResult};
use counselhub_core::AccountRef;

/// One operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply pending migrations and exit.
    Migrate,
    /// Create the default counsellor roster and the bootstrap administrator.
    Seed,
    /// Show which counsellor a set of interests would be matched with.
    Match { interests: String },
    /// Deactivate a student and remove everything they own.
    DeactivateStudent { student_id: String },
    /// Reactivate a student.
    ActivateStudent { student_id: String },
    /// Deactivate a counsellor, handing their caseload to `replacement_id`.
    DeactivateCounsellor {
        counsellor_id: String,
        replacement_id: String,
    },
    /// Make a counsellor available again.
    ActivateCounsellor { counsellor_id: String },
    /// Approve a pending appointment request.
    ApproveRequest {
        counsellor_id: String,
        request_id: String,
    },
    /// Reject a pending appointment request.
    RejectRequest {
        counsellor_id: String,
        request_id: String,
    },
    /// Show an account's most recent notifications.
    Notifications { account: AccountRef },
}

/// Usage text printed for `help` or a malformed command line.
pub const USAGE: &str = "\
usage: counselhub <command> [args]

commands:
  migrate
  seed
  match <interest>[,<interest>...]
  deactivate-student <student-id>
  activate-student <student-id>
  deactivate-counsellor <counsellor-id> <replacement-id>
  activate-counsellor <counsellor-id>
  approve-request <counsellor-id> <request-id>
  reject-request <counsellor-id> <request-id>
  notifications <student-|counsellor-|admin-><id>";

impl Command {
    /// Parse the arguments following the program name.
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((name, rest)) = args.split_first() else {
            return Err(AppError::BadRequest("missing command".to_string()));
        };

        let command = match (name.as_str(), rest) {
            ("migrate", []) => Self::Migrate,
            ("seed", []) => Self::Seed,
            ("match", words) if !words.is_empty() => Self::Match {
                interests: words.join(" "),
            },
            ("deactivate-student", [id]) => Self::DeactivateStudent {
                student_id: id.clone(),
            },
            ("activate-student", [id]) => Self::ActivateStudent {
                student_id: id.clone(),
            },
            ("deactivate-counsellor", [id, replacement]) => Self::DeactivateCounsellor {
                counsellor_id: id.clone(),
                replacement_id: replacement.clone(),
            },
            ("activate-counsellor", [id]) => Self::ActivateCounsellor {
                counsellor_id: id.clone(),
            },
            ("approve-request", [counsellor, request]) => Self::ApproveRequest {
                counsellor_id: counsellor.clone(),
                request_id: request.clone(),
            },
            ("reject-request", [counsellor, request]) => Self::RejectRequest {
                counsellor_id: counsellor.clone(),
                request_id: request.clone(),
            },
            ("notifications", [account]) => Self::Notifications {
                account: account.parse()?,
            },
            (other, _) => {
                return Err(AppError::BadRequest(format!(
                    "unknown command or wrong arguments: {other}"
                )));
            }
        };

        Ok(command)
    }

    /// Whether the command needs the schema to be current before it runs.
    #[must_use]
    pub const fn needs_schema(&self) -> bool {
        !matches!(self, Self::Migrate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(["migrate"]).unwrap(), Command::Migrate);
        assert_eq!(Command::parse(["seed"]).unwrap(), Command::Seed);
        assert!(!Command::Migrate.needs_schema());
        assert!(Command::Seed.needs_schema());
    }

    #[test]
    fn test_parse_match_joins_words() {
        let cmd = Command::parse(["match", "software,", "marketing"]).unwrap();
        assert_eq!(
            cmd,
            Command::Match {
                interests: "software, marketing".to_string()
            }
        );
    }

    #[test]
    fn test_parse_counsellor_deactivation() {
        let cmd = Command::parse(["deactivate-counsellor", "c1", "c2"]).unwrap();
        assert_eq!(
            cmd,
            Command::DeactivateCounsellor {
                counsellor_id: "c1".to_string(),
                replacement_id: "c2".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_notifications_account() {
        let cmd = Command::parse(["notifications", "counsellor-01ABC"]).unwrap();
        assert_eq!(
            cmd,
            Command::Notifications {
                account: AccountRef::counsellor("01ABC")
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse(Vec::<String>::new()).is_err());
        assert!(Command::parse(["deactivate-counsellor", "c1"]).is_err());
        assert!(Command::parse(["match"]).is_err());
        assert!(Command::parse(["notifications", "mentor-1"]).is_err());
        assert!(Command::parse(["serve"]).is_err());
    }
}
