//! Shared building blocks for the counselhub crates.
//!
//! [`Config`] is read once at start-up and handed down; [`AppError`] is the
//! single error type every repository and service returns, and
//! [`ErrorCategory`] is how callers are expected to branch on it. Primary
//! keys come from [`IdGenerator`].
//!
//! ```no_run
//! use counselhub_common::{AppError, Config, ErrorCategory};
//!
//! let config = Config::load().map_err(AppError::from);
//! match config {
//!     Ok(config) => println!("database at {}", config.database.url),
//!     Err(e) => assert_eq!(e.category(), ErrorCategory::Transaction),
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorCategory};
pub use id::IdGenerator;
