//! Row identifiers.
//!
//! Every primary key is a lowercase ULID. Ids handed out by one process are
//! strictly increasing, so rows written within the same millisecond (a
//! cascade's notifications, say) still sort in creation order when a query
//! breaks `created_at` ties by id.

use std::sync::{LazyLock, Mutex, PoisonError};

use ulid::{Generator, Ulid};

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::new()));

/// Hands out row ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Next id, 26 lowercase characters.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut generator = GENERATOR.lock().unwrap_or_else(PoisonError::into_inner);
        // Overflow needs 2^80 ids in one millisecond; a fresh random id is fine then.
        let ulid = generator.generate().unwrap_or_else(|_| Ulid::new());
        ulid.to_string().to_lowercase()
    }
}
