//! Shared test utilities
//!
//! - `TestDatabase`: migrated PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: deterministic names, emails and ids derived from the test name
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let email = builder.email("primary");
//!     let name = builder.name("user", "primary");
//! }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data seeded from the test name, so reruns produce the same values
/// and different tests do not collide on unique columns.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// assert_eq!(builder.email("a"), TestDataBuilder::from_test_name("test_create_user").email("a"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic id that is never assigned by the service (useful for not-found cases)
    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// `{suffix}.{seed}@example.com`
    pub fn email(&self, suffix: &str) -> String {
        format!("{}.{}@example.com", suffix, self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.name("user", "main"), b.name("user", "main"));
        assert_eq!(a.email("main"), "main.42@example.com");
    }

    #[test]
    fn test_data_builder_different_names() {
        let a = TestDataBuilder::from_test_name("test1");
        let b = TestDataBuilder::from_test_name("test2");

        assert_ne!(a.user_id(), b.user_id());
        assert_ne!(a.email("x"), b.email("x"));
    }

    #[test]
    fn test_assert_some_returns_inner_value() {
        assert_eq!(assertions::assert_some(Some(3), "value"), 3);
    }
}
