//! Helpers shared by the integration tests of the workspace.
//!
//! - [`TestDatabase`]: throwaway PostgreSQL container (feature `postgres`, needs Docker)
//! - [`TestDataBuilder`]: emails and usernames that never collide across tests
//! - [`assertions`]: panicking helpers with readable messages

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic user data keyed by a seed.
///
/// The same test name always yields the same values, and two tests sharing one
/// database never ask for the same email or username.
#[derive(Clone, Copy, Debug)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of `name`
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).email("main"), "test-7-main@example.com");
    /// ```
    pub fn email(&self, suffix: &str) -> String {
        format!("test-{}-{}@example.com", self.seed, suffix)
    }

    /// A valid username: at most 30 characters for suffixes up to 12 characters
    pub fn username(&self, suffix: &str) -> String {
        format!("u{:x}_{}", self.seed, suffix)
    }

    /// Display name within the 100 character limit
    pub fn full_name(&self, suffix: &str) -> String {
        format!("Test User {:x} {}", self.seed, suffix)
    }
}

/// Assertion helpers that name what was being checked when they panic
pub mod assertions {
    use std::fmt::Debug;

    pub fn assert_id_eq(actual: i64, expected: i64, context: &str) {
        assert_eq!(actual, expected, "{}: expected id {}, got {}", context, expected, actual);
    }

    /// Unwrap `value`, panicking with `context`
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// The error inside `result`, panicking with `context` on `Ok`
    pub fn assert_err<T: Debug, E>(result: Result<T, E>, context: &str) -> E {
        match result {
            Ok(value) => panic!("{}: expected Err, got Ok({:?})", context, value),
            Err(err) => err,
        }
    }

    /// Exactly one of `results` is `Ok`; returns how many lost
    pub fn assert_single_winner<T, E>(results: &[Result<T, E>], context: &str) -> usize {
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(
            wins,
            1,
            "{}: expected exactly one success out of {}, got {}",
            context,
            results.len(),
            wins
        );
        results.len() - wins
    }
}
