//! # todosync testing
//!
//! Testing utilities and helpers for reducers built on `todosync-core`.
//!
//! This crate provides:
//! - [`FixedClock`]: a deterministic `Clock`
//! - [`ReducerTest`]: a Given/When/Then builder for reducer unit tests
//! - [`run_effects`]: executes effect descriptions without a `Store` and
//!   collects the actions they produce
//!
//! ## Example
//!
//! ```ignore
//! use todosync_testing::{run_effects, test_clock};
//!
//! #[tokio::test]
//! async fn add_todo_round_trip() {
//!     let env = test_environment();
//!     let mut state = TodoState::default();
//!
//!     let effects = TodoReducer.reduce(&mut state, TodoAction::AddTodo { title: "Milk".into() }, &env);
//!     let produced = run_effects(effects).await;
//!     assert!(matches!(produced[0], TodoAction::TodoAdded { .. }));
//! }
//! ```

use chrono::{DateTime, Utc};
use todosync_core::environment::Clock;

/// Fluent Given/When/Then reducer tests
pub mod reducer_test;

/// Effect execution for tests
pub mod effects;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todosync_testing::mocks::FixedClock;
    /// use todosync_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }
}

// Re-export commonly used items
pub use effects::{run_effect, run_effects};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_clock_is_new_year_2025() {
        assert_eq!(test_clock().now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }
}
