//! Declarative macros for ergonomic effect construction
//!
//! Reducers in the todo client build almost every effect from one of two
//! shapes: an async remote call that maps its result to a feedback action,
//! or a timer that dispatches an action later.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```
/// use todosync_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum Action {
///     Loaded { count: usize },
/// }
///
/// let effect: Effect<Action> = async_effect! {
///     Some(Action::Loaded { count: 3 })
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```
/// use todosync_core::{delay, effect::Effect};
/// use std::time::Duration;
///
/// #[derive(Debug)]
/// enum Action {
///     ErrorExpired { generation: u64 },
/// }
///
/// let effect = delay! {
///     duration: Duration::from_secs(3),
///     action: Action::ErrorExpired { generation: 1 }
/// };
/// assert!(matches!(effect, Effect::Delay { .. }));
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
