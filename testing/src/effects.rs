//! Run effect descriptions to completion without a `Store`
//!
//! Reducer tests usually want to know which actions the returned effects
//! would feed back. These helpers execute the effects in place:
//!
//! - `Future` is awaited
//! - `Parallel` is joined; produced actions keep the declared order
//! - `Sequential` runs in order
//! - `Delay` resolves immediately to its action (time is skipped)

use futures::future::{BoxFuture, join_all};
use todosync_core::effect::Effect;

/// Execute one effect and collect every action it produces
pub fn run_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
    Box::pin(async move {
        match effect {
            Effect::None => Vec::new(),
            Effect::Future(fut) => fut.await.into_iter().collect(),
            Effect::Delay { action, .. } => vec![*action],
            Effect::Parallel(effects) => join_all(effects.into_iter().map(run_effect))
                .await
                .into_iter()
                .flatten()
                .collect(),
            Effect::Sequential(effects) => {
                let mut produced = Vec::new();
                for effect in effects {
                    produced.extend(run_effect(effect).await);
                }
                produced
            },
        }
    })
}

/// Execute a batch of effects (as returned by a reducer) in order
pub async fn run_effects<A, I>(effects: I) -> Vec<A>
where
    A: Send + 'static,
    I: IntoIterator<Item = Effect<A>>,
{
    let mut produced = Vec::new();
    for effect in effects {
        produced.extend(run_effect(effect).await);
    }
    produced
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn parallel_keeps_declared_order() {
        let effect = Effect::Parallel(vec![
            Effect::Future(Box::pin(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(1)
            })),
            Effect::Future(Box::pin(async { Some(2) })),
            Effect::Future(Box::pin(async { None })),
        ]);

        assert_eq!(run_effect(effect).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn delay_resolves_without_waiting() {
        let effect = Effect::Delay {
            duration: Duration::from_secs(3600),
            action: Box::new(9),
        };

        let produced = tokio::time::timeout(Duration::from_secs(1), run_effect(effect)).await;
        assert_eq!(produced.ok(), Some(vec![9]));
    }

    #[tokio::test]
    async fn batch_flattens_nested_groups() {
        let effects = vec![
            Effect::None,
            Effect::Sequential(vec![
                Effect::Future(Box::pin(async { Some(3) })),
                Effect::Parallel(vec![Effect::Future(Box::pin(async { Some(4) }))]),
            ]),
        ];

        assert_eq!(run_effects(effects).await, vec![3, 4]);
    }
}
