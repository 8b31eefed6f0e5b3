//! Panic-isolated entity updates.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use voxcull_entity::{BehaviorContext, Brain};

/// Result of one guarded update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Keep,
    /// The behavior returned `false`.
    Retire,
    /// The behavior panicked.
    Crashed,
}

impl Outcome {
    pub(crate) const fn removes(self) -> bool {
        !matches!(self, Self::Keep)
    }
}

/// Run `brain` once, catching panics. Returns the outcome and, when
/// `timed` is set, how long the call took.
pub(crate) fn run(
    brain: &mut Brain,
    ctx: &mut BehaviorContext<'_>,
    dt: f32,
    timed: bool,
) -> (Outcome, Option<Duration>) {
    let start = timed.then(Instant::now);
    let result = catch_unwind(AssertUnwindSafe(|| brain.update(ctx, dt)));
    let elapsed = start.map(|s| s.elapsed());

    let outcome = match result {
        Ok(true) => Outcome::Keep,
        Ok(false) => Outcome::Retire,
        Err(payload) => {
            tracing::error!("entity update panicked: {}", panic_message(payload.as_ref()));
            Outcome::Crashed
        }
    };
    (outcome, elapsed)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}
