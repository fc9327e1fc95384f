// SPDX-License-Identifier: MPL-2.0
//! Composition of animation steps.
//!
//! A step is created lazily: its closure is only called once the step is due,
//! which is the moment the visual's animation actually starts.

use futures_util::future::{join_all, BoxFuture};
use std::time::Duration;
use tokio::time::sleep;

/// A not-yet-started step.
pub(crate) type Step = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// A step together with how long its animation runs.
pub(crate) struct Stage {
    duration: Duration,
    step: Step,
}

impl Stage {
    pub(crate) fn new<F>(duration: Duration, step: F) -> Self
    where
        F: FnOnce() -> BoxFuture<'static, ()> + Send + 'static,
    {
        Self {
            duration,
            step: Box::new(step),
        }
    }
}

/// How consecutive stages relate in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sequencing {
    /// Everything starts at once.
    Concurrent,
    /// Each stage starts once the previous one settled.
    Sequential,
    /// Each stage starts `overlap` before the previous ones would have ended.
    Overlapping(Duration),
}

/// Runs `stages` per `sequencing`; resolves once every stage settled.
pub(crate) async fn run(sequencing: Sequencing, stages: Vec<Stage>) {
    match sequencing {
        Sequencing::Concurrent => {
            join_all(stages.into_iter().map(|stage| (stage.step)())).await;
        }
        Sequencing::Sequential => {
            for stage in stages {
                (stage.step)().await;
            }
        }
        Sequencing::Overlapping(overlap) => {
            // Stage k starts at (sum of earlier durations) - overlap; the first at 0
            let mut elapsed = Duration::ZERO;
            let mut scheduled = Vec::with_capacity(stages.len());
            for (index, stage) in stages.into_iter().enumerate() {
                let start = if index == 0 {
                    Duration::ZERO
                } else {
                    elapsed.saturating_sub(overlap)
                };
                elapsed += stage.duration;
                scheduled.push((start, stage.step));
            }
            staggered(scheduled).await;
        }
    }
}

/// Starts every step after its own delay; resolves once all settled.
pub(crate) async fn staggered(steps: Vec<(Duration, Step)>) {
    join_all(steps.into_iter().map(|(delay, step)| delayed(delay, step))).await;
}

async fn delayed(delay: Duration, step: Step) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
    step().await;
}
