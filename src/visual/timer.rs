// SPDX-License-Identifier: MPL-2.0
//! Pausable auto-hide timer.
//!
//! Each notification visual owns its own timer, so timers of different
//! notifications run independently. Pausing records how much time is left;
//! resuming schedules a fresh sleep for exactly that remainder.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct TimerState {
    remaining: Duration,
    /// Set while the countdown is running.
    resumed_at: Option<Instant>,
    task: Option<JoinHandle<()>>,
    finish: Option<oneshot::Sender<()>>,
    /// Bumped whenever the running countdown is cancelled or replaced.
    generation: u64,
}

impl TimerState {
    fn abort(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Completes the countdown of `generation`, unless it was cancelled
    /// after its sleep elapsed.
    fn expire(&mut self, generation: u64) -> Option<oneshot::Sender<()>> {
        if self.generation != generation {
            return None;
        }
        self.resumed_at = None;
        self.remaining = Duration::ZERO;
        self.task = None;
        self.finish.take()
    }
}

/// Countdown with start / pause / resume / stop.
///
/// Must be driven from within a Tokio runtime.
#[derive(Debug, Default)]
pub struct Timer {
    state: Arc<Mutex<TimerState>>,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a countdown of `duration`, replacing any previous one.
    ///
    /// The receiver resolves with `Ok(())` when the countdown expires and
    /// with an error if the timer is stopped (or restarted) first.
    pub fn start(&self, duration: Duration) -> oneshot::Receiver<()> {
        let (finish, expired) = oneshot::channel();
        let mut state = lock(&self.state);
        state.abort();
        state.remaining = duration;
        state.resumed_at = None;
        state.finish = Some(finish);
        self.run(&mut state);
        expired
    }

    /// Pauses the countdown, keeping the remaining time.
    pub fn pause(&self) {
        let mut state = lock(&self.state);
        state.abort();
        if let Some(resumed_at) = state.resumed_at.take() {
            state.remaining = state.remaining.saturating_sub(resumed_at.elapsed());
        }
    }

    /// Continues a paused countdown with its remaining time.
    pub fn resume(&self) {
        let mut state = lock(&self.state);
        if state.resumed_at.is_none() {
            self.run(&mut state);
        }
    }

    /// Stops the countdown for good; its receiver never sees an expiry.
    pub fn stop(&self) {
        let mut state = lock(&self.state);
        state.abort();
        state.remaining = Duration::ZERO;
        state.resumed_at = None;
        state.finish = None;
    }

    /// Time left on the countdown, as of now.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let state = lock(&self.state);
        match state.resumed_at {
            Some(resumed_at) => state.remaining.saturating_sub(resumed_at.elapsed()),
            None => state.remaining,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.state).resumed_at.is_some()
    }

    fn run(&self, state: &mut TimerState) {
        if state.finish.is_none() {
            return;
        }
        state.resumed_at = Some(Instant::now());

        let remaining = state.remaining;
        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        state.task = Some(tokio::spawn(async move {
            tokio::time::sleep(remaining).await;
            let finish = lock(&shared).expire(generation);
            if let Some(finish) = finish {
                let _ = finish.send(());
            }
        }));
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        lock(&self.state).abort();
    }
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
