// SPDX-License-Identifier: MPL-2.0
//! Action queue serializing every notifier mutation.
//!
//! API calls are not processed right away. They are queued and emitted one at
//! a time on the action stream; the next action is only emitted after the
//! consumer reports the current one finished via [`ActionQueue::continue_next`].
//! Since handling an action includes waiting for its animations, two actions
//! never touch the notification list at the same time.

use super::action::Action;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, Notify};

/// Receiving end of the queue: yields one action at a time.
pub type ActionStream = mpsc::UnboundedReceiver<Action>;

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<Action>,
    in_progress: bool,
}

/// FIFO of actions with at most one action in flight.
#[derive(Debug)]
pub struct ActionQueue {
    state: Mutex<QueueState>,
    stream: mpsc::UnboundedSender<Action>,
    /// Woken whenever the queue runs dry.
    idle: Notify,
}

impl ActionQueue {
    /// Creates a queue together with the stream its actions are emitted on.
    #[must_use]
    pub fn new() -> (Self, ActionStream) {
        let (stream, actions) = mpsc::unbounded_channel();
        let queue = Self {
            state: Mutex::new(QueueState::default()),
            stream,
            idle: Notify::new(),
        };
        (queue, actions)
    }

    /// Appends an action and emits it right away if nothing is in flight.
    pub fn push(&self, action: Action) {
        let mut state = self.lock();
        tracing::trace!(action = action.kind(), queued = state.pending.len(), "Action pushed");
        state.pending.push_back(action);
        self.try_run_next(&mut state);
    }

    /// Marks the in-flight action as finished and emits the next one, if any.
    ///
    /// Must be called exactly once per emitted action. Calling it while
    /// nothing is in flight only attempts an emission.
    pub fn continue_next(&self) {
        let mut state = self.lock();
        state.in_progress = false;
        self.try_run_next(&mut state);
        if !state.in_progress {
            self.idle.notify_waiters();
        }
    }

    /// Resolves once no action is in flight and none is pending.
    pub async fn idle(&self) {
        loop {
            let notified = self.idle.notified();
            if !self.is_action_in_progress() {
                return;
            }
            notified.await;
        }
    }

    /// Number of actions waiting behind the in-flight one.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Whether an action has been emitted and not yet continued.
    #[must_use]
    pub fn is_action_in_progress(&self) -> bool {
        self.lock().in_progress
    }

    fn try_run_next(&self, state: &mut QueueState) {
        if state.in_progress {
            return;
        }
        let Some(action) = state.pending.pop_front() else {
            return;
        };

        state.in_progress = true;
        if let Err(mpsc::error::SendError(action)) = self.stream.send(action) {
            // Nobody consumes the stream anymore.
            tracing::warn!(action = action.kind(), "Action stream closed, dropping action");
            state.in_progress = false;
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
