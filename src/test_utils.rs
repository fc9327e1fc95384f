// SPDX-License-Identifier: MPL-2.0
//! Test utilities: timing assertions and a recording visual backend.
//!
//! [`RecordingMount`] hands out visuals that only sleep for their configured
//! animation speed and write every call into a shared [`Journal`], so tests
//! can check when each step of an action started.

use crate::config::NotifierConfig;
use crate::notifications::{Notification, NotificationId};
use crate::visual::{Mount, NotificationVisual, VisualEvents};
use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Slack allowed between an expected and a measured duration.
pub const DURATION_TOLERANCE: Duration = Duration::from_millis(2);

/// Asserts two durations are equal within [`DURATION_TOLERANCE`].
#[track_caller]
pub fn assert_duration_close(actual: Duration, expected: Duration) {
    let difference = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        difference <= DURATION_TOLERANCE,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

/// A call made on a visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Show,
    Hide,
    Shift { make_place: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: String,
    pub call: Call,
    /// Time since the journal's origin.
    pub at: Duration,
}

#[derive(Debug)]
struct JournalState {
    origin: Instant,
    entries: Vec<Entry>,
    events: HashMap<NotificationId, VisualEvents>,
}

/// Shared log of visual calls.
#[derive(Debug, Clone)]
pub struct Journal {
    state: Arc<Mutex<JournalState>>,
}

impl Journal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(JournalState {
                origin: Instant::now(),
                entries: Vec::new(),
                events: HashMap::new(),
            })),
        }
    }

    /// Clears the log and restarts the clock.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.origin = Instant::now();
        state.entries.clear();
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries.clone()
    }

    /// Calls made on `id`, in order.
    pub fn calls(&self, id: &str) -> Vec<Call> {
        self.lock()
            .entries
            .iter()
            .filter(|entry| entry.id == id)
            .map(|entry| entry.call)
            .collect()
    }

    /// When `call` was first made on `id`.
    #[track_caller]
    pub fn started(&self, id: &str, call: Call) -> Duration {
        self.lock()
            .entries
            .iter()
            .find(|entry| entry.id == id && entry.call == call)
            .map(|entry| entry.at)
            .unwrap_or_else(|| panic!("{:?} was never called on {}", call, id))
    }

    /// Time since the origin.
    pub fn elapsed(&self) -> Duration {
        self.lock().origin.elapsed()
    }

    /// Event handle given to the visual of `id`.
    pub fn events(&self, id: &str) -> Option<VisualEvents> {
        self.lock().events.get(&NotificationId::from(id)).cloned()
    }

    fn record(&self, id: &NotificationId, call: Call) {
        let mut state = self.lock();
        let at = state.origin.elapsed();
        state.entries.push(Entry {
            id: id.to_string(),
            call,
            at,
        });
    }

    fn lock(&self) -> MutexGuard<'_, JournalState> {
        self.state.lock().unwrap()
    }
}

/// Visual sleeping through its animations and recording every call.
#[derive(Debug)]
pub struct RecordingVisual {
    id: NotificationId,
    journal: Journal,
    height: f32,
    show: Duration,
    hide: Duration,
    shift: Duration,
    offset: Mutex<f32>,
}

fn pause(duration: Duration) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        if !duration.is_zero() {
            sleep(duration).await;
        }
    })
}

impl NotificationVisual for RecordingVisual {
    fn show(&self) -> BoxFuture<'static, ()> {
        self.journal.record(&self.id, Call::Show);
        pause(self.show)
    }

    fn hide(&self) -> BoxFuture<'static, ()> {
        self.journal.record(&self.id, Call::Hide);
        pause(self.hide)
    }

    fn shift(&self, distance: f32, make_place: bool) -> BoxFuture<'static, ()> {
        self.journal.record(&self.id, Call::Shift { make_place });
        let mut offset = self.offset.lock().unwrap();
        if make_place {
            *offset += distance;
        } else {
            *offset -= distance;
        }
        pause(self.shift)
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn width(&self) -> f32 {
        0.0
    }

    fn shift_offset(&self) -> f32 {
        *self.offset.lock().unwrap()
    }
}

/// Mount producing [`RecordingVisual`]s timed from the config.
#[derive(Debug)]
pub struct RecordingMount {
    journal: Journal,
    config: Arc<NotifierConfig>,
    height: f32,
}

impl RecordingMount {
    pub fn new(journal: Journal, config: Arc<NotifierConfig>, height: f32) -> Self {
        Self {
            journal,
            config,
            height,
        }
    }
}

impl Mount for RecordingMount {
    fn mount(
        &self,
        notification: &Notification,
        events: VisualEvents,
    ) -> BoxFuture<'static, Arc<dyn NotificationVisual>> {
        let config = &self.config;
        let speed = |animated: bool, millis: u64| {
            if animated {
                Duration::from_millis(millis)
            } else {
                Duration::ZERO
            }
        };
        let visual = RecordingVisual {
            id: notification.id().clone(),
            journal: self.journal.clone(),
            height: self.height,
            show: speed(config.animates_show(), config.animations.show.speed),
            hide: speed(config.animates_hide(), config.animations.hide.speed),
            shift: speed(config.animates_shift(), config.animations.shift.speed),
            offset: Mutex::new(0.0),
        };
        self.journal
            .lock()
            .events
            .insert(notification.id().clone(), events);

        Box::pin(async move { Arc::new(visual) as Arc<dyn NotificationVisual> })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_tolerance_accepts_small_drift() {
        assert_duration_close(Duration::from_millis(301), Duration::from_millis(300));
        assert_duration_close(Duration::from_millis(299), Duration::from_millis(300));
    }

    #[test]
    #[should_panic(expected = "expected")]
    fn duration_tolerance_rejects_large_drift() {
        assert_duration_close(Duration::from_millis(310), Duration::from_millis(300));
    }
}
