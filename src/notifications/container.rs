// SPDX-License-Identifier: MPL-2.0
//! Consumer of the action stream and owner of the active notification list.
//!
//! The list is ordered oldest first, which is also the visual stacking order.
//! It is only ever touched from inside an action handler, and the queue never
//! emits an action before the previous one settled, so no locking is needed.
//!
//! Showing a notification with siblings already on screen takes up to three
//! steps: hide the oldest (if the stack overflows), shift the others out of
//! the way, then show the new one. How these steps overlap in time depends on
//! the animation config:
//!
//! - animations disabled: all steps start at once
//! - no overlap: each step starts once the previous one finished
//! - overlap: each step starts `overlap` ms before the previous ones end

use super::action::{Action, CustomAction, CustomActionEvent};
use super::notification::{Notification, NotificationId, NotificationOptions};
use super::queue::{ActionQueue, ActionStream};
use super::staging::{self, Sequencing, Stage, Step};
use crate::config::{NotifierConfig, VerticalPosition, MIN_STACKING};
use crate::visual::{Mount, NotificationVisual, VisualEvents};
use futures_util::future::{join_all, BoxFuture};
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Stateful consumer of the action queue.
///
/// Created by [`Notifier::new`](super::Notifier::new); drive it with
/// [`Container::run`].
pub struct Container {
    config: Arc<NotifierConfig>,
    queue: Arc<ActionQueue>,
    actions: ActionStream,
    mount: Arc<dyn Mount>,
    notifications: Vec<Notification>,
    custom_actions: mpsc::UnboundedSender<CustomActionEvent>,
    active: watch::Sender<Vec<NotificationId>>,
}

impl Container {
    pub(crate) fn new(
        config: Arc<NotifierConfig>,
        queue: Arc<ActionQueue>,
        actions: ActionStream,
        mount: Arc<dyn Mount>,
        custom_actions: mpsc::UnboundedSender<CustomActionEvent>,
        active: watch::Sender<Vec<NotificationId>>,
    ) -> Self {
        Self {
            config,
            queue,
            actions,
            mount,
            notifications: Vec::new(),
            custom_actions,
            active,
        }
    }

    /// Active notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Handles actions as the queue emits them.
    ///
    /// Each action is run to completion before the queue is told to continue.
    /// Resolves once the action stream closes.
    pub async fn run(mut self) {
        while let Some(action) = self.actions.recv().await {
            self.handle(action).await;
            self.queue.continue_next();
        }
        tracing::debug!("Action stream closed");
    }

    /// Runs a single action to completion.
    pub async fn handle(&mut self, action: Action) {
        let kind = action.kind();
        tracing::debug!(action = kind, active = self.notifications.len(), "Handling action");

        match action {
            Action::Show(options) => self.show(options).await,
            Action::Hide(id) => self.hide(&id).await,
            Action::HideOldest => self.hide_oldest().await,
            Action::HideNewest => self.hide_newest().await,
            Action::HideAll => self.hide_all().await,
            Action::CustomAction(action) => self.custom_action(action).await,
        }

        tracing::debug!(action = kind, active = self.notifications.len(), "Action settled");
    }

    async fn show(&mut self, options: NotificationOptions) {
        let notification = Notification::new(options);
        let id = notification.id().clone();
        if self.index_of(&id).is_some() {
            tracing::warn!(%id, "Showing a notification with an ID already in use");
        }

        let events = VisualEvents::new(id, Arc::clone(&self.queue));
        let ready = self.mount.mount(&notification, events);
        self.notifications.push(notification);
        self.publish();

        // Stacking decisions need the rendered height, so wait for the visual
        let visual = ready.await;
        if let Some(newest) = self.notifications.last_mut() {
            newest.attach(Arc::clone(&visual));
        }
        self.stack(visual).await;
    }

    /// Makes room for the newest notification and shows it.
    async fn stack(&mut self, visual: Arc<dyn NotificationVisual>) {
        let count = self.notifications.len();
        if count == 1 {
            visual.show().await;
            return;
        }

        let stacking = self.config.behaviour.stacking;
        let Some(limit) = stacking.filter(|limit| *limit >= MIN_STACKING) else {
            // Single-visible mode: the previous notification goes first
            if let Some(previous) = self.visual_at(0) {
                previous.hide().await;
            }
            let replaced = self.notifications.remove(0);
            tracing::debug!(id = %replaced.id(), "Replaced by newer notification");
            self.publish();
            visual.show().await;
            return;
        };

        let overflow = count > limit;
        let older = if overflow { 1..count - 1 } else { 0..count - 1 };
        let older = self.visuals(older);
        let height = visual.height();

        let mut stages = Vec::with_capacity(3);
        if overflow {
            if let Some(oldest) = self.visual_at(0) {
                stages.push(Stage::new(self.config.hide_speed(), move || oldest.hide()));
            }
        }
        stages.push(Stage::new(self.config.shift_speed(), move || {
            shift_all(older, height, true)
        }));
        stages.push(Stage::new(self.show_speed(), move || visual.show()));

        staging::run(self.sequencing(self.config.animations.enabled), stages).await;

        if overflow {
            let evicted = self.notifications.remove(0);
            tracing::debug!(id = %evicted.id(), limit, "Evicted oldest notification");
            self.publish();
        }
    }

    async fn hide(&mut self, id: &NotificationId) {
        let Some(index) = self.index_of(id) else {
            tracing::debug!(%id, "Nothing to hide");
            return;
        };

        if let Some(target) = self.visual_at(index) {
            let older = self.visuals(0..index);
            let height = target.height();

            let mut stages = vec![Stage::new(self.config.hide_speed(), move || target.hide())];
            if !older.is_empty() {
                stages.push(Stage::new(self.config.shift_speed(), move || {
                    shift_all(older, height, false)
                }));
            }
            staging::run(self.sequencing(self.config.animates_hide()), stages).await;
        }

        self.notifications.remove(index);
        self.publish();
    }

    async fn hide_oldest(&mut self) {
        match self.notifications.first() {
            Some(oldest) => {
                let id = oldest.id().clone();
                self.hide(&id).await;
            }
            None => tracing::debug!("No notification to hide"),
        }
    }

    async fn hide_newest(&mut self) {
        match self.notifications.last() {
            Some(newest) => {
                let id = newest.id().clone();
                self.hide(&id).await;
            }
            None => tracing::debug!("No notification to hide"),
        }
    }

    async fn hide_all(&mut self) {
        let count = self.notifications.len();
        if count == 0 {
            tracing::debug!("No notification to hide");
            return;
        }

        let visuals = self.visuals(0..count);
        let offset = self
            .config
            .hide_offset()
            .filter(|_| self.config.animates_hide());

        match offset {
            Some(offset) => {
                // The notification furthest from the anchor edge goes first
                let top = self.config.position.vertical.position == VerticalPosition::Top;
                let steps: Vec<(Duration, Step)> = visuals
                    .into_iter()
                    .enumerate()
                    .rev()
                    .map(|(index, visual)| {
                        let rank = if top { count - 1 - index } else { index };
                        let delay = offset.saturating_mul(u32::try_from(rank).unwrap_or(u32::MAX));
                        let step: Step = Box::new(move || visual.hide());
                        (delay, step)
                    })
                    .collect();
                staging::staggered(steps).await;
            }
            None => {
                join_all(visuals.iter().rev().map(|visual| visual.hide())).await;
            }
        }

        self.notifications.clear();
        self.publish();
    }

    async fn custom_action(&mut self, action: CustomAction) {
        let id = action.notification_id.clone();
        tracing::debug!(%id, name = %action.action_name, "Custom action");
        if self.custom_actions.send(CustomActionEvent::from(action)).is_err() {
            tracing::debug!(%id, "No subscriber for custom actions");
        }
        self.hide(&id).await;
    }

    fn sequencing(&self, animated: bool) -> Sequencing {
        if !animated {
            return Sequencing::Concurrent;
        }
        match self.config.overlap() {
            Some(overlap) => Sequencing::Overlapping(overlap),
            None => Sequencing::Sequential,
        }
    }

    fn show_speed(&self) -> Duration {
        Duration::from_millis(self.config.animations.show.speed)
    }

    fn index_of(&self, id: &NotificationId) -> Option<usize> {
        self.notifications
            .iter()
            .position(|notification| notification.id() == id)
    }

    fn visual_at(&self, index: usize) -> Option<Arc<dyn NotificationVisual>> {
        self.notifications.get(index)?.visual().cloned()
    }

    fn visuals(&self, range: Range<usize>) -> Vec<Arc<dyn NotificationVisual>> {
        self.notifications[range]
            .iter()
            .filter_map(|notification| notification.visual().cloned())
            .collect()
    }

    fn publish(&self) {
        let ids = self
            .notifications
            .iter()
            .map(|notification| notification.id().clone())
            .collect();
        self.active.send_replace(ids);
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}

/// Shifts every visual at once, newest first.
fn shift_all(
    visuals: Vec<Arc<dyn NotificationVisual>>,
    distance: f32,
    make_place: bool,
) -> BoxFuture<'static, ()> {
    Box::pin(async move {
        join_all(
            visuals
                .iter()
                .rev()
                .map(|visual| visual.shift(distance, make_place)),
        )
        .await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_duration_close, Call, Journal, RecordingMount};
    use tokio::time::Instant;

    struct Harness {
        container: Container,
        journal: Journal,
        custom_actions: mpsc::UnboundedReceiver<CustomActionEvent>,
        active: watch::Receiver<Vec<NotificationId>>,
    }

    fn harness(config: NotifierConfig) -> Harness {
        let config = Arc::new(config);
        let journal = Journal::new();
        let mount = RecordingMount::new(journal.clone(), Arc::clone(&config), 40.0);
        let (queue, actions) = ActionQueue::new();
        let (custom_tx, custom_actions) = mpsc::unbounded_channel();
        let (active_tx, active) = watch::channel(Vec::new());
        let container = Container::new(
            config,
            Arc::new(queue),
            actions,
            Arc::new(mount),
            custom_tx,
            active_tx,
        );
        Harness {
            container,
            journal,
            custom_actions,
            active,
        }
    }

    fn show(id: &str) -> Action {
        Action::Show(NotificationOptions::new("info").with_id(id))
    }

    fn hide(id: &str) -> Action {
        Action::Hide(NotificationId::from(id))
    }

    fn ids(container: &Container) -> Vec<&str> {
        container
            .notifications()
            .iter()
            .map(|notification| notification.id().as_str())
            .collect()
    }

    fn quiet() -> NotifierConfig {
        let mut config = NotifierConfig::default();
        config.behaviour.auto_hide = None;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn first_show_just_shows() {
        let mut h = harness(quiet());
        h.container.handle(show("a")).await;

        assert_eq!(ids(&h.container), ["a"]);
        assert_eq!(h.journal.calls("a"), [Call::Show]);
        assert_eq!(h.active.borrow().len(), 1);
        assert!(h.container.notifications()[0].visual().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn second_show_overlaps_shift_and_show() {
        let mut h = harness(quiet());
        h.container.handle(show("a")).await;
        h.journal.reset();

        h.container.handle(show("b")).await;

        let shift = h.journal.started("a", Call::Shift { make_place: true });
        let show = h.journal.started("b", Call::Show);
        assert_duration_close(shift, Duration::ZERO);
        // shift speed 300 - overlap 150
        assert_duration_close(show, Duration::from_millis(150));
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(450));
    }

    #[tokio::test(start_paused = true)]
    async fn overflow_hides_shifts_and_shows_with_overlap() {
        let mut config = quiet();
        config.behaviour.stacking = Some(2);
        let mut h = harness(config);
        h.container.handle(show("a")).await;
        h.container.handle(show("b")).await;
        h.journal.reset();

        h.container.handle(show("c")).await;

        assert_duration_close(h.journal.started("a", Call::Hide), Duration::ZERO);
        assert_duration_close(
            h.journal.started("b", Call::Shift { make_place: true }),
            Duration::from_millis(150),
        );
        assert_duration_close(h.journal.started("c", Call::Show), Duration::from_millis(450));
        // The evicted notification is not shifted
        assert!(!h.journal.calls("a").contains(&Call::Shift { make_place: true }));
        assert_eq!(ids(&h.container), ["b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_overlap_runs_steps_sequentially() {
        let mut config = quiet();
        config.animations.overlap = None;
        config.behaviour.stacking = Some(2);
        let mut h = harness(config);
        h.container.handle(show("a")).await;
        h.container.handle(show("b")).await;
        h.journal.reset();

        h.container.handle(show("c")).await;

        assert_duration_close(h.journal.started("a", Call::Hide), Duration::ZERO);
        assert_duration_close(
            h.journal.started("b", Call::Shift { make_place: true }),
            Duration::from_millis(300),
        );
        assert_duration_close(h.journal.started("c", Call::Show), Duration::from_millis(600));
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(900));
    }

    #[test]
    fn zero_overlap_means_sequential() {
        let mut config = quiet();
        config.animations.overlap = Some(0);
        let h = harness(config);

        assert_eq!(h.container.sequencing(true), Sequencing::Sequential);
        assert_eq!(h.container.sequencing(false), Sequencing::Concurrent);
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_animations_start_everything_at_once() {
        let mut config = quiet();
        config.animations.enabled = false;
        config.behaviour.stacking = Some(2);
        let mut h = harness(config);
        for id in ["a", "b", "c"] {
            h.container.handle(show(id)).await;
        }

        assert_eq!(h.journal.elapsed(), Duration::ZERO);
        assert_eq!(ids(&h.container), ["b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stacking_cap_evicts_fifo() {
        let mut h = harness(quiet());
        for id in ["a", "b", "c", "d", "e", "f"] {
            h.container.handle(show(id)).await;
            assert!(h.container.notifications().len() <= 4);
        }
        assert_eq!(ids(&h.container), ["c", "d", "e", "f"]);
    }

    #[tokio::test(start_paused = true)]
    async fn single_visible_mode_replaces_previous() {
        let mut config = quiet();
        config.behaviour.stacking = None;
        let mut h = harness(config);
        h.container.handle(show("a")).await;
        h.journal.reset();

        h.container.handle(show("b")).await;

        assert_eq!(ids(&h.container), ["b"]);
        // Hide, then show, without overlap
        assert_duration_close(h.journal.started("b", Call::Show), Duration::from_millis(300));
        assert!(h.journal.calls("a").contains(&Call::Hide));
    }

    #[tokio::test(start_paused = true)]
    async fn hide_shifts_older_notifications_back() {
        let mut h = harness(quiet());
        for id in ["a", "b", "c"] {
            h.container.handle(show(id)).await;
        }
        h.journal.reset();

        h.container.handle(hide("c")).await;

        assert_duration_close(h.journal.started("c", Call::Hide), Duration::ZERO);
        assert_duration_close(
            h.journal.started("a", Call::Shift { make_place: false }),
            Duration::from_millis(150),
        );
        assert_duration_close(
            h.journal.started("b", Call::Shift { make_place: false }),
            Duration::from_millis(150),
        );
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(450));
        assert_eq!(ids(&h.container), ["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hide_of_oldest_shifts_nothing() {
        let mut h = harness(quiet());
        h.container.handle(show("a")).await;
        h.container.handle(show("b")).await;
        h.journal.reset();

        h.container.handle(Action::HideOldest).await;

        assert!(h.journal.calls("b").is_empty());
        assert_eq!(ids(&h.container), ["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn sequential_hide_waits_for_shift() {
        let mut config = quiet();
        config.animations.overlap = None;
        let mut h = harness(config);
        h.container.handle(show("a")).await;
        h.container.handle(show("b")).await;
        h.journal.reset();

        h.container.handle(Action::HideNewest).await;

        assert_duration_close(
            h.journal.started("a", Call::Shift { make_place: false }),
            Duration::from_millis(300),
        );
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(600));
        assert_eq!(ids(&h.container), ["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn hide_of_shared_id_removes_only_the_hidden_entry() {
        let mut h = harness(quiet());
        h.container.handle(show("x")).await;
        h.container.handle(show("x")).await;
        h.journal.reset();

        h.container.handle(hide("x")).await;

        assert_eq!(ids(&h.container), ["x"]);
        assert_eq!(*h.active.borrow(), [NotificationId::from("x")]);
        // The older entry (shifted once to make room) hid; the newer one stays
        let remaining = h.container.notifications()[0].visual().expect("mounted");
        assert_eq!(remaining.shift_offset(), 0.0);
        assert_eq!(h.journal.calls("x"), [Call::Hide]);

        h.container.handle(hide("x")).await;
        assert!(h.container.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_id_hide_is_noop() {
        let mut h = harness(quiet());
        h.container.handle(show("a")).await;
        h.journal.reset();
        let started = Instant::now();

        h.container.handle(hide("missing")).await;

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(ids(&h.container), ["a"]);
        assert!(h.journal.entries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_class_actions_on_empty_list_resolve() {
        let mut h = harness(quiet());
        for action in [Action::HideOldest, Action::HideNewest, Action::HideAll] {
            h.container.handle(action).await;
        }
        assert!(h.container.notifications().is_empty());
        assert_eq!(h.journal.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn hide_all_staggers_from_the_top_of_a_bottom_stack() {
        let mut h = harness(quiet());
        for id in ["a", "b", "c"] {
            h.container.handle(show(id)).await;
        }
        h.journal.reset();

        h.container.handle(Action::HideAll).await;

        assert_duration_close(h.journal.started("a", Call::Hide), Duration::ZERO);
        assert_duration_close(h.journal.started("b", Call::Hide), Duration::from_millis(50));
        assert_duration_close(h.journal.started("c", Call::Hide), Duration::from_millis(100));
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(400));
        assert!(h.container.notifications().is_empty());
        assert!(h.active.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_all_staggers_from_the_bottom_of_a_top_stack() {
        let mut config = quiet();
        config.position.vertical.position = VerticalPosition::Top;
        let mut h = harness(config);
        for id in ["a", "b", "c"] {
            h.container.handle(show(id)).await;
        }
        h.journal.reset();

        h.container.handle(Action::HideAll).await;

        assert_duration_close(h.journal.started("c", Call::Hide), Duration::ZERO);
        assert_duration_close(h.journal.started("b", Call::Hide), Duration::from_millis(50));
        assert_duration_close(h.journal.started("a", Call::Hide), Duration::from_millis(100));
        assert!(h.container.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_all_without_offset_is_concurrent() {
        let mut config = quiet();
        config.animations.hide.offset = None;
        let mut h = harness(config);
        for id in ["a", "b", "c"] {
            h.container.handle(show(id)).await;
        }
        h.journal.reset();

        h.container.handle(Action::HideAll).await;

        for id in ["a", "b", "c"] {
            assert_eq!(h.journal.started(id, Call::Hide), Duration::ZERO);
        }
        assert_duration_close(h.journal.elapsed(), Duration::from_millis(300));
        assert!(h.container.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_all_with_zero_offset_is_concurrent() {
        let mut config = quiet();
        config.animations.hide.offset = Some(0);
        let mut h = harness(config);
        for id in ["a", "b"] {
            h.container.handle(show(id)).await;
        }
        h.journal.reset();

        h.container.handle(Action::HideAll).await;

        assert_eq!(h.journal.started("a", Call::Hide), Duration::ZERO);
        assert_eq!(h.journal.started("b", Call::Hide), Duration::ZERO);
        assert!(h.container.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_action_emits_event_then_hides() {
        let mut h = harness(quiet());
        h.container.handle(show("a")).await;

        h.container
            .handle(Action::CustomAction(CustomAction {
                notification_id: NotificationId::from("a"),
                action_name: "undo".to_string(),
                action_payload: Some("7".to_string()),
            }))
            .await;

        let event = h.custom_actions.try_recv().expect("custom action event");
        assert_eq!(event.name, "undo");
        assert_eq!(event.payload.as_deref(), Some("7"));
        assert!(h.container.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn run_continues_queue_after_each_action() {
        let config = Arc::new(quiet());
        let journal = Journal::new();
        let mount = RecordingMount::new(journal.clone(), Arc::clone(&config), 40.0);
        let (queue, actions) = ActionQueue::new();
        let queue = Arc::new(queue);
        let (custom_tx, _custom_rx) = mpsc::unbounded_channel();
        let (active_tx, mut active) = watch::channel(Vec::new());
        let container = Container::new(
            config,
            Arc::clone(&queue),
            actions,
            Arc::new(mount),
            custom_tx,
            active_tx,
        );
        let task = tokio::spawn(container.run());

        queue.push(show("a"));
        queue.push(show("b"));
        queue.push(hide("a"));
        queue.idle().await;

        assert_eq!(*active.borrow_and_update(), [NotificationId::from("b")]);
        assert_eq!(journal.calls("a"), [Call::Show, Call::Shift { make_place: true }, Call::Hide]);
        task.abort();
    }
}
