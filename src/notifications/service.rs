// SPDX-License-Identifier: MPL-2.0
//! Public entry point for applications.

use super::action::{Action, CustomActionEvent};
use super::container::Container;
use super::notification::{NotificationId, NotificationOptions};
use super::queue::ActionQueue;
use crate::config::NotifierConfig;
use crate::visual::Mount;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Cheap, cloneable handle queueing notifier actions.
///
/// Every method returns immediately; the work happens once the
/// [`Container`] gets to the action.
#[derive(Debug, Clone)]
pub struct Notifier {
    queue: Arc<ActionQueue>,
    config: Arc<NotifierConfig>,
}

/// Receivers for what the container reports back to the application.
#[derive(Debug)]
pub struct Subscriptions {
    /// Custom actions triggered from inside notifications.
    pub custom_actions: mpsc::UnboundedReceiver<CustomActionEvent>,
    /// IDs of the active notifications, oldest first.
    pub active: watch::Receiver<Vec<NotificationId>>,
}

impl Notifier {
    /// Wires a notifier to a fresh container.
    ///
    /// Nothing is processed until [`Container::run`] is polled.
    pub fn new(
        config: Arc<NotifierConfig>,
        mount: Arc<dyn Mount>,
    ) -> (Self, Container, Subscriptions) {
        let (queue, actions) = ActionQueue::new();
        let queue = Arc::new(queue);
        let (custom_tx, custom_actions) = mpsc::unbounded_channel();
        let (active_tx, active) = watch::channel(Vec::new());

        let container = Container::new(
            Arc::clone(&config),
            Arc::clone(&queue),
            actions,
            mount,
            custom_tx,
            active_tx,
        );
        let notifier = Self { queue, config };
        let subscriptions = Subscriptions {
            custom_actions,
            active,
        };
        (notifier, container, subscriptions)
    }

    /// Like [`Notifier::new`], running the container on the current Tokio runtime.
    pub fn spawn(config: Arc<NotifierConfig>, mount: Arc<dyn Mount>) -> (Self, Subscriptions) {
        let (notifier, container, subscriptions) = Self::new(config, mount);
        tokio::spawn(container.run());
        (notifier, subscriptions)
    }

    /// The configuration every notification is shown with.
    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn show(&self, options: NotificationOptions) {
        self.queue.push(Action::Show(options));
    }

    /// Shows a plain notification of `kind` with `message`.
    pub fn notify(&self, kind: impl Into<String>, message: impl Into<String>, id: Option<&str>) {
        let mut options = NotificationOptions::new(kind).with_message(message);
        if let Some(id) = id {
            options = options.with_id(id);
        }
        self.show(options);
    }

    pub fn hide(&self, id: impl Into<NotificationId>) {
        self.queue.push(Action::Hide(id.into()));
    }

    pub fn hide_newest(&self) {
        self.queue.push(Action::HideNewest);
    }

    pub fn hide_oldest(&self) {
        self.queue.push(Action::HideOldest);
    }

    pub fn hide_all(&self) {
        self.queue.push(Action::HideAll);
    }

    /// Resolves once every queued action has settled.
    pub async fn idle(&self) {
        self.queue.idle().await;
    }
}
