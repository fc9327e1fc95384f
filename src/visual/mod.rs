// SPDX-License-Identifier: MPL-2.0
//! Boundary between the notification container and whatever draws toasts.
//!
//! # Components
//!
//! - [`NotificationVisual`] - what the container drives: show, hide, shift
//! - [`Mount`] - turns a new notification into a ready visual
//! - [`Surface`] / [`SurfaceRenderer`] - low-level style primitives a host
//!   implements once; [`SurfaceMount`] wraps them into [`ToastVisual`]s
//! - [`HeadlessSurface`] - in-memory surface for tests and the demo binary
//!
//! Every completion signal is a `'static` boxed future. Futures are lazy:
//! nothing starts moving until the container polls them.

mod headless;
mod timer;
mod toast;

pub use headless::{HeadlessRenderer, HeadlessSurface};
pub use timer::Timer;
pub use toast::{ToastVisual, VisualState, DISMISSIBLE_CLASS};

use crate::animation::{Animation, AnimationService};
use crate::config::NotifierConfig;
use crate::notifications::{Action, ActionQueue, CustomAction, Notification, NotificationId};
use futures_util::future::BoxFuture;
use std::sync::Arc;

/// A single visible notification as seen by the container.
pub trait NotificationVisual: Send + Sync {
    /// Animates the notification in; resolves once it is fully visible.
    fn show(&self) -> BoxFuture<'static, ()>;

    /// Animates the notification out; resolves once it is gone.
    fn hide(&self) -> BoxFuture<'static, ()>;

    /// Moves the notification vertically by `distance` plus the configured gap.
    ///
    /// `make_place` is `true` when room is made for a newer notification and
    /// `false` when closing the gap left by a hidden one.
    fn shift(&self, distance: f32, make_place: bool) -> BoxFuture<'static, ()>;

    /// Rendered height (in pixels), known once the visual is ready.
    fn height(&self) -> f32;

    fn width(&self) -> f32;

    /// Current vertical shift (in pixels).
    fn shift_offset(&self) -> f32;
}

/// Creates visuals for new notifications.
pub trait Mount: Send + Sync {
    /// Renders `notification`; the returned future resolving is the "ready"
    /// signal and hands back the visual.
    fn mount(
        &self,
        notification: &Notification,
        events: VisualEvents,
    ) -> BoxFuture<'static, Arc<dyn NotificationVisual>>;
}

/// Channel from a visual back into the action queue.
#[derive(Debug, Clone)]
pub struct VisualEvents {
    id: NotificationId,
    queue: Arc<ActionQueue>,
}

impl VisualEvents {
    pub(crate) fn new(id: NotificationId, queue: Arc<ActionQueue>) -> Self {
        Self { id, queue }
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Requests that this notification be hidden.
    pub fn dismiss(&self) {
        self.queue.push(Action::Hide(self.id.clone()));
    }

    /// Forwards a custom action to the application, then hides this notification.
    pub fn custom_action(&self, name: impl Into<String>, payload: Option<String>) {
        self.queue.push(Action::CustomAction(CustomAction {
            notification_id: self.id.clone(),
            action_name: name.into(),
            action_payload: payload,
        }));
    }
}

/// Low-level style primitives of one rendered notification.
pub trait Surface: Send + Sync + 'static {
    fn set_style(&self, property: &str, value: &str);

    fn add_class(&self, class: &str);

    /// Plays `animation`, keeping its end state; resolves when finished.
    fn animate(&self, animation: Animation) -> BoxFuture<'static, ()>;

    fn height(&self) -> f32;

    fn width(&self) -> f32;
}

/// Host-side renderer producing surfaces.
pub trait SurfaceRenderer: Send + Sync + 'static {
    type Surface: Surface;

    /// Renders the notification's markup; resolves once it is laid out.
    fn render(&self, notification: &Notification) -> BoxFuture<'static, Self::Surface>;

    /// Called with every visual once it is ready, so the host can route
    /// clicks and hover events to it.
    fn mounted(&self, _visual: &ToastVisual<Self::Surface>) {}
}

/// [`Mount`] building [`ToastVisual`]s on top of a [`SurfaceRenderer`].
pub struct SurfaceMount<R> {
    renderer: Arc<R>,
    config: Arc<NotifierConfig>,
    animations: AnimationService,
}

impl<R: SurfaceRenderer> SurfaceMount<R> {
    pub fn new(renderer: Arc<R>, config: Arc<NotifierConfig>) -> Self {
        let animations = AnimationService::new(Arc::clone(&config));
        Self {
            renderer,
            config,
            animations,
        }
    }

    /// Uses a custom animation service (e.g. with extra presets).
    #[must_use]
    pub fn with_animations(mut self, animations: AnimationService) -> Self {
        self.animations = animations;
        self
    }
}

impl<R: SurfaceRenderer> Mount for SurfaceMount<R> {
    fn mount(
        &self,
        notification: &Notification,
        events: VisualEvents,
    ) -> BoxFuture<'static, Arc<dyn NotificationVisual>> {
        let render = self.renderer.render(notification);
        let renderer = Arc::clone(&self.renderer);
        let config = Arc::clone(&self.config);
        let animations = self.animations.clone();
        let kind = notification.kind().to_string();

        Box::pin(async move {
            let surface = render.await;
            let visual = ToastVisual::new(surface, config, animations, kind, events);
            visual.setup();
            renderer.mounted(&visual);
            Arc::new(visual) as Arc<dyn NotificationVisual>
        })
    }
}
