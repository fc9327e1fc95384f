// SPDX-License-Identifier: MPL-2.0
//! Lifecycle of a single toast on top of a [`Surface`].
//!
//! A toast moves through `Created -> AwaitingReady -> Visible`, bounces
//! between `Visible` and `Shifting` while siblings come and go, and ends
//! with `Hiding -> Removed`. It also owns the auto-hide timer and translates
//! clicks and hover events into queue actions.

use super::{NotificationVisual, Surface, Timer, VisualEvents};
use crate::animation::{horizontal_anchor, translate, AnimationDirection, AnimationService};
use crate::config::{
    ClickBehaviour, HorizontalPosition, MouseoverBehaviour, NotifierConfig, VerticalPosition,
};
use crate::notifications::NotificationId;
use futures_util::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Class marking toasts whose renderer should draw a dismiss button.
pub const DISMISSIBLE_CLASS: &str = "notifier__notification--dismissible";

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Created,
    AwaitingReady,
    Visible,
    Shifting,
    Hiding,
    Removed,
}

#[derive(Debug)]
struct Status {
    state: VisualState,
    /// Vertical offset from the anchor position (in pixels).
    shift: f32,
}

struct Inner<S> {
    surface: S,
    config: Arc<NotifierConfig>,
    animations: AnimationService,
    kind: String,
    events: VisualEvents,
    timer: Timer,
    status: Mutex<Status>,
}

/// [`NotificationVisual`] implementation driving a [`Surface`].
pub struct ToastVisual<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for ToastVisual<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> std::fmt::Debug for ToastVisual<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.inner.status.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("ToastVisual")
            .field("id", self.inner.events.id())
            .field("kind", &self.inner.kind)
            .field("status", &*status)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> ToastVisual<S> {
    pub fn new(
        surface: S,
        config: Arc<NotifierConfig>,
        animations: AnimationService,
        kind: impl Into<String>,
        events: VisualEvents,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                config,
                animations,
                kind: kind.into(),
                events,
                timer: Timer::new(),
                status: Mutex::new(Status {
                    state: VisualState::Created,
                    shift: 0.0,
                }),
            }),
        }
    }

    /// Places the toast at its anchor and applies type and theme classes.
    ///
    /// Every new toast starts at the exact same spot; siblings are shifted
    /// out of its way afterwards.
    pub fn setup(&self) {
        let inner = &self.inner;
        let surface = &inner.surface;
        let position = &inner.config.position;

        let horizontal_distance = format!("{}px", position.horizontal.distance);
        match position.horizontal.position {
            HorizontalPosition::Left => surface.set_style("left", &horizontal_distance),
            HorizontalPosition::Right => surface.set_style("right", &horizontal_distance),
            HorizontalPosition::Middle => {
                surface.set_style("left", "50%");
                surface.set_style("transform", &translate("-50%", "0"));
            }
        }

        let vertical_distance = format!("{}px", position.vertical.distance);
        match position.vertical.position {
            VerticalPosition::Top => surface.set_style("top", &vertical_distance),
            VerticalPosition::Bottom => surface.set_style("bottom", &vertical_distance),
        }
        surface.set_style("visibility", "hidden");

        surface.add_class(&format!("notifier__notification--{}", inner.kind));
        surface.add_class(&format!("notifier__notification--{}", inner.config.theme));
        if inner.config.behaviour.show_dismiss_button {
            surface.add_class(DISMISSIBLE_CLASS);
        }

        inner.status().state = VisualState::AwaitingReady;
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        self.inner.events.id()
    }

    #[must_use]
    pub fn state(&self) -> VisualState {
        self.inner.status().state
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.inner.surface
    }

    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.inner.config
    }

    /// Dismiss button pressed. Ignored when the button is configured off.
    pub fn on_dismiss_click(&self) {
        if self.inner.config.behaviour.show_dismiss_button {
            self.inner.events.dismiss();
        }
    }

    /// Click anywhere on the toast.
    pub fn on_click(&self) {
        if self.inner.config.behaviour.on_click == ClickBehaviour::Hide {
            self.inner.events.dismiss();
        }
    }

    pub fn on_mouseover(&self) {
        match self.inner.config.behaviour.on_mouseover {
            MouseoverBehaviour::PauseAutoHide => self.inner.pause_auto_hide(),
            MouseoverBehaviour::ResetAutoHide => self.inner.stop_auto_hide(),
            MouseoverBehaviour::Ignore => {}
        }
    }

    pub fn on_mouseout(&self) {
        match self.inner.config.behaviour.on_mouseover {
            MouseoverBehaviour::PauseAutoHide => self.inner.continue_auto_hide(),
            MouseoverBehaviour::ResetAutoHide => self.inner.start_auto_hide(),
            MouseoverBehaviour::Ignore => {}
        }
    }

    /// A custom action button inside the toast was used.
    pub fn on_custom_action(&self, name: impl Into<String>, payload: Option<String>) {
        self.inner.events.custom_action(name, payload);
    }
}

impl<S: Surface> Inner<S> {
    fn status(&self) -> MutexGuard<'_, Status> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: VisualState) {
        self.status().state = state;
    }

    fn start_auto_hide(&self) {
        let Some(duration) = self.config.auto_hide() else {
            return;
        };
        let expired = self.timer.start(duration);
        let events = self.events.clone();
        tokio::spawn(async move {
            if expired.await.is_ok() {
                tracing::debug!(id = %events.id(), "Auto-hide timer expired");
                events.dismiss();
            }
        });
    }

    fn pause_auto_hide(&self) {
        if self.config.auto_hide().is_some() {
            self.timer.pause();
        }
    }

    fn continue_auto_hide(&self) {
        if self.config.auto_hide().is_some() {
            self.timer.resume();
        }
    }

    fn stop_auto_hide(&self) {
        if self.config.auto_hide().is_some() {
            self.timer.stop();
        }
    }
}

impl<S: Surface> NotificationVisual for ToastVisual<S> {
    fn show(&self) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            if inner.config.animates_show() {
                let shift = inner.status().shift;
                let animation = inner.animations.animation(AnimationDirection::Show, shift);
                // Apply the start styles first so nothing flickers before the animation runs
                for (property, value) in &animation.keyframes.from {
                    inner.surface.set_style(property, value);
                }
                inner.surface.set_style("visibility", "visible");
                inner.surface.animate(animation).await;
            } else {
                inner.surface.set_style("visibility", "visible");
            }
            inner.set_state(VisualState::Visible);
            inner.start_auto_hide();
        })
    }

    fn hide(&self) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            inner.stop_auto_hide();
            let shift = {
                let mut status = inner.status();
                if status.state == VisualState::Removed {
                    return;
                }
                status.state = VisualState::Hiding;
                status.shift
            };
            if inner.config.animates_hide() {
                let animation = inner.animations.animation(AnimationDirection::Hide, shift);
                inner.surface.animate(animation).await;
            }
            inner.set_state(VisualState::Removed);
        })
    }

    fn shift(&self, distance: f32, make_place: bool) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let vertical = &inner.config.position.vertical;
            let grows = match vertical.position {
                VerticalPosition::Top => make_place,
                VerticalPosition::Bottom => !make_place,
            };
            let (from, to) = {
                let mut status = inner.status();
                let from = status.shift;
                let to = if grows {
                    from + distance + vertical.gap
                } else {
                    from - distance - vertical.gap
                };
                status.shift = to;
                if status.state == VisualState::Visible {
                    status.state = VisualState::Shifting;
                }
                (from, to)
            };

            if inner.config.animates_shift() {
                let animation = inner.animations.shift_animation(from, to);
                inner.surface.animate(animation).await;
            } else {
                let x = horizontal_anchor(inner.config.position.horizontal.position);
                inner
                    .surface
                    .set_style("transform", &translate(x, &format!("{}px", to)));
            }

            let mut status = inner.status();
            if status.state == VisualState::Shifting {
                status.state = VisualState::Visible;
            }
        })
    }

    fn height(&self) -> f32 {
        self.inner.surface.height()
    }

    fn width(&self) -> f32 {
        self.inner.surface.width()
    }

    fn shift_offset(&self) -> f32 {
        self.inner.status().shift
    }
}
