// SPDX-License-Identifier: MPL-2.0
//! In-memory rendering backend.
//!
//! Nothing is drawn: styles and classes are recorded, and animations simply
//! take their configured duration on the Tokio clock before applying their
//! end styles. Used by the demo binary and throughout the tests.

use super::{Surface, SurfaceRenderer, ToastVisual, VisualState};
use crate::animation::Animation;
use crate::notifications::{Notification, NotificationId};
use futures_util::future::BoxFuture;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default width of a headless toast (in pixels).
const DEFAULT_WIDTH: f32 = 320.0;

#[derive(Debug, Default)]
struct Recorded {
    styles: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    animations: Vec<Animation>,
}

/// Surface recording every style mutation.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    height: f32,
    width: f32,
    content: Option<String>,
    recorded: Arc<Mutex<Recorded>>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height,
            width: DEFAULT_WIDTH,
            content: None,
            recorded: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Rendered text, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Current value of a style property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.recorded().styles.get(property).cloned()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.recorded().classes.contains(class)
    }

    /// Every animation played so far, oldest first.
    #[must_use]
    pub fn animations(&self) -> Vec<Animation> {
        self.recorded().animations.clone()
    }

    fn recorded(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for HeadlessSurface {
    fn set_style(&self, property: &str, value: &str) {
        self.recorded()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn add_class(&self, class: &str) {
        self.recorded().classes.insert(class.to_string());
    }

    fn animate(&self, animation: Animation) -> BoxFuture<'static, ()> {
        let recorded = Arc::clone(&self.recorded);
        Box::pin(async move {
            let duration = animation.duration;
            let end = animation.keyframes.to.clone();
            recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .animations
                .push(animation);

            if !duration.is_zero() {
                tokio::time::sleep(duration).await;
            }

            // Keep the end state ("fill: forwards")
            let mut recorded = recorded.lock().unwrap_or_else(PoisonError::into_inner);
            recorded.styles.extend(end);
        })
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn width(&self) -> f32 {
        self.width
    }
}

/// Renderer producing [`HeadlessSurface`]s and keeping track of live toasts,
/// so callers can simulate clicks and hovers by notification id.
#[derive(Debug)]
pub struct HeadlessRenderer {
    height: f32,
    width: f32,
    visuals: Mutex<HashMap<NotificationId, ToastVisual<HeadlessSurface>>>,
}

impl HeadlessRenderer {
    /// Creates a renderer laying out every toast `height` pixels tall.
    #[must_use]
    pub fn new(height: f32) -> Self {
        Self {
            height,
            width: DEFAULT_WIDTH,
            visuals: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Looks up the toast currently shown for `id`.
    #[must_use]
    pub fn visual(&self, id: &NotificationId) -> Option<ToastVisual<HeadlessSurface>> {
        self.visuals().get(id).cloned()
    }

    /// Number of toasts not yet removed.
    #[must_use]
    pub fn live(&self) -> usize {
        self.visuals()
            .values()
            .filter(|visual| visual.state() != VisualState::Removed)
            .count()
    }

    fn visuals(&self) -> MutexGuard<'_, HashMap<NotificationId, ToastVisual<HeadlessSurface>>> {
        self.visuals.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SurfaceRenderer for HeadlessRenderer {
    type Surface = HeadlessSurface;

    fn render(&self, notification: &Notification) -> BoxFuture<'static, HeadlessSurface> {
        let mut surface = HeadlessSurface::new(self.height).with_width(self.width);
        if let Some(message) = notification.message() {
            surface = surface.with_content(message);
        }
        Box::pin(async move { surface })
    }

    fn mounted(&self, visual: &ToastVisual<HeadlessSurface>) {
        let mut visuals = self.visuals();
        visuals.retain(|_, visual| visual.state() != VisualState::Removed);
        visuals.insert(visual.id().clone(), visual.clone());
    }
}
