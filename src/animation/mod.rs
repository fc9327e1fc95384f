// SPDX-License-Identifier: MPL-2.0
//! Animation data for showing, hiding and shifting notifications.
//!
//! A preset turns a direction plus some notification context into a pair of
//! style snapshots to interpolate between. [`AnimationService`] picks the
//! configured preset and attaches the phase's speed and easing, producing an
//! [`Animation`] a [`Surface`](crate::visual::Surface) can play.

mod presets;

pub use presets::{Fade, Slide};

use crate::config::{HorizontalPosition, NotifierConfig, PresetKind};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

/// Style properties at one point of an animation (`property -> value`).
pub type StyleSnapshot = BTreeMap<String, String>;

/// Builds a snapshot from `(property, value)` pairs.
pub fn snapshot<const N: usize>(properties: [(&str, String); N]) -> StyleSnapshot {
    properties
        .into_iter()
        .map(|(property, value)| (property.to_string(), value))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationDirection {
    Show,
    Hide,
}

/// Start and end styles of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    pub from: StyleSnapshot,
    pub to: StyleSnapshot,
}

/// Everything a surface needs to play an animation.
///
/// The end state is kept once the animation finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub keyframes: Keyframes,
    pub duration: Duration,
    pub easing: String,
}

/// Context a preset may use to compute its keyframes.
#[derive(Debug, Clone, Copy)]
pub struct PresetContext<'a> {
    pub config: &'a NotifierConfig,
    /// Current vertical shift of the notification (in pixels).
    pub shift: f32,
}

/// Generates show/hide keyframes for a notification.
pub trait AnimationPreset: Send + Sync {
    fn show(&self, context: &PresetContext<'_>) -> Keyframes;

    fn hide(&self, context: &PresetContext<'_>) -> Keyframes;

    fn keyframes(&self, direction: AnimationDirection, context: &PresetContext<'_>) -> Keyframes {
        match direction {
            AnimationDirection::Show => self.show(context),
            AnimationDirection::Hide => self.hide(context),
        }
    }
}

/// Horizontal component of a notification's transform.
pub(crate) fn horizontal_anchor(position: HorizontalPosition) -> &'static str {
    match position {
        HorizontalPosition::Middle => "-50%",
        HorizontalPosition::Left | HorizontalPosition::Right => "0",
    }
}

pub(crate) fn translate(x: &str, y: &str) -> String {
    format!("translate3d( {}, {}, 0 )", x, y)
}

/// Resolves animation data from the configuration and preset registry.
#[derive(Clone)]
pub struct AnimationService {
    config: Arc<NotifierConfig>,
    presets: HashMap<PresetKind, Arc<dyn AnimationPreset>>,
}

impl AnimationService {
    /// Creates a service with the built-in `fade` and `slide` presets.
    pub fn new(config: Arc<NotifierConfig>) -> Self {
        let mut presets: HashMap<PresetKind, Arc<dyn AnimationPreset>> = HashMap::new();
        presets.insert(PresetKind::Fade, Arc::new(Fade));
        presets.insert(PresetKind::Slide, Arc::new(Slide));
        Self { config, presets }
    }

    /// Replaces the keyframe generator used for `kind`.
    #[must_use]
    pub fn with_preset(mut self, kind: PresetKind, preset: Arc<dyn AnimationPreset>) -> Self {
        self.presets.insert(kind, preset);
        self
    }

    /// Builds the show or hide animation for a notification at `shift`.
    #[must_use]
    pub fn animation(&self, direction: AnimationDirection, shift: f32) -> Animation {
        let animations = &self.config.animations;
        let (kind, speed, easing) = match direction {
            AnimationDirection::Show => (
                animations.show.preset,
                animations.show.speed,
                &animations.show.easing,
            ),
            AnimationDirection::Hide => (
                animations.hide.preset,
                animations.hide.speed,
                &animations.hide.easing,
            ),
        };

        let context = PresetContext {
            config: &self.config,
            shift,
        };
        let keyframes = match self.presets.get(&kind) {
            Some(preset) => preset.keyframes(direction, &context),
            None => Fade.keyframes(direction, &context),
        };

        Animation {
            keyframes,
            duration: Duration::from_millis(speed),
            easing: easing.clone(),
        }
    }

    /// Builds the animation moving a notification from one shift to another.
    #[must_use]
    pub fn shift_animation(&self, from: f32, to: f32) -> Animation {
        let x = horizontal_anchor(self.config.position.horizontal.position);
        Animation {
            keyframes: Keyframes {
                from: snapshot([("transform", translate(x, &format!("{}px", from)))]),
                to: snapshot([("transform", translate(x, &format!("{}px", to)))]),
            },
            duration: self.config.shift_speed(),
            easing: self.config.animations.shift.easing.clone(),
        }
    }
}

impl std::fmt::Debug for AnimationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationService")
            .field("presets", &self.presets.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
