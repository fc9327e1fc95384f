// SPDX-License-Identifier: MPL-2.0
//! Built-in `fade` and `slide` presets.

use super::{snapshot, translate, AnimationPreset, Keyframes, PresetContext};
use crate::config::{HorizontalPosition, VerticalPosition, SLIDE_OVERSHOOT};

/// Fades opacity in and out.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fade;

impl AnimationPreset for Fade {
    fn show(&self, _context: &PresetContext<'_>) -> Keyframes {
        Keyframes {
            from: snapshot([("opacity", "0".to_string())]),
            to: snapshot([("opacity", "1".to_string())]),
        }
    }

    fn hide(&self, _context: &PresetContext<'_>) -> Keyframes {
        Keyframes {
            from: snapshot([("opacity", "1".to_string())]),
            to: snapshot([("opacity", "0".to_string())]),
        }
    }
}

/// Slides notifications in from, and out to, the edge they are anchored to.
///
/// Horizontally centered notifications slide vertically instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slide;

impl Slide {
    /// Offset placing the notification just beyond the screen edge.
    fn offscreen(context: &PresetContext<'_>) -> String {
        let horizontal = &context.config.position.horizontal;
        let outward = match horizontal.position {
            HorizontalPosition::Left => false,
            HorizontalPosition::Right => true,
            HorizontalPosition::Middle => {
                context.config.position.vertical.position == VerticalPosition::Bottom
            }
        };
        if outward {
            format!("calc( 100% + {}px + {}px )", horizontal.distance, SLIDE_OVERSHOOT)
        } else {
            format!("calc( -100% - {}px - {}px )", horizontal.distance, SLIDE_OVERSHOOT)
        }
    }
}

impl AnimationPreset for Slide {
    fn show(&self, context: &PresetContext<'_>) -> Keyframes {
        let offscreen = Self::offscreen(context);
        let (from, to) = match context.config.position.horizontal.position {
            HorizontalPosition::Middle => (translate("-50%", &offscreen), translate("-50%", "0")),
            HorizontalPosition::Left | HorizontalPosition::Right => {
                (translate(&offscreen, "0"), translate("0", "0"))
            }
        };
        Keyframes {
            from: snapshot([("transform", from)]),
            to: snapshot([("transform", to)]),
        }
    }

    fn hide(&self, context: &PresetContext<'_>) -> Keyframes {
        let offscreen = Self::offscreen(context);
        let shift = format!("{}px", context.shift);
        let (from, to) = match context.config.position.horizontal.position {
            HorizontalPosition::Middle => {
                (translate("-50%", &shift), translate("-50%", &offscreen))
            }
            HorizontalPosition::Left | HorizontalPosition::Right => {
                (translate("0", &shift), translate(&offscreen, &shift))
            }
        };
        Keyframes {
            from: snapshot([("transform", from)]),
            to: snapshot([("transform", to)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotifierConfig;

    fn transform(snapshot: &crate::animation::StyleSnapshot) -> &str {
        snapshot.get("transform").map(String::as_str).unwrap_or_default()
    }

    #[test]
    fn fade_show_and_hide_are_inverse() {
        let config = NotifierConfig::default();
        let context = PresetContext {
            config: &config,
            shift: 0.0,
        };
        let show = Fade.show(&context);
        let hide = Fade.hide(&context);
        assert_eq!(show.from, hide.to);
        assert_eq!(show.to, hide.from);
    }

    #[test]
    fn slide_left_enters_from_the_left_edge() {
        let config = NotifierConfig::default();
        let context = PresetContext {
            config: &config,
            shift: 0.0,
        };
        let keyframes = Slide.show(&context);
        assert_eq!(
            transform(&keyframes.from),
            "translate3d( calc( -100% - 12px - 10px ), 0, 0 )"
        );
        assert_eq!(transform(&keyframes.to), "translate3d( 0, 0, 0 )");
    }

    #[test]
    fn slide_right_hide_keeps_current_shift() {
        let mut config = NotifierConfig::default();
        config.position.horizontal.position = HorizontalPosition::Right;
        let context = PresetContext {
            config: &config,
            shift: -64.0,
        };
        let keyframes = Slide.hide(&context);
        assert_eq!(transform(&keyframes.from), "translate3d( 0, -64px, 0 )");
        assert_eq!(
            transform(&keyframes.to),
            "translate3d( calc( 100% + 12px + 10px ), -64px, 0 )"
        );
    }

    #[test]
    fn slide_middle_moves_vertically_toward_anchor_edge() {
        let mut config = NotifierConfig::default();
        config.position.horizontal.position = HorizontalPosition::Middle;
        config.position.vertical.position = VerticalPosition::Top;
        let context = PresetContext {
            config: &config,
            shift: 0.0,
        };
        let keyframes = Slide.show(&context);
        assert_eq!(
            transform(&keyframes.from),
            "translate3d( -50%, calc( -100% - 12px - 10px ), 0 )"
        );
        assert_eq!(transform(&keyframes.to), "translate3d( -50%, 0, 0 )");
    }
}
