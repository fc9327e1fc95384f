// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the notifier. Constants are organized by category.
//!
//! # Categories
//!
//! - **Animations**: Per-phase speeds, overlap and hide offset
//! - **Behaviour**: Auto-hide duration and stacking limit
//! - **Position**: Distances from the screen edges and the gap between toasts

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Default duration of the show animation (in milliseconds).
pub const DEFAULT_SHOW_SPEED_MS: u64 = 300;

/// Default duration of the hide animation (in milliseconds).
pub const DEFAULT_HIDE_SPEED_MS: u64 = 300;

/// Default duration of the shift animation (in milliseconds).
pub const DEFAULT_SHIFT_SPEED_MS: u64 = 300;

/// Default overlap between consecutive animation phases (in milliseconds).
pub const DEFAULT_OVERLAP_MS: u64 = 150;

/// Default stagger between hides when hiding everything at once (in milliseconds).
pub const DEFAULT_HIDE_OFFSET_MS: u64 = 50;

/// Default CSS easing function for every animation phase.
pub const DEFAULT_EASING: &str = "ease";

// ==========================================================================
// Behaviour Defaults
// ==========================================================================

/// Default auto-hide duration (in milliseconds).
pub const DEFAULT_AUTO_HIDE_MS: u64 = 7000;

/// Default maximum number of notifications visible at once.
pub const DEFAULT_STACKING: usize = 4;

/// Smallest stacking value that actually enables stacking.
/// Anything below shows a single notification at a time.
pub const MIN_STACKING: usize = 2;

// ==========================================================================
// Position Defaults
// ==========================================================================

/// Default distance to the left/right screen edge (in pixels).
pub const DEFAULT_HORIZONTAL_DISTANCE: f32 = 12.0;

/// Default distance to the top/bottom screen edge (in pixels).
pub const DEFAULT_VERTICAL_DISTANCE: f32 = 12.0;

/// Default vertical gap between stacked notifications (in pixels).
pub const DEFAULT_VERTICAL_GAP: f32 = 10.0;

/// Extra distance a slide animation travels beyond the screen edge (in pixels).
pub const SLIDE_OVERSHOOT: f32 = 10.0;

// ==========================================================================
// Theme Defaults
// ==========================================================================

/// Default theme name, applied as a class on every notification.
pub const DEFAULT_THEME: &str = "material";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Overlap must leave room for at least part of each phase
    assert!(DEFAULT_OVERLAP_MS < DEFAULT_HIDE_SPEED_MS);
    assert!(DEFAULT_OVERLAP_MS < DEFAULT_SHIFT_SPEED_MS);

    // Stacking validation
    assert!(MIN_STACKING == 2);
    assert!(DEFAULT_STACKING >= MIN_STACKING);

    // Position validation
    assert!(DEFAULT_HORIZONTAL_DISTANCE >= 0.0);
    assert!(DEFAULT_VERTICAL_DISTANCE >= 0.0);
    assert!(DEFAULT_VERTICAL_GAP >= 0.0);
};
