// SPDX-License-Identifier: MPL-2.0
//! Notifier configuration: resolved settings plus partial user overrides.
//!
//! The configuration is resolved once at startup and is read-only afterwards.
//! It is built in layers: [`NotifierConfig::default`] holds every documented
//! default, and a partial [`NotifierOptions`] (typically parsed from a
//! `notifier.toml` file) is applied on top, one group at a time.
//!
//! # Configuration Sections
//!
//! - `[animations]` - enablement, overlap, and the `show`/`hide`/`shift` phases
//! - `[behaviour]` - auto-hide, click and mouseover handling, stacking
//! - `[position]` - `horizontal` and `vertical` anchoring
//! - `theme` - theme name applied to every notification
//!
//! Switchable numbers (`overlap`, `hide.offset`, `auto_hide`, `stacking`)
//! accept either `false` or an integer. Values that cannot enable the feature
//! (non-positive durations, stacking below 2) resolve to "disabled".
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with an explicit path
//! 2. Set the `TOASTER_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```
//! use toaster::config::{NotifierConfig, VerticalPosition};
//!
//! let config = toaster::config::parse(
//!     r#"
//!     [behaviour]
//!     stacking = false
//!
//!     [position.vertical]
//!     position = "top"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.behaviour.stacking, None);
//! assert_eq!(config.position.vertical.position, VerticalPosition::Top);
//! assert_eq!(config.animations, NotifierConfig::default().animations);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "notifier.toml";
const APP_NAME: &str = "toaster";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOASTER_CONFIG_DIR";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Built-in animation presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    Fade,
    Slide,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalPosition {
    #[default]
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPosition {
    Top,
    #[default]
    Bottom,
}

/// What a click anywhere on a notification does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickBehaviour {
    /// Clicks are ignored.
    #[default]
    Ignore,
    /// Clicking dismisses the notification.
    Hide,
}

/// What hovering a notification does to its auto-hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseoverBehaviour {
    /// Hovering has no effect.
    Ignore,
    /// Pause while hovered, continue with the remaining time afterwards.
    #[default]
    PauseAutoHide,
    /// Stop while hovered, restart from the full duration afterwards.
    ResetAutoHide,
}

// =============================================================================
// Resolved Section Structs
// =============================================================================

/// Show animation phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowAnimation {
    pub preset: PresetKind,
    /// Duration in milliseconds; `0` shows instantly.
    pub speed: u64,
    pub easing: String,
}

/// Hide animation phase.
#[derive(Debug, Clone, PartialEq)]
pub struct HideAnimation {
    pub preset: PresetKind,
    /// Duration in milliseconds; `0` hides instantly.
    pub speed: u64,
    pub easing: String,
    /// Stagger between hides when hiding everything; `None` hides all at once.
    pub offset: Option<u64>,
}

/// Shift animation phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftAnimation {
    /// Duration in milliseconds; `0` shifts instantly.
    pub speed: u64,
    pub easing: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationsConfig {
    pub enabled: bool,
    /// Milliseconds consecutive phases run concurrently; `None` chains them.
    pub overlap: Option<u64>,
    pub show: ShowAnimation,
    pub hide: HideAnimation,
    pub shift: ShiftAnimation,
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            overlap: Some(DEFAULT_OVERLAP_MS),
            show: ShowAnimation {
                preset: PresetKind::Slide,
                speed: DEFAULT_SHOW_SPEED_MS,
                easing: DEFAULT_EASING.to_string(),
            },
            hide: HideAnimation {
                preset: PresetKind::Fade,
                speed: DEFAULT_HIDE_SPEED_MS,
                easing: DEFAULT_EASING.to_string(),
                offset: Some(DEFAULT_HIDE_OFFSET_MS),
            },
            shift: ShiftAnimation {
                speed: DEFAULT_SHIFT_SPEED_MS,
                easing: DEFAULT_EASING.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BehaviourConfig {
    /// Auto-hide duration in milliseconds; `None` keeps notifications open.
    pub auto_hide: Option<u64>,
    pub on_click: ClickBehaviour,
    pub on_mouseover: MouseoverBehaviour,
    pub show_dismiss_button: bool,
    /// Maximum visible notifications; `None` shows one at a time.
    pub stacking: Option<usize>,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            auto_hide: Some(DEFAULT_AUTO_HIDE_MS),
            on_click: ClickBehaviour::Ignore,
            on_mouseover: MouseoverBehaviour::PauseAutoHide,
            show_dismiss_button: true,
            stacking: Some(DEFAULT_STACKING),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalConfig {
    pub position: HorizontalPosition,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerticalConfig {
    pub position: VerticalPosition,
    pub distance: f32,
    pub gap: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionConfig {
    pub horizontal: HorizontalConfig,
    pub vertical: VerticalConfig,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            horizontal: HorizontalConfig {
                position: HorizontalPosition::default(),
                distance: DEFAULT_HORIZONTAL_DISTANCE,
            },
            vertical: VerticalConfig {
                position: VerticalPosition::default(),
                distance: DEFAULT_VERTICAL_DISTANCE,
                gap: DEFAULT_VERTICAL_GAP,
            },
        }
    }
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Fully resolved notifier configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    pub animations: AnimationsConfig,
    pub behaviour: BehaviourConfig,
    pub position: PositionConfig,
    pub theme: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            animations: AnimationsConfig::default(),
            behaviour: BehaviourConfig::default(),
            position: PositionConfig::default(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl NotifierConfig {
    /// Resolves partial overrides on top of the defaults.
    #[must_use]
    pub fn from_options(options: NotifierOptions) -> Self {
        let mut config = Self::default();
        config.apply(options);
        config
    }

    /// Applies every field present in `options`, group by group.
    pub fn apply(&mut self, options: NotifierOptions) {
        if let Some(theme) = options.theme {
            self.theme = theme;
        }
        if let Some(animations) = options.animations {
            self.animations.apply(animations);
        }
        if let Some(behaviour) = options.behaviour {
            self.behaviour.apply(behaviour);
        }
        if let Some(position) = options.position {
            if let Some(horizontal) = position.horizontal {
                self.position.horizontal.apply(horizontal);
            }
            if let Some(vertical) = position.vertical {
                self.position.vertical.apply(vertical);
            }
        }
    }

    /// Whether show animations actually run.
    #[must_use]
    pub fn animates_show(&self) -> bool {
        self.animations.enabled && self.animations.show.speed > 0
    }

    /// Whether hide animations actually run.
    #[must_use]
    pub fn animates_hide(&self) -> bool {
        self.animations.enabled && self.animations.hide.speed > 0
    }

    /// Whether shift animations actually run.
    #[must_use]
    pub fn animates_shift(&self) -> bool {
        self.animations.enabled && self.animations.shift.speed > 0
    }

    #[must_use]
    pub fn hide_speed(&self) -> Duration {
        Duration::from_millis(self.animations.hide.speed)
    }

    #[must_use]
    pub fn shift_speed(&self) -> Duration {
        Duration::from_millis(self.animations.shift.speed)
    }

    /// Overlap between consecutive phases; zero counts as none.
    #[must_use]
    pub fn overlap(&self) -> Option<Duration> {
        self.animations
            .overlap
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    /// Stagger between hides of HIDE_ALL; zero counts as none.
    #[must_use]
    pub fn hide_offset(&self) -> Option<Duration> {
        self.animations
            .hide
            .offset
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    #[must_use]
    pub fn auto_hide(&self) -> Option<Duration> {
        self.behaviour.auto_hide.map(Duration::from_millis)
    }
}

impl From<NotifierOptions> for NotifierConfig {
    fn from(options: NotifierOptions) -> Self {
        Self::from_options(options)
    }
}

impl AnimationsConfig {
    fn apply(&mut self, options: AnimationsOptions) {
        if let Some(enabled) = options.enabled {
            self.enabled = enabled;
        }
        if let Some(overlap) = options.overlap {
            self.overlap = overlap;
        }
        if let Some(show) = options.show {
            if let Some(preset) = show.preset {
                self.show.preset = preset;
            }
            if let Some(speed) = show.speed {
                self.show.speed = speed;
            }
            if let Some(easing) = show.easing {
                self.show.easing = easing;
            }
        }
        if let Some(hide) = options.hide {
            if let Some(preset) = hide.preset {
                self.hide.preset = preset;
            }
            if let Some(speed) = hide.speed {
                self.hide.speed = speed;
            }
            if let Some(easing) = hide.easing {
                self.hide.easing = easing;
            }
            if let Some(offset) = hide.offset {
                self.hide.offset = offset;
            }
        }
        if let Some(shift) = options.shift {
            if let Some(speed) = shift.speed {
                self.shift.speed = speed;
            }
            if let Some(easing) = shift.easing {
                self.shift.easing = easing;
            }
        }
    }
}

impl BehaviourConfig {
    fn apply(&mut self, options: BehaviourOptions) {
        if let Some(auto_hide) = options.auto_hide {
            self.auto_hide = auto_hide;
        }
        if let Some(on_click) = options.on_click {
            self.on_click = on_click;
        }
        if let Some(on_mouseover) = options.on_mouseover {
            self.on_mouseover = on_mouseover;
        }
        if let Some(show_dismiss_button) = options.show_dismiss_button {
            self.show_dismiss_button = show_dismiss_button;
        }
        if let Some(stacking) = options.stacking {
            self.stacking = stacking;
        }
    }
}

impl HorizontalConfig {
    fn apply(&mut self, options: HorizontalOptions) {
        if let Some(position) = options.position {
            self.position = position;
        }
        if let Some(distance) = options.distance {
            self.distance = distance;
        }
    }
}

impl VerticalConfig {
    fn apply(&mut self, options: VerticalOptions) {
        if let Some(position) = options.position {
            self.position = position;
        }
        if let Some(distance) = options.distance {
            self.distance = distance;
        }
        if let Some(gap) = options.gap {
            self.gap = gap;
        }
    }
}

// =============================================================================
// Partial Overrides
// =============================================================================

/// Partial configuration; every absent field keeps its default.
///
/// Switchable fields are `Option<Option<_>>`: the outer layer records whether
/// the field was given, the inner one whether the feature stays enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotifierOptions {
    pub animations: Option<AnimationsOptions>,
    #[serde(alias = "behavior")]
    pub behaviour: Option<BehaviourOptions>,
    pub position: Option<PositionOptions>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationsOptions {
    pub enabled: Option<bool>,
    #[serde(
        serialize_with = "serialize_switch",
        deserialize_with = "deserialize_duration_switch"
    )]
    pub overlap: Option<Option<u64>>,
    pub show: Option<ShowOptions>,
    pub hide: Option<HideOptions>,
    pub shift: Option<ShiftOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShowOptions {
    pub preset: Option<PresetKind>,
    pub speed: Option<u64>,
    pub easing: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HideOptions {
    pub preset: Option<PresetKind>,
    pub speed: Option<u64>,
    pub easing: Option<String>,
    #[serde(
        serialize_with = "serialize_switch",
        deserialize_with = "deserialize_duration_switch"
    )]
    pub offset: Option<Option<u64>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShiftOptions {
    pub speed: Option<u64>,
    pub easing: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BehaviourOptions {
    #[serde(
        alias = "autoHide",
        serialize_with = "serialize_switch",
        deserialize_with = "deserialize_duration_switch"
    )]
    pub auto_hide: Option<Option<u64>>,
    #[serde(
        alias = "onClick",
        serialize_with = "serialize_on_click",
        deserialize_with = "deserialize_on_click"
    )]
    pub on_click: Option<ClickBehaviour>,
    #[serde(
        alias = "onMouseover",
        serialize_with = "serialize_on_mouseover",
        deserialize_with = "deserialize_on_mouseover"
    )]
    pub on_mouseover: Option<MouseoverBehaviour>,
    #[serde(alias = "showDismissButton")]
    pub show_dismiss_button: Option<bool>,
    #[serde(serialize_with = "serialize_switch", deserialize_with = "deserialize_stacking")]
    pub stacking: Option<Option<usize>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PositionOptions {
    pub horizontal: Option<HorizontalOptions>,
    pub vertical: Option<VerticalOptions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HorizontalOptions {
    pub position: Option<HorizontalPosition>,
    pub distance: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerticalOptions {
    pub position: Option<VerticalPosition>,
    pub distance: Option<f32>,
    pub gap: Option<f32>,
}

// =============================================================================
// Deserialization Helpers
// =============================================================================

/// A setting given either as `false` or as a value.
#[derive(Deserialize)]
#[serde(untagged)]
enum Switch<T> {
    Flag(bool),
    Value(T),
}

fn deserialize_duration_switch<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Switch::<i64>::deserialize(deserializer)? {
        Switch::Flag(false) => Ok(Some(None)),
        Switch::Flag(true) => Err(D::Error::custom("expected `false` or a duration in ms")),
        Switch::Value(ms) if ms <= 0 => Ok(Some(None)),
        Switch::Value(ms) => Ok(Some(u64::try_from(ms).ok())),
    }
}

fn deserialize_stacking<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Switch::<i64>::deserialize(deserializer)? {
        Switch::Flag(false) => Ok(Some(None)),
        Switch::Flag(true) => Err(D::Error::custom("expected `false` or a stacking limit")),
        Switch::Value(limit) => Ok(Some(
            usize::try_from(limit)
                .ok()
                .filter(|limit| *limit >= MIN_STACKING),
        )),
    }
}

fn deserialize_on_click<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ClickBehaviour>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Switch::<String>::deserialize(deserializer)? {
        Switch::Flag(false) => Ok(Some(ClickBehaviour::Ignore)),
        Switch::Value(raw) if raw.eq_ignore_ascii_case("hide") => Ok(Some(ClickBehaviour::Hide)),
        Switch::Flag(true) => Err(D::Error::custom("invalid on_click: true")),
        Switch::Value(other) => Err(D::Error::custom(format!("invalid on_click: {}", other))),
    }
}

fn deserialize_on_mouseover<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<MouseoverBehaviour>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Switch::<String>::deserialize(deserializer)? {
        Switch::Flag(false) => Ok(Some(MouseoverBehaviour::Ignore)),
        Switch::Flag(true) => Err(D::Error::custom("invalid on_mouseover: true")),
        Switch::Value(raw) => match raw.to_lowercase().replace(['-', '_'], "").as_str() {
            "pauseautohide" => Ok(Some(MouseoverBehaviour::PauseAutoHide)),
            "resetautohide" => Ok(Some(MouseoverBehaviour::ResetAutoHide)),
            _ => Err(D::Error::custom(format!("invalid on_mouseover: {}", raw))),
        },
    }
}

// =============================================================================
// Serialization Helpers
// =============================================================================

/// Writes a switchable setting back as `false` or its value.
fn serialize_switch<T, S>(
    value: &Option<Option<T>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(None) => serializer.serialize_bool(false),
        Some(Some(value)) => value.serialize(serializer),
    }
}

fn serialize_on_click<S>(
    value: &Option<ClickBehaviour>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(ClickBehaviour::Ignore) => serializer.serialize_bool(false),
        Some(ClickBehaviour::Hide) => serializer.serialize_str("hide"),
    }
}

fn serialize_on_mouseover<S>(
    value: &Option<MouseoverBehaviour>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        None => serializer.serialize_none(),
        Some(MouseoverBehaviour::Ignore) => serializer.serialize_bool(false),
        Some(MouseoverBehaviour::PauseAutoHide) => serializer.serialize_str("pauseAutoHide"),
        Some(MouseoverBehaviour::ResetAutoHide) => serializer.serialize_str("resetAutoHide"),
    }
}

// =============================================================================
// Load Functions
// =============================================================================

/// Returns the config file path with an optional directory override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
        .map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (NotifierConfig, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (NotifierConfig, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    let warning = format!("failed to load {}: {}", path.display(), err);
                    tracing::warn!(path = %path.display(), error = %err, "Falling back to default notifier config");
                    return (NotifierConfig::default(), Some(warning));
                }
            }
        }
    }
    (NotifierConfig::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<NotifierConfig> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Parses TOML overrides and resolves them on top of the defaults.
pub fn parse(content: &str) -> Result<NotifierConfig> {
    let options: NotifierOptions = toml::from_str(content)?;
    Ok(NotifierConfig::from_options(options))
}

/// Writes partial overrides to a specific path, creating parent directories.
pub fn save_to_path(options: &NotifierOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
