// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, its identifier, and the
//! options a caller supplies when asking for a new notification.

use crate::visual::NotificationVisual;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    /// Generates a new unique notification ID (`ID_<n>`).
    pub fn generate() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(format!("ID_{}", COUNTER.fetch_add(1, Ordering::Relaxed)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a caller asks for when showing a notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOptions {
    /// Explicit ID; generated when absent.
    pub id: Option<NotificationId>,
    /// Notification type (e.g. `"success"`, `"error"`), used for styling.
    pub kind: String,
    pub message: Option<String>,
    /// Opaque template key interpreted by the host renderer.
    pub template: Option<String>,
    /// Custom fields passed through to the renderer untouched.
    pub extra: BTreeMap<String, String>,
}

impl NotificationOptions {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Adds a custom field for the renderer.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A notification tracked by the container.
#[derive(Clone)]
pub struct Notification {
    id: NotificationId,
    kind: String,
    message: Option<String>,
    template: Option<String>,
    extra: BTreeMap<String, String>,
    /// Assigned once the visual reports ready.
    visual: Option<Arc<dyn NotificationVisual>>,
}

impl Notification {
    /// Creates a notification from caller options, generating an ID if needed.
    pub fn new(options: NotificationOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(NotificationId::generate),
            kind: options.kind,
            message: options.message,
            template: options.template,
            extra: options.extra,
            visual: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Returns the visual, or `None` while it is still being mounted.
    #[must_use]
    pub fn visual(&self) -> Option<&Arc<dyn NotificationVisual>> {
        self.visual.as_ref()
    }

    pub(crate) fn attach(&mut self, visual: Arc<dyn NotificationVisual>) {
        self.visual = Some(visual);
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("template", &self.template)
            .field("extra", &self.extra)
            .field("mounted", &self.visual.is_some())
            .finish()
    }
}
