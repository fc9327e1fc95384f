// SPDX-License-Identifier: MPL-2.0
//! Actions flowing through the notifier's queue.

use super::notification::{NotificationId, NotificationOptions};

/// A single queued intent, processed atomically by the container.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Create and show a new notification.
    Show(NotificationOptions),
    /// Hide a notification by ID.
    Hide(NotificationId),
    /// Hide the notification that was shown first.
    HideOldest,
    /// Hide the notification that was shown last.
    HideNewest,
    /// Hide every notification.
    HideAll,
    /// Forward a custom action to the application, then hide its notification.
    CustomAction(CustomAction),
}

impl Action {
    /// Short, stable name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Show(_) => "SHOW",
            Action::Hide(_) => "HIDE",
            Action::HideOldest => "HIDE_OLDEST",
            Action::HideNewest => "HIDE_NEWEST",
            Action::HideAll => "HIDE_ALL",
            Action::CustomAction(_) => "CUSTOM_ACTION",
        }
    }
}

/// A custom action triggered from inside a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAction {
    pub notification_id: NotificationId,
    pub action_name: String,
    pub action_payload: Option<String>,
}

/// A custom action as delivered to the application.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomActionEvent {
    /// Notification the action was triggered from.
    pub notification_id: NotificationId,
    pub name: String,
    pub payload: Option<String>,
}

impl From<CustomAction> for CustomActionEvent {
    fn from(action: CustomAction) -> Self {
        Self {
            notification_id: action.notification_id,
            name: action.action_name,
            payload: action.action_payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinct() {
        let actions = [
            Action::Show(NotificationOptions::new("info")),
            Action::Hide(NotificationId::from("a")),
            Action::HideOldest,
            Action::HideNewest,
            Action::HideAll,
            Action::CustomAction(CustomAction {
                notification_id: NotificationId::from("a"),
                action_name: "undo".to_string(),
                action_payload: None,
            }),
        ];
        let mut kinds: Vec<_> = actions.iter().map(Action::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), actions.len());
    }

    #[test]
    fn custom_action_converts_to_event() {
        let event = CustomActionEvent::from(CustomAction {
            notification_id: NotificationId::from("a"),
            action_name: "undo".to_string(),
            action_payload: Some("42".to_string()),
        });
        assert_eq!(event.notification_id.as_str(), "a");
        assert_eq!(event.name, "undo");
        assert_eq!(event.payload.as_deref(), Some("42"));
    }
}
