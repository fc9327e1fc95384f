// SPDX-License-Identifier: MPL-2.0
//! `toaster` shows queued, stackable toast notifications.
//!
//! Requests are serialized through an action queue and handled one at a time
//! by a container that owns the active notifications. The container decides
//! which notifications stay visible, where they sit, and how their show, hide
//! and shift animations are staged. Drawing is left to the host through the
//! [`visual`] traits; [`visual::HeadlessRenderer`] is an in-memory backend.

#![doc(html_root_url = "https://docs.rs/toaster/0.3.0")]

pub mod animation;
pub mod config;
pub mod error;
pub mod notifications;
pub mod visual;

#[cfg(test)]
mod test_utils;

pub use config::NotifierConfig;
pub use notifications::{Notifier, NotificationOptions, Subscriptions};
