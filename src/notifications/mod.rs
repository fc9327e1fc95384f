// SPDX-License-Identifier: MPL-2.0
//! Queued notification orchestration.
//!
//! Every request made through a [`Notifier`] becomes an [`Action`] on the
//! [`ActionQueue`]. The [`Container`] consumes actions one at a time and runs
//! each to completion, animations included, before asking for the next.
//!
//! # Components
//!
//! - [`action`] - the six action kinds
//! - [`queue`] - FIFO with at most one action in flight
//! - [`container`] - active list, stacking and animation staging
//! - [`service`] - the public [`Notifier`] handle
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use toaster::config::NotifierConfig;
//! use toaster::notifications::Notifier;
//! use toaster::visual::{HeadlessRenderer, SurfaceMount};
//!
//! let config = Arc::new(NotifierConfig::default());
//! let mount = SurfaceMount::new(Arc::new(HeadlessRenderer::new(48.0)), Arc::clone(&config));
//! let (notifier, subscriptions) = Notifier::spawn(config, Arc::new(mount));
//!
//! notifier.notify("success", "Saved", None);
//! notifier.hide_all();
//! ```

mod action;
mod container;
mod notification;
mod queue;
mod service;
mod staging;

pub use action::{Action, CustomAction, CustomActionEvent};
pub use container::Container;
pub use notification::{Notification, NotificationId, NotificationOptions};
pub use queue::{ActionQueue, ActionStream};
pub use service::{Notifier, Subscriptions};
