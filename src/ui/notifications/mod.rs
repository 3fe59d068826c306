// SPDX-License-Identifier: MPL-2.0
//! Notification system for user feedback.
//!
//! Notifications report the outcome of actions (cover updated, upload failed,
//! etc.) without interrupting navigation.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for queuing and lifecycle management
//!
//! # Usage
//!
//! ```ignore
//! use minori::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::success("Image moved up"));
//! for line in manager.visible() {
//!     println!("{line}");
//! }
//! ```
//!
//! # Design Considerations
//!
//! - Duration: 3s for success/info, 5s for warnings, manual dismiss for errors
//! - Max visible notifications: 3 (others are queued)

mod manager;
mod notification;

pub use manager::Manager;
pub use notification::{Notification, NotificationId, Severity};
