// SPDX-License-Identifier: MPL-2.0
//! Presentation layer: screens, element binding and notifications.
//!
//! # Screens
//!
//! - [`screens`] - Listing, author, album, viewer and editor screens
//! - [`sync`] - Address-driven reload decisions (`NavigationSynchronizer`)
//!
//! # Shared Infrastructure
//!
//! - [`binder`] - Identity-keyed element reconciliation
//! - [`container`] - In-memory element container
//! - [`elements`] - Renderable cards per entity kind
//! - [`notifications`] - Notification queue for user feedback

pub mod binder;
pub mod container;
pub mod elements;
pub mod notifications;
pub mod screens;
pub mod sync;
