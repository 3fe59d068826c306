// SPDX-License-Identifier: MPL-2.0
//! Command services (CQRS write-side).
//!
//! - [`ordering`]: Bake and move image order keys (`OrderEngine`)
//! - [`upload`]: Create-then-upload with compensation

pub mod ordering;
pub mod upload;

pub use ordering::OrderEngine;
pub use upload::upload_new_item;
