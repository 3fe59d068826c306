// SPDX-License-Identifier: MPL-2.0
//! Query services (CQRS read-side).
//!
//! These services do not modify state; they derive navigation targets from
//! catalog data.
//!
//! - [`navigation`]: Cursor sequences over an album's images (`CursorSequence`)
//! - [`pagination`]: Page sequences and link rendering (`Navigator`)

pub mod navigation;
pub mod pagination;

pub use navigation::CursorSequence;
pub use pagination::{NavLinks, NavTargets, Navigator, PageSequence, Route};
