// SPDX-License-Identifier: MPL-2.0
//! `minori` is a client for the minori media catalog.
//!
//! It browses albums, authors and images over the catalog's JSON API, keeps
//! screens in step with a colon-delimited navigation address, and reorders
//! album images through sparse order keys.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;
