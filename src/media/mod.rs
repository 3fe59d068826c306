// SPDX-License-Identifier: MPL-2.0
//! Image byte handling for the viewer.

pub mod prefetch;

pub use prefetch::{
    shared_cache, spawn_prefetch, ImagePrefetchCache, PrefetchConfig, PrefetchStats,
    SharedPrefetchCache,
};
