// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Catalog**: Service location and request timeouts
//! - **Pagination**: Server page size
//! - **Prefetch**: Neighbouring image cache bounds

// ==========================================================================
// Catalog Defaults
// ==========================================================================

/// Default catalog origin. The API lives under `{api_url}/api/`.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default origin serving `/images/` and `/thumbs/`.
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum HTTP request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum HTTP request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Path of the remote UI configuration document, relative to the site origin.
pub const REMOTE_UI_CONFIG_PATH: &str = "/.ui/config.json";

// ==========================================================================
// Pagination Defaults
// ==========================================================================

/// Number of records the catalog returns per listing page.
pub const CATALOG_PAGE_SIZE: u32 = 16;

// ==========================================================================
// Prefetch Defaults
// ==========================================================================

/// Default byte budget of the image prefetch cache (64 MB).
pub const DEFAULT_PREFETCH_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Minimum byte budget (1 MB).
pub const MIN_PREFETCH_MAX_BYTES: usize = 1024 * 1024;

/// Maximum byte budget (1 GB).
pub const MAX_PREFETCH_MAX_BYTES: usize = 1024 * 1024 * 1024;

/// Default number of cached images.
pub const DEFAULT_PREFETCH_MAX_IMAGES: usize = 16;

/// Minimum number of cached images.
pub const MIN_PREFETCH_MAX_IMAGES: usize = 1;

/// Maximum number of cached images.
pub const MAX_PREFETCH_MAX_IMAGES: usize = 128;

/// Default number of neighbours prefetched in each direction.
pub const DEFAULT_PREFETCH_COUNT: usize = 1;

/// Maximum number of neighbours prefetched in each direction.
pub const MAX_PREFETCH_COUNT: usize = 8;
