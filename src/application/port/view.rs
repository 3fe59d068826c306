// SPDX-License-Identifier: MPL-2.0
//! Presentation ports: element containers and address-driven screens.

use crate::domain::Address;
use crate::error::Result;
use async_trait::async_trait;

/// A DOM-like parent scope holding tagged, identity-keyed elements.
///
/// Elements keep insertion order. At most one element exists per
/// `(tag, identity)` pair when writes go through a
/// [`ViewBinder`](crate::ui::binder::ViewBinder).
pub trait Container {
    /// Returns `true` when an element with `tag` and `identity` exists.
    fn contains(&self, tag: &str, identity: &str) -> bool;

    /// Appends a new, empty element.
    fn append(&mut self, tag: &str, identity: &str);

    /// Replaces the rendered content of an existing element.
    ///
    /// Does nothing when the element does not exist.
    fn replace_content(&mut self, tag: &str, identity: &str, content: String);

    /// Removes the element. Returns `true` if one was removed.
    fn remove(&mut self, tag: &str, identity: &str) -> bool;

    /// Identities of all elements carrying `tag`, in document order.
    fn identities(&self, tag: &str) -> Vec<String>;
}

/// A screen whose content is driven by an [`Address`].
///
/// The [`NavigationSynchronizer`](crate::ui::sync::NavigationSynchronizer)
/// decides which of these methods runs for an address change.
#[async_trait]
pub trait AddressedScreen: Send {
    /// Full load for a new resource. Replaces every bound element.
    async fn load(&mut self, address: &Address) -> Result<()>;

    /// Updates the view for a change of the secondary address component only.
    async fn render_secondary(&mut self, address: &Address) -> Result<()>;

    /// Removes every bound element before a full reload.
    fn clear(&mut self);
}
