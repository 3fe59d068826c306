// SPDX-License-Identifier: MPL-2.0
//! Reconciling view binder.
//!
//! A binder owns one tag scope inside a container and keeps at most one
//! element per identity in it. Missing elements are created on first
//! display; nothing here reports errors.

use super::elements::{RenderContext, Renderable};
use crate::application::port::Container;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBinder {
    tag: &'static str,
    ctx: RenderContext,
}

impl ViewBinder {
    #[must_use]
    pub fn new(tag: &'static str, ctx: RenderContext) -> Self {
        Self { tag, ctx }
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn set_context(&mut self, ctx: RenderContext) {
        self.ctx = ctx;
    }

    /// Creates the element for `item` when missing, then replaces its
    /// content with a fresh render.
    ///
    /// `item` must carry this binder's tag.
    pub fn display<C, R>(&self, container: &mut C, item: &R)
    where
        C: Container + ?Sized,
        R: Renderable + ?Sized,
    {
        debug_assert_eq!(
            item.tag(),
            self.tag,
            "{} element displayed through the {} binder",
            item.tag(),
            self.tag
        );
        let identity = item.identity();
        if !container.contains(self.tag, identity) {
            container.append(self.tag, identity);
        }
        container.replace_content(self.tag, identity, item.render(&self.ctx));
    }

    /// Removes the element bound to `identity`, if any.
    pub fn destroy<C: Container + ?Sized>(&self, container: &mut C, identity: &str) {
        if container.remove(self.tag, identity) {
            tracing::trace!(tag = self.tag, identity, "element removed");
        }
    }

    /// Removes every element in this binder's scope.
    pub fn clear_scope<C: Container + ?Sized>(&self, container: &mut C) {
        for identity in container.identities(self.tag) {
            container.remove(self.tag, &identity);
        }
    }

    /// Optionally destroys the existing element, then displays `item`.
    ///
    /// Destroying first moves the element to the end of the container.
    pub fn lifecycle<C, R>(&self, container: &mut C, item: &R, destroy_first: bool)
    where
        C: Container + ?Sized,
        R: Renderable + ?Sized,
    {
        if destroy_first {
            self.destroy(container, item.identity());
        }
        self.display(container, item);
    }

    /// Displays `items` in order and destroys elements whose identity is no
    /// longer listed.
    pub fn sync_all<C, R>(&self, container: &mut C, items: &[R])
    where
        C: Container + ?Sized,
        R: Renderable,
    {
        for identity in container.identities(self.tag) {
            if !items.iter().any(|item| item.identity() == identity) {
                container.remove(self.tag, &identity);
            }
        }
        for item in items {
            self.display(container, item);
        }
    }
}
