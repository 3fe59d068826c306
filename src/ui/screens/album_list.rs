// SPDX-License-Identifier: MPL-2.0
//! Full album list served at `/list.html`.
//!
//! One line per album, naturally sorted by title, with the album count. The
//! address is not used: every load lists the whole catalog.

use crate::application::port::{AddressedScreen, CatalogApi, ListFilters};
use crate::domain::Address;
use crate::error::Result;
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{Card, RenderContext, ALBUM_LIST_TAG, DETAILS_TAG};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AlbumListScreen {
    api: Arc<dyn CatalogApi>,
    filters: ListFilters,
    entries: ViewBinder,
    count: ViewBinder,
    container: MemoryContainer,
    total: Option<usize>,
}

impl AlbumListScreen {
    /// `filters.include_disabled` lists hidden albums too (maintenance mode).
    pub fn new(api: Arc<dyn CatalogApi>, filters: ListFilters, ctx: RenderContext) -> Self {
        Self {
            api,
            filters,
            entries: ViewBinder::new(ALBUM_LIST_TAG, ctx.clone()),
            count: ViewBinder::new(DETAILS_TAG, ctx),
            container: MemoryContainer::new(),
            total: None,
        }
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    /// Number of albums listed by the last load.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        self.total
    }
}

#[async_trait]
impl AddressedScreen for AlbumListScreen {
    async fn load(&mut self, _address: &Address) -> Result<()> {
        let albums = self.api.list_all_albums(self.filters).await?;
        tracing::info!(count = albums.len(), "album list loaded");

        let total = albums.len();
        let cards: Vec<Card> = albums.into_iter().map(Card::AlbumListEntry).collect();
        self.count.display(&mut self.container, &Card::AlbumCount(total));
        self.entries.sync_all(&mut self.container, &cards);
        self.total = Some(total);
        Ok(())
    }

    async fn render_secondary(&mut self, address: &Address) -> Result<()> {
        self.load(address).await
    }

    fn clear(&mut self) {
        self.entries.clear_scope(&mut self.container);
        self.count.clear_scope(&mut self.container);
        self.total = None;
    }
}
