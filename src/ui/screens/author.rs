// SPDX-License-Identifier: MPL-2.0
//! Author page: details, aliases and the author's albums, paged.

use super::required_identity;
use crate::application::port::{AddressedScreen, CatalogApi, Collection, ListFilters};
use crate::application::query::{Navigator, Route};
use crate::domain::{Address, Author};
use crate::error::Result;
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{
    Card, RenderContext, ALBUM_TAG, ALIAS_TAG, DETAILS_TAG, PAGINATION_TAG,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AuthorScreen {
    api: Arc<dyn CatalogApi>,
    filters: ListFilters,
    image_base_url: String,
    author: Option<Author>,
    details: ViewBinder,
    aliases: ViewBinder,
    albums: ViewBinder,
    pagination: ViewBinder,
    container: MemoryContainer,
}

impl AuthorScreen {
    pub fn new(api: Arc<dyn CatalogApi>, filters: ListFilters, ctx: RenderContext) -> Self {
        Self {
            api,
            filters,
            image_base_url: ctx.image_base_url.clone(),
            author: None,
            details: ViewBinder::new(DETAILS_TAG, ctx.clone()),
            aliases: ViewBinder::new(ALIAS_TAG, ctx.clone()),
            albums: ViewBinder::new(ALBUM_TAG, ctx.clone()),
            pagination: ViewBinder::new(PAGINATION_TAG, ctx),
            container: MemoryContainer::new(),
        }
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    #[must_use]
    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    /// Replaces the album cards with page `page` of the author's albums.
    async fn show_albums(&mut self, author_id: &str, page: u32) -> Result<()> {
        let collection = Collection::AuthorAlbums(author_id.to_string());
        let listing = self.api.get_page(&collection, page, self.filters).await?;
        let navigator = Navigator::new(Route::AuthorAlbums(author_id.to_string()), self.image_base_url.clone());

        self.albums.clear_scope(&mut self.container);
        self.pagination.clear_scope(&mut self.container);
        for entry in listing.entries {
            self.albums.display(&mut self.container, &Card::summary(entry));
        }
        self.pagination.display(
            &mut self.container,
            &Card::Pagination(navigator.render(&listing.pagination)),
        );
        Ok(())
    }
}

#[async_trait]
impl AddressedScreen for AuthorScreen {
    async fn load(&mut self, address: &Address) -> Result<()> {
        let author_id = required_identity(address, "get author")?.to_string();
        let mut author = self.api.get_author(&author_id).await?;
        author.aliases = self.api.author_aliases(&author_id).await?;
        tracing::info!(author = %author_id, aliases = author.aliases.len(), "author loaded");

        self.details
            .display(&mut self.container, &Card::AuthorDetails(author.clone()));
        for alias in &author.aliases {
            self.aliases
                .display(&mut self.container, &Card::AliasSummary(alias.clone()));
        }
        self.author = Some(author);

        self.show_albums(&author_id, address.page(1)).await
    }

    async fn render_secondary(&mut self, address: &Address) -> Result<()> {
        let Some(author_id) = self.author.as_ref().map(|a| a.id.clone()) else {
            return self.load(address).await;
        };
        self.show_albums(&author_id, address.page(1)).await
    }

    fn clear(&mut self) {
        self.details.clear_scope(&mut self.container);
        self.aliases.clear_scope(&mut self.container);
        self.albums.clear_scope(&mut self.container);
        self.pagination.clear_scope(&mut self.container);
        self.author = None;
    }
}
