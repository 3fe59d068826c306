// SPDX-License-Identifier: MPL-2.0
//! Paged listings: bookshelf, authors and author aliases.
//!
//! The bookshelf also creates albums.

use crate::application::port::{AddressedScreen, CatalogApi, Collection, ListFilters};
use crate::application::query::{Navigator, Route};
use crate::domain::{Address, Album, AlbumFields, EntityKind, PageDescriptor};
use crate::error::Result;
use crate::ui::binder::ViewBinder;
use crate::ui::container::MemoryContainer;
use crate::ui::elements::{Card, RenderContext, PAGINATION_TAG};
use crate::ui::notifications::{Manager, Notification};
use async_trait::async_trait;
use std::sync::Arc;

pub struct ListingScreen {
    api: Arc<dyn CatalogApi>,
    collection: Collection,
    filters: ListFilters,
    navigator: Navigator,
    entries: ViewBinder,
    pagination: ViewBinder,
    container: MemoryContainer,
    descriptor: Option<PageDescriptor>,
}

impl ListingScreen {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        collection: Collection,
        filters: ListFilters,
        ctx: RenderContext,
    ) -> Self {
        let (route, kind) = match &collection {
            Collection::Albums => (Route::Bookshelf, EntityKind::Album),
            Collection::Authors => (Route::Authors, EntityKind::Author),
            Collection::AuthorAliases => (Route::AuthorAliases, EntityKind::AuthorAlias),
            Collection::AuthorAlbums(author) => (Route::AuthorAlbums(author.clone()), EntityKind::Album),
        };

        Self {
            api,
            collection,
            filters,
            navigator: Navigator::new(route, ctx.image_base_url.clone()),
            entries: ViewBinder::new(Card::summary_tag(kind), ctx.clone()),
            pagination: ViewBinder::new(PAGINATION_TAG, ctx),
            container: MemoryContainer::new(),
            descriptor: None,
        }
    }

    #[must_use]
    pub fn container(&self) -> &MemoryContainer {
        &self.container
    }

    /// Pagination of the page currently shown.
    #[must_use]
    pub fn descriptor(&self) -> Option<&PageDescriptor> {
        self.descriptor.as_ref()
    }

    /// Creates an album. The caller moves on to its editor, so the listing
    /// is left as it is.
    pub async fn create_album(&mut self, fields: &AlbumFields, notifications: &mut Manager) -> Result<Album> {
        match self.api.create_album(fields).await {
            Ok(album) => {
                tracing::info!(album = %album.id, "album created");
                notifications.push(Notification::success("Album created, redirecting..."));
                Ok(album)
            }
            Err(err) => {
                notifications.push(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }
}

#[async_trait]
impl AddressedScreen for ListingScreen {
    async fn load(&mut self, address: &Address) -> Result<()> {
        let page = address.page(0);
        let listing = self.api.get_page(&self.collection, page, self.filters).await?;
        tracing::info!(
            collection = %self.collection,
            page,
            count = listing.entries.len(),
            "listing loaded"
        );

        let cards: Vec<Card> = listing.entries.into_iter().map(Card::summary).collect();
        self.entries.sync_all(&mut self.container, &cards);
        self.pagination.display(
            &mut self.container,
            &Card::Pagination(self.navigator.render(&listing.pagination)),
        );
        self.descriptor = Some(listing.pagination);
        Ok(())
    }

    async fn render_secondary(&mut self, _address: &Address) -> Result<()> {
        // Listing addresses carry only the page.
        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear_scope(&mut self.container);
        self.pagination.clear_scope(&mut self.container);
        self.descriptor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::Container;
    use crate::infrastructure::InMemoryCatalog;
    use crate::ui::elements::ALBUM_TAG;

    #[tokio::test]
    async fn bookshelf_page_renders_cards_and_links() {
        let catalog = Arc::new(InMemoryCatalog::new());
        for i in 0..20 {
            catalog.seed_album(&format!("album {i}")).await;
        }
        let mut screen = ListingScreen::new(
            catalog,
            Collection::Albums,
            ListFilters::default(),
            RenderContext::new("http://img"),
        );

        screen.load(&Address::parse("2")).await.unwrap();

        assert_eq!(screen.container().identities(ALBUM_TAG).len(), 4);
        let pagination = screen.container().content(PAGINATION_TAG, "pagination").unwrap();
        assert!(pagination.contains("first(/#1)"));
        assert!(pagination.contains("next(-)"));
        assert!(pagination.contains("2 / 2(/list.html)"));
    }

    #[tokio::test]
    async fn clear_empties_the_screen() {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.seed_author("Someone").await;
        let mut screen = ListingScreen::new(
            catalog,
            Collection::Authors,
            ListFilters::default(),
            RenderContext::new("http://img"),
        );

        screen.load(&Address::parse("")).await.unwrap();
        assert_eq!(screen.descriptor().map(|d| d.current_page), Some(1));
        screen.clear();

        assert!(screen.container().is_empty());
        assert!(screen.descriptor().is_none());
    }

    #[tokio::test]
    async fn create_album_notifies_and_returns_album() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let mut screen = ListingScreen::new(
            catalog.clone(),
            Collection::Albums,
            ListFilters::default(),
            RenderContext::new("http://img"),
        );
        let mut notifications = Manager::new();
        let fields = AlbumFields {
            title: Some("New".into()),
            author: Some("Ann".into()),
            ..AlbumFields::default()
        };

        let album = screen.create_album(&fields, &mut notifications).await.unwrap();

        assert_eq!(catalog.get_album(&album.id).await.unwrap().title.as_deref(), Some("New"));
        assert_eq!(album.author_alias.map(|alias| alias.name).as_deref(), Some("Ann"));
        assert_eq!(
            notifications.visible().next().map(|n| n.message().to_string()),
            Some("Album created, redirecting...".to_string())
        );
    }
}
