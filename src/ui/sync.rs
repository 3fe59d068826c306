// SPDX-License-Identifier: MPL-2.0
//! Address-driven screen synchronization.
//!
//! The [`NavigationSynchronizer`] caches the address currently shown and
//! decides, for every external address change, whether the screen needs a
//! full reload, a cheap re-render of its secondary component, or nothing.

use crate::application::port::AddressedScreen;
use crate::domain::Address;
use crate::error::Result;
use crate::ui::notifications::{Manager, Notification};
use tracing::{debug, info};

/// How an address change affects the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadKind {
    /// The identity component changed: clear and reload everything.
    ResourceChange,
    /// Only the secondary component changed: no parent refetch.
    CheapRender,
    /// Nothing relevant changed.
    Noop,
}

/// What the screen is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Terminal until the next resource change.
    NotFound,
}

/// Handle for one full load, returned by [`NavigationSynchronizer::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    previous_state: ViewState,
    previous_address: Option<Address>,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

type ChangeHandler = Box<dyn FnMut(ReloadKind, &Address) + Send>;

/// Keeps a screen in step with the navigation address.
pub struct NavigationSynchronizer {
    current: Option<Address>,
    state: ViewState,
    generation: u64,
    identity_index: usize,
    secondary_index: usize,
    handlers: Vec<ChangeHandler>,
}

impl NavigationSynchronizer {
    /// Synchronizer treating component 0 as the resource identity and
    /// component 1 as the secondary cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::with_components(0, 1)
    }

    #[must_use]
    pub fn with_components(identity_index: usize, secondary_index: usize) -> Self {
        Self {
            current: None,
            state: ViewState::Idle,
            generation: 0,
            identity_index,
            secondary_index,
            handlers: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn current(&self) -> Option<&Address> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registers a callback invoked with every decoded address change.
    pub fn on_address_change<F>(&mut self, handler: F)
    where
        F: FnMut(ReloadKind, &Address) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Classifies `next` against the cached address.
    #[must_use]
    pub fn classify(&self, next: &Address) -> ReloadKind {
        let Some(current) = &self.current else {
            return ReloadKind::ResourceChange;
        };

        if current.component(self.identity_index) != next.component(self.identity_index) {
            ReloadKind::ResourceChange
        } else if current.component(self.secondary_index) != next.component(self.secondary_index) {
            ReloadKind::CheapRender
        } else {
            ReloadKind::Noop
        }
    }

    /// Starts a full load of `address` and returns its ticket.
    ///
    /// Every call supersedes tickets handed out before.
    pub fn begin(&mut self, address: Address) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            previous_state: self.state,
            previous_address: self.current.replace(address),
        };
        self.state = ViewState::Loading;
        ticket
    }

    /// Applies the outcome of the load behind `ticket`.
    ///
    /// Returns `false` and changes nothing when a later load superseded the
    /// ticket. A not-found outcome enters [`ViewState::NotFound`]; any other
    /// failure restores the previous state and pushes an error notification.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<()>, notifications: &mut Manager) -> bool {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale load"
            );
            return false;
        }

        match result {
            Ok(()) => {
                self.state = ViewState::Loaded;
                notifications.clear_load_errors();
            }
            Err(err) if err.is_not_found() => {
                info!(error = %err, "resource not found");
                self.state = ViewState::NotFound;
            }
            Err(err) => {
                self.state = ticket.previous_state;
                self.current = ticket.previous_address;
                notifications.push(Notification::load_error(err.user_message()));
            }
        }
        true
    }

    /// Performs the initial full load, whatever address is cached.
    pub async fn start(
        &mut self,
        raw: &str,
        screen: &mut dyn AddressedScreen,
        notifications: &mut Manager,
    ) -> ReloadKind {
        let address = Address::parse(raw);
        self.notify(ReloadKind::ResourceChange, &address);
        self.reload(address, screen, notifications).await;
        ReloadKind::ResourceChange
    }

    /// Handles an external address change.
    pub async fn navigate(
        &mut self,
        raw: &str,
        screen: &mut dyn AddressedScreen,
        notifications: &mut Manager,
    ) -> ReloadKind {
        let address = Address::parse(raw);
        let kind = self.classify(&address);
        debug!(address = %address, ?kind, "address changed");
        self.notify(kind, &address);

        match kind {
            ReloadKind::Noop => {}
            ReloadKind::ResourceChange => self.reload(address, screen, notifications).await,
            ReloadKind::CheapRender => self.render_secondary(address, screen, notifications).await,
        }
        kind
    }

    fn notify(&mut self, kind: ReloadKind, address: &Address) {
        for handler in &mut self.handlers {
            handler(kind, address);
        }
    }

    async fn reload(&mut self, address: Address, screen: &mut dyn AddressedScreen, notifications: &mut Manager) {
        info!(address = %address, "loading");
        let ticket = self.begin(address.clone());
        screen.clear();
        let result = screen.load(&address).await;
        self.finish(ticket, result, notifications);
    }

    async fn render_secondary(
        &mut self,
        address: Address,
        screen: &mut dyn AddressedScreen,
        notifications: &mut Manager,
    ) {
        let previous = self.current.replace(address.clone());
        if self.state == ViewState::NotFound {
            debug!(address = %address, "ignoring render while not found");
            return;
        }

        match screen.render_secondary(&address).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                info!(error = %err, "resource not found");
                self.state = ViewState::NotFound;
            }
            Err(err) => {
                self.current = previous;
                notifications.push(Notification::error(err.user_message()));
            }
        }
    }
}

impl Default for NavigationSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NavigationSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationSynchronizer")
            .field("current", &self.current)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
