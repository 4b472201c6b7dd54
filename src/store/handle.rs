//! Consumer-facing store handle.
//!
//! `CatalogStore` wires the debouncer and the controller together around
//! a catalog client and exposes the whole consumer surface: `set_search`,
//! `set_page`, `hydrate`, and snapshot observation. Dropping the handle
//! closes both input channels, which winds down the controller and the
//! debounce task cooperatively.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::controller::{self, Bootstrap, Command};
use super::debounce::debounce_channel;
use super::query_state::{QueryState, QuerySnapshot};
use crate::client::CatalogClient;

/// Tunables for a [`CatalogStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Quiet interval a changing search text must survive before a fetch
    /// is considered.
    pub debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
        }
    }
}

/// The reactive query synchronization store.
///
/// Cheap to hand around by reference; all state lives in the controller
/// task. Observers get [`QuerySnapshot`] values and can never mutate the
/// state directly.
#[derive(Debug)]
pub struct CatalogStore {
    search_tx: mpsc::UnboundedSender<String>,
    command_tx: mpsc::UnboundedSender<Command>,
    watch_rx: watch::Receiver<QuerySnapshot>,
}

impl CatalogStore {
    /// Spawn the store's tasks around `client`.
    pub fn new(client: Arc<dyn CatalogClient>, config: StoreConfig) -> Self {
        let (state, watch_rx) = QueryState::new();
        let (search_tx, debounced_rx) = debounce_channel(config.debounce);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(controller::run(state, client, command_rx, debounced_rx));
        Self {
            search_tx,
            command_tx,
            watch_rx,
        }
    }

    /// Update the search text.
    ///
    /// Debounced: rapid successive calls collapse into one effective
    /// change. When the settled text differs from the current search, the
    /// page resets to 1 and a fetch is issued.
    pub fn set_search(&self, text: impl Into<String>) {
        let _ = self.search_tx.send(text.into());
    }

    /// Navigate to a 1-based page, returning the page actually targeted.
    ///
    /// Clamped here, at the call site, against the last known page count:
    /// values below 1 become 1, and when a total is known the page cannot
    /// run past the end.
    pub fn set_page(&self, page: u32) -> u32 {
        let total_pages = self.watch_rx.borrow().total_pages();
        let page = clamp_page(page, total_pages);
        let _ = self.command_tx.send(Command::SetPage(page));
        page
    }

    /// Seed the store with server-provided initial data, without a fetch.
    ///
    /// Only effective before the first fetch has been issued; later
    /// bootstraps are ignored.
    pub fn hydrate(&self, bootstrap: Bootstrap) {
        let _ = self.command_tx.send(Command::Hydrate(bootstrap));
    }

    /// A fresh observer handle for the published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.watch_rx.clone()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> QuerySnapshot {
        self.watch_rx.borrow().clone()
    }
}

/// Clamp a requested page into `[1, total_pages]`, or just to `>= 1` when
/// no total is known yet.
pub(crate) fn clamp_page(requested: u32, total_pages: u64) -> u32 {
    let page = requested.max(1);
    if total_pages == 0 {
        return page;
    }
    page.min(total_pages.min(u64::from(u32::MAX)) as u32)
}

// ===== Tests =====

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
