//! Observable query state.
//!
//! `QueryState` is the single source of truth for the gallery: search
//! text, page number, loading flag, result set and total count. It is
//! owned exclusively by the synchronization controller; every write
//! publishes a fresh [`QuerySnapshot`] on a watch channel, which is the
//! only surface observers see. Observers cannot mutate anything.

use tokio::sync::watch;

use crate::client::PAGE_SIZE;
use crate::model::Character;

// ===== QuerySnapshot =====

/// A point-in-time view of the query state.
///
/// `characters` and `total` always originate from one response (or one
/// bootstrap), identified by `origin`. While a fetch is in flight
/// (`loading` is true) the previous result set stays visible, so `origin`
/// may lag behind `search`/`page` until the fetch settles.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    /// Current free-text filter. Empty means "the whole catalog".
    pub search: String,
    /// Current 1-based page number.
    pub page: u32,
    /// True strictly while a fetch for the current pair is outstanding.
    pub loading: bool,
    /// The most recent coherent result set.
    pub characters: Vec<Character>,
    /// Total match count across all pages, from the same response as
    /// `characters`.
    pub total: u64,
    /// The (search, page) pair that produced `characters`/`total`, or
    /// `None` before any fetch or bootstrap has settled.
    pub origin: Option<(String, u32)>,
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self {
            search: String::new(),
            // Page numbers are 1-based; there is no page 0.
            page: 1,
            loading: false,
            characters: Vec::new(),
            total: 0,
            origin: None,
        }
    }
}

impl QuerySnapshot {
    /// Derived page count: `ceil(total / PAGE_SIZE)`.
    ///
    /// Zero when the catalog reported no matches.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(PAGE_SIZE)
    }

    /// Whether this snapshot's results answer the given pair and no
    /// newer fetch is outstanding.
    pub fn settled_for(&self, search: &str, page: u32) -> bool {
        !self.loading
            && self
                .origin
                .as_ref()
                .is_some_and(|(s, p)| s == search && *p == page)
    }
}

// ===== QueryState =====

/// Controller-owned mutable truth behind the published snapshots.
///
/// Writes are synchronous and publish immediately. Clamping and derived
/// resets (search change forcing page 1) are deliberately NOT done here;
/// they belong to the controller and the store facade.
#[derive(Debug)]
pub(crate) struct QueryState {
    snapshot: QuerySnapshot,
    tx: watch::Sender<QuerySnapshot>,
}

impl QueryState {
    /// A fresh state (empty search, page 1) plus the observer handle.
    pub(crate) fn new() -> (Self, watch::Receiver<QuerySnapshot>) {
        let snapshot = QuerySnapshot::default();
        let (tx, rx) = watch::channel(snapshot.clone());
        (Self { snapshot, tx }, rx)
    }

    pub(crate) fn search(&self) -> &str {
        &self.snapshot.search
    }

    pub(crate) fn page(&self) -> u32 {
        self.snapshot.page
    }

    pub(crate) fn origin(&self) -> Option<&(String, u32)> {
        self.snapshot.origin.as_ref()
    }

    pub(crate) fn set_search(&mut self, search: String) {
        self.snapshot.search = search;
        self.publish();
    }

    pub(crate) fn set_page(&mut self, page: u32) {
        self.snapshot.page = page;
        self.publish();
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.snapshot.loading = loading;
        self.publish();
    }

    /// Adopt one coherent result set.
    ///
    /// `characters` and `total` are written together with the pair that
    /// produced them; there is no way to set them separately. The loading
    /// flag is cleared in the same publish: observers never see a settled
    /// result still marked as in flight.
    pub(crate) fn set_results(
        &mut self,
        characters: Vec<Character>,
        total: u64,
        origin: (String, u32),
    ) {
        self.snapshot.characters = characters;
        self.snapshot.total = total;
        self.snapshot.origin = Some(origin);
        self.snapshot.loading = false;
        self.publish();
    }

    fn publish(&self) {
        // send_replace instead of send: publishing must not care whether
        // any observer is currently subscribed.
        let _ = self.tx.send_replace(self.snapshot.clone());
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "query_state_tests.rs"]
mod tests;
