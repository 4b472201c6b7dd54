//! Synchronization controller.
//!
//! The one place where fetches are decided, issued and applied. All query
//! state mutation happens inside this single task; fetch completions come
//! back through a channel and are processed one at a time, so correctness
//! never depends on locking, only on the generation guard below.
//!
//! Every issued fetch is stamped with a monotonically increasing
//! generation. A completion is applied only when its generation is still
//! the most recently issued one; anything older was superseded by a newer
//! request and is discarded without comment. This is what keeps the
//! visible result set causally tied to the most recent (search, page)
//! pair even when responses arrive out of order.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::query_state::QueryState;
use crate::client::CatalogClient;
use crate::model::{Character, CharacterPage, ClientError};

// ===== Bootstrap =====

/// Externally-supplied initial state, e.g. a server-rendered first page.
///
/// Adopted verbatim into query state without a fetch; see
/// [`CatalogStore::hydrate`](super::CatalogStore::hydrate).
#[derive(Debug, Clone)]
pub struct Bootstrap {
    /// The pre-rendered result set.
    pub characters: Vec<Character>,
    /// Total match count reported alongside the pre-rendered page.
    pub total: u64,
    /// The 1-based page the bootstrap corresponds to.
    pub page: u32,
    /// The search text the bootstrap corresponds to.
    pub search: String,
}

// ===== Commands =====

/// Controller commands besides debounced search text.
#[derive(Debug)]
pub(crate) enum Command {
    /// Explicit pagination; the facade has already clamped the value.
    SetPage(u32),
    /// Adopt server-provided initial state.
    Hydrate(Bootstrap),
}

/// A fetch completion, stamped with the identity of its request.
struct Settlement {
    generation: u64,
    pair: (String, u32),
    result: Result<CharacterPage, ClientError>,
}

// ===== Controller =====

struct Controller {
    state: QueryState,
    client: Arc<dyn CatalogClient>,
    /// Generation of the most recently issued fetch; 0 before any fetch.
    generation: u64,
    settle_tx: mpsc::UnboundedSender<Settlement>,
}

/// Drive the controller until the store facade is dropped.
///
/// Exits when either input channel closes; in-flight fetches then settle
/// into a dead channel and are dropped.
pub(crate) async fn run(
    state: QueryState,
    client: Arc<dyn CatalogClient>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut debounced_search: mpsc::UnboundedReceiver<String>,
) {
    let (settle_tx, mut settle_rx) = mpsc::unbounded_channel();
    let mut controller = Controller {
        state,
        client,
        generation: 0,
        settle_tx,
    };

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => controller.handle_command(command),
                None => break,
            },
            text = debounced_search.recv() => match text {
                Some(text) => controller.handle_search(text),
                None => break,
            },
            settlement = settle_rx.recv() => match settlement {
                Some(settlement) => controller.handle_settlement(settlement),
                // Unreachable while `controller` holds a sender, but a
                // quiet exit beats a panic if that ever changes.
                None => break,
            },
        }
    }
}

impl Controller {
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetPage(page) => self.handle_set_page(page),
            Command::Hydrate(bootstrap) => self.handle_hydrate(bootstrap),
        }
    }

    /// React to a settled (debounced) search text.
    fn handle_search(&mut self, text: String) {
        if text == self.state.search() {
            if self.state.origin().is_some() {
                // Hydration echo or a re-submit of the current search:
                // the visible results already answer it.
                trace!(search = %text, "debounced search unchanged, skipping");
                return;
            }
            // Same text as the initial state but nothing has ever been
            // fetched: this is the first load.
        } else {
            self.state.set_search(text);
            // A new search invalidates the previous page's relevance.
            self.state.set_page(1);
        }
        self.issue_fetch();
    }

    /// React to explicit pagination.
    fn handle_set_page(&mut self, page: u32) {
        let page = page.max(1);
        let already_settled = self
            .state
            .origin()
            .is_some_and(|(s, p)| s == self.state.search() && *p == page);
        if page == self.state.page() && already_settled {
            trace!(page, "page unchanged with settled results, skipping");
            return;
        }
        self.state.set_page(page);
        self.issue_fetch();
    }

    /// Adopt server-provided initial state without fetching.
    ///
    /// Only meaningful before the first fetch; afterwards the bootstrap
    /// describes a world the store has already moved past.
    fn handle_hydrate(&mut self, bootstrap: Bootstrap) {
        if self.generation > 0 {
            trace!("bootstrap ignored, a fetch was already issued");
            return;
        }
        debug!(
            search = %bootstrap.search,
            page = bootstrap.page,
            total = bootstrap.total,
            "adopting server-provided state"
        );
        self.state.set_search(bootstrap.search.clone());
        self.state.set_page(bootstrap.page);
        self.state.set_results(
            bootstrap.characters,
            bootstrap.total,
            (bootstrap.search, bootstrap.page),
        );
    }

    /// Issue a fetch for the current (search, page) pair.
    fn issue_fetch(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let pair = (self.state.search().to_string(), self.state.page());
        self.state.set_loading(true);
        debug!(search = %pair.0, page = pair.1, generation, "issuing catalog fetch");

        let client = Arc::clone(&self.client);
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let result = client.search(&pair.0, pair.1).await;
            // The controller may already be gone; a dead letter is fine.
            let _ = settle_tx.send(Settlement {
                generation,
                pair,
                result,
            });
        });
    }

    /// Apply or discard a fetch completion.
    fn handle_settlement(&mut self, settlement: Settlement) {
        if settlement.generation != self.generation {
            // Superseded, not failed: a newer fetch owns the state now,
            // including the loading flag.
            trace!(
                generation = settlement.generation,
                current = self.generation,
                "stale fetch discarded"
            );
            return;
        }
        match settlement.result {
            Ok(page) => {
                debug!(
                    search = %settlement.pair.0,
                    page = settlement.pair.1,
                    count = page.characters.len(),
                    total = page.total,
                    "applying catalog response"
                );
                self.state
                    .set_results(page.characters, page.total, settlement.pair);
            }
            Err(error) => {
                // Best-effort gallery: a failed fetch presents as "no
                // results", never as a blocking error.
                warn!(
                    error = %error,
                    search = %settlement.pair.0,
                    page = settlement.pair.1,
                    "catalog fetch failed"
                );
                self.state.set_results(Vec::new(), 0, settlement.pair);
            }
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
