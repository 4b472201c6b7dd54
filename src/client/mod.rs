//! Remote catalog client.
//!
//! The trait seam between the synchronization store and the paginated
//! search endpoint. Implementations are pure I/O with no internal state:
//! retry policy, caching and failure recovery all belong to the caller.

pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::model::{CharacterPage, ClientError};

// Re-export for convenience
pub use http::HttpCatalogClient;
pub use mock::MockCatalogClient;

/// Number of records the endpoint returns per page.
///
/// Fixed by the remote API; the derived total-page count is
/// `ceil(total / PAGE_SIZE)`.
pub const PAGE_SIZE: u64 = 10;

/// One read-only operation against the paginated search endpoint.
///
/// `page` is 1-based. A page past the end of the result set is the remote
/// API's business: it may answer with an empty page or with a failure, and
/// callers must treat those distinctly (an empty page is a success).
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of characters matching `query`.
    ///
    /// An empty `query` lists the whole catalog. No retries are attempted.
    async fn search(&self, query: &str, page: u32) -> Result<CharacterPage, ClientError>;
}
