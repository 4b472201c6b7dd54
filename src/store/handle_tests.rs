//! Tests for the store facade: debounce wiring, call-site clamping, and
//! the observer surface.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::advance;

use super::*;
use crate::client::mock::{canned_page, MockCatalogClient};
use crate::store::controller::Bootstrap;

// ===== Test Helpers =====

fn spawn_store() -> (CatalogStore, MockCatalogClient) {
    let client = MockCatalogClient::new();
    let store = CatalogStore::new(Arc::new(client.clone()), StoreConfig::default());
    (store, client)
}

async fn settled(store: &CatalogStore, search: &str, page: u32) -> QuerySnapshot {
    let mut rx = store.subscribe();
    let snapshot = rx
        .wait_for(|s| s.settled_for(search, page))
        .await
        .expect("store alive")
        .clone();
    snapshot
}

// ===== clamp_page Tests =====

#[test]
fn clamp_page_raises_zero_to_one() {
    assert_eq!(clamp_page(0, 9), 1);
}

#[test]
fn clamp_page_caps_at_the_known_total() {
    assert_eq!(clamp_page(99, 9), 9);
}

#[test]
fn clamp_page_passes_in_range_values_through() {
    assert_eq!(clamp_page(4, 9), 4);
}

#[test]
fn clamp_page_leaves_page_unbounded_when_total_unknown() {
    assert_eq!(clamp_page(7, 0), 7);
}

// ===== Debounce Wiring Tests =====

#[tokio::test(start_paused = true)]
async fn rapid_typing_issues_one_fetch_for_the_final_text() {
    let (store, client) = spawn_store();
    client.respond("abc", 1, Ok(canned_page(1, &[("Luke Skywalker", 1)])));

    store.set_search("a");
    advance(Duration::from_millis(50)).await;
    store.set_search("ab");
    advance(Duration::from_millis(50)).await;
    store.set_search("abc");

    let snapshot = settled(&store, "abc", 1).await;

    assert_eq!(snapshot.search, "abc");
    assert_eq!(
        client.requests(),
        vec![("abc".to_string(), 1)],
        "intermediate keystrokes must never reach the client"
    );
}

// ===== Clamping Through the Facade =====

#[tokio::test(start_paused = true)]
async fn set_page_is_clamped_against_the_known_page_count() {
    let (store, client) = spawn_store();
    // 25 matches: three pages.
    client.respond("", 1, Ok(canned_page(25, &[("Luke Skywalker", 1)])));
    client.respond("", 3, Ok(canned_page(25, &[("Leia Organa", 5)])));

    store.set_search("");
    settled(&store, "", 1).await;

    let landed = store.set_page(99);
    let snapshot = settled(&store, "", 3).await;

    assert_eq!(landed, 3, "set_page reports the page actually targeted");
    assert_eq!(snapshot.page, 3, "page must be capped at the last page");
    assert_eq!(snapshot.characters[0].name, "Leia Organa");
}

#[tokio::test(start_paused = true)]
async fn set_page_zero_navigates_to_page_one() {
    let (store, client) = spawn_store();
    client.respond("", 1, Ok(canned_page(25, &[("Luke Skywalker", 1)])));
    client.respond("", 3, Ok(canned_page(25, &[("Leia Organa", 5)])));

    store.set_search("");
    settled(&store, "", 1).await;
    store.set_page(3);
    settled(&store, "", 3).await;

    store.set_page(0);
    let snapshot = settled(&store, "", 1).await;

    assert_eq!(snapshot.page, 1);
}

// ===== Observer Surface Tests =====

#[tokio::test(start_paused = true)]
async fn snapshot_reflects_the_latest_published_state() {
    let (store, client) = spawn_store();
    client.respond("", 1, Ok(canned_page(82, &[("Luke Skywalker", 1)])));

    assert_eq!(store.snapshot().page, 1);
    assert!(store.snapshot().origin.is_none());

    store.set_search("");
    settled(&store, "", 1).await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.total, 82);
    assert_eq!(snapshot.total_pages(), 9);
}

#[tokio::test(start_paused = true)]
async fn hydrate_seeds_without_any_client_traffic() {
    let (store, client) = spawn_store();
    let page = canned_page(82, &[("Luke Skywalker", 1)]);

    store.hydrate(Bootstrap {
        characters: page.characters,
        total: page.total,
        page: 1,
        search: String::new(),
    });

    let snapshot = settled(&store, "", 1).await;
    assert_eq!(snapshot.total, 82);
    assert!(client.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_store_tears_down_quietly() {
    let (store, client) = spawn_store();
    client.respond_after(
        "",
        1,
        Duration::from_millis(200),
        Ok(canned_page(82, &[("Luke Skywalker", 1)])),
    );

    let mut rx = store.subscribe();
    store.set_search("");
    rx.wait_for(|s| s.loading).await.expect("store alive");

    // Drop with a fetch still in flight; its settlement has nowhere to
    // go and must be dropped silently.
    drop(store);
    advance(Duration::from_millis(300)).await;

    assert!(
        rx.has_changed().is_err() || !rx.borrow().settled_for("", 1),
        "no settlement may be applied after teardown"
    );
}
