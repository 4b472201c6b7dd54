//! Scripted catalog client for tests.
//!
//! Responses are keyed by (query, page) and replayed on every matching
//! request, with an optional per-script latency so tests can force
//! completions to arrive out of issue order under paused time. Requests
//! are recorded verbatim for assertions on what the store actually asked
//! for. Unscripted pairs resolve to an empty page.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;

use super::CatalogClient;
use crate::model::{Character, CharacterPage, ClientError};

#[derive(Debug, Clone)]
struct Script {
    outcome: Result<CharacterPage, ClientError>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct Inner {
    scripts: Mutex<HashMap<(String, u32), Script>>,
    requests: Mutex<Vec<(String, u32)>>,
}

/// In-memory [`CatalogClient`] with scripted responses.
#[derive(Debug, Clone, Default)]
pub struct MockCatalogClient {
    inner: Arc<Inner>,
}

impl MockCatalogClient {
    /// A mock with no scripts; every request resolves to an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for one (query, page) pair, resolving
    /// immediately.
    pub fn respond(&self, query: &str, page: u32, outcome: Result<CharacterPage, ClientError>) {
        self.respond_after(query, page, Duration::ZERO, outcome);
    }

    /// Script the response for one (query, page) pair, resolving after
    /// `delay` of (virtual) time.
    pub fn respond_after(
        &self,
        query: &str,
        page: u32,
        delay: Duration,
        outcome: Result<CharacterPage, ClientError>,
    ) {
        self.inner
            .scripts
            .lock()
            .expect("mock scripts poisoned")
            .insert((query.to_string(), page), Script { outcome, delay });
    }

    /// Every (query, page) pair requested so far, in issue order.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.inner
            .requests
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn search(&self, query: &str, page: u32) -> Result<CharacterPage, ClientError> {
        self.inner
            .requests
            .lock()
            .expect("mock request log poisoned")
            .push((query.to_string(), page));
        let script = self
            .inner
            .scripts
            .lock()
            .expect("mock scripts poisoned")
            .get(&(query.to_string(), page))
            .cloned();
        match script {
            Some(script) => {
                if !script.delay.is_zero() {
                    tokio::time::sleep(script.delay).await;
                }
                script.outcome
            }
            None => Ok(CharacterPage::default()),
        }
    }
}

// ===== Canned data =====

/// A fully-populated character record for tests.
///
/// `id` determines the canonical URL (and therefore the portrait id).
pub fn canned_character(name: &str, id: u32) -> Character {
    let stamp = DateTime::from_timestamp(1_418_133_051, 0).expect("valid timestamp");
    Character {
        name: name.to_string(),
        birth_year: "19BBY".to_string(),
        gender: "male".to_string(),
        eye_color: "blue".to_string(),
        hair_color: "blond".to_string(),
        height: "172".to_string(),
        mass: "77".to_string(),
        skin_color: "fair".to_string(),
        homeworld: "https://swapi.py4e.com/api/planets/1/".to_string(),
        films: Vec::new(),
        species: Vec::new(),
        starships: Vec::new(),
        vehicles: Vec::new(),
        url: format!("https://swapi.py4e.com/api/people/{id}/"),
        created: stamp,
        edited: stamp,
    }
}

/// A page holding one canned character per (name, id) pair.
pub fn canned_page(total: u64, members: &[(&str, u32)]) -> CharacterPage {
    CharacterPage {
        total,
        characters: members
            .iter()
            .map(|(name, id)| canned_character(name, *id))
            .collect(),
    }
}
