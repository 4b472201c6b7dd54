//! Character records and pure lookups.
//!
//! `Character` mirrors the catalog endpoint's record shape verbatim; the
//! store treats it as an opaque value. Only `name` (display key) and the
//! numeric id buried in `url` (portrait lookup) carry meaning here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for the static portrait assets, keyed by character id.
const PORTRAIT_BASE_URL: &str =
    "https://vieraboschkova.github.io/swapi-gallery/static/assets/img/people";

// ===== Character =====

/// A single character record as returned by the catalog endpoint.
///
/// All physical attributes are strings on the wire (the API reports
/// unparseable values such as `"unknown"` or `"n/a"`), so they are kept
/// as strings rather than lossily converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Display name; the only field the core treats as a key.
    pub name: String,
    /// In-universe birth year, e.g. `"19BBY"`.
    pub birth_year: String,
    /// Reported gender, e.g. `"male"`, `"n/a"`.
    pub gender: String,
    /// Eye color.
    pub eye_color: String,
    /// Hair color.
    pub hair_color: String,
    /// Height in centimeters, as a string.
    pub height: String,
    /// Mass in kilograms, as a string.
    pub mass: String,
    /// Skin color.
    pub skin_color: String,
    /// URL reference to the character's homeworld resource.
    pub homeworld: String,
    /// URL references to film resources featuring this character.
    pub films: Vec<String>,
    /// URL references to species resources.
    pub species: Vec<String>,
    /// URL references to starship resources.
    pub starships: Vec<String>,
    /// URL references to vehicle resources.
    pub vehicles: Vec<String>,
    /// Canonical URL of this record; the trailing path segment is the id.
    pub url: String,
    /// Record creation timestamp.
    pub created: DateTime<Utc>,
    /// Record last-edit timestamp.
    pub edited: DateTime<Utc>,
}

// ===== CharacterPage =====

/// One page of a catalog search: the items for the requested page plus the
/// total count across all pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterPage {
    /// Total number of matches across every page, not just this one.
    pub total: u64,
    /// The records for the requested page, at most one page's worth.
    pub characters: Vec<Character>,
}

// ===== Pure lookups =====

/// Extract the numeric id from a record's canonical URL.
///
/// The id is the last non-empty path segment, e.g.
/// `https://swapi.py4e.com/api/people/42/` yields `Some(42)`.
/// Returns `None` when the trailing segment is missing or non-numeric.
pub fn character_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Map a character to its static portrait asset URL.
///
/// Returns `None` when no id can be extracted from the record's URL;
/// the fallback image is the rendering layer's concern.
pub fn portrait_url(character: &Character) -> Option<String> {
    character_id(&character.url).map(|id| format!("{PORTRAIT_BASE_URL}/{id}.jpg"))
}

// ===== Tests =====

#[cfg(test)]
#[path = "character_tests.rs"]
mod tests;
