//! Plain-text presentation of a query snapshot.
//!
//! Strictly downstream of the store: a pure function of whatever snapshot
//! it is handed, with no access to anything mutable.

use std::fmt::Write as _;

use crate::model::portrait_url;
use crate::store::QuerySnapshot;

/// Render a settled snapshot as a text listing.
pub fn format_listing(snapshot: &QuerySnapshot) -> String {
    if snapshot.characters.is_empty() {
        return if snapshot.search.trim().is_empty() {
            "No response from the catalog.\n".to_string()
        } else {
            "No characters match your search.\n".to_string()
        };
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Page {} of {} ({} characters total)",
        snapshot.page,
        snapshot.total_pages().max(1),
        snapshot.total,
    );
    for character in &snapshot.characters {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", character.name);
        let mass = if character.mass == "unknown" {
            character.mass.clone()
        } else {
            format!("{} kg", character.mass)
        };
        let _ = writeln!(
            out,
            "  height {} cm, mass {}, born {}",
            character.height, mass, character.birth_year
        );
        let mut traits = vec![character.gender.clone()];
        if !character.eye_color.is_empty() {
            traits.push(format!("{} eyes", character.eye_color));
        }
        if !character.hair_color.is_empty() {
            traits.push(format!("{} hair", character.hair_color));
        }
        let _ = writeln!(out, "  {}", traits.join(" | "));
        if let Some(url) = portrait_url(character) {
            let _ = writeln!(out, "  portrait: {url}");
        }
    }
    out
}
