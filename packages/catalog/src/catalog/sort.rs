//! Deterministic Catalog Ordering
//!
//! Total-order comparators for contexts and messages. Messages order by
//! their minimum (filename, line) location, with location-less messages at
//! the end; contexts order by case-insensitive name. Opt-in via
//! `Catalog::sort` — merge output order is contractual and never sorted
//! implicitly.

use std::cmp::Ordering;

use super::ast::{Catalog, Context, Location, Message};

pub fn compare_locations(a: &Location, b: &Location) -> Ordering {
    let a_name = a.filename.as_deref().unwrap_or("").to_lowercase();
    let b_name = b.filename.as_deref().unwrap_or("").to_lowercase();
    a_name.cmp(&b_name).then(a.line.cmp(&b.line))
}

pub fn compare_messages(a: &Message, b: &Message) -> Ordering {
    let min_a = a.locations.iter().min_by(|x, y| compare_locations(x, y));
    let min_b = b.locations.iter().min_by(|x, y| compare_locations(x, y));

    // Location-less messages sort last, not first.
    match (min_a, min_b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_loc), Some(b_loc)) => compare_locations(a_loc, b_loc),
    }
}

pub fn compare_contexts(a: &Context, b: &Context) -> Ordering {
    // Context names are module or class names; plain case-insensitive
    // comparison is enough, no collation needed.
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

impl Catalog {
    /// Sort contexts by name and each context's messages by location.
    /// Stable, so same-key entries keep their document order.
    pub fn sort(&mut self) {
        self.contexts.sort_by(compare_contexts);
        for context in &mut self.contexts {
            context.messages.sort_by(compare_messages);
        }
    }
}
