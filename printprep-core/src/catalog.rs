//! Row list construction for a print session.
//!
//! The item collaborator returns only the order-specific rows (labels and
//! doc packs). Every order additionally gets the three standard sheets
//! prepended, and rows whose note is blank or tombstoned with `~` are
//! dropped before ids are assigned.

use crate::model::PrintableItem;
use serde::{Deserialize, Serialize};

/// Raw row text as returned by the item collaborator, before the engine
/// assigns ids and derives tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedItem {
    pub category: String,
    pub note: String,
}

impl FetchedItem {
    pub fn new(category: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            note: note.into(),
        }
    }
}

/// Standard sheets present on every order.
const STANDARD_SHEETS: [(&str, &str); 3] = [
    ("BOM", "Bill of Materials"),
    ("Config", "Configuration Sheet"),
    ("SNL", "Serial Number List"),
];

/// Build the session row list: standard sheets first, then the fetched rows
/// that survive filtering, with sequential 1-based ids.
pub fn build_rows(fetched: Vec<FetchedItem>) -> Vec<PrintableItem> {
    let mut rows = Vec::with_capacity(STANDARD_SHEETS.len() + fetched.len());
    let mut next_id = 1u32;

    for (label, note) in STANDARD_SHEETS {
        rows.push(PrintableItem::new(next_id, label, note));
        next_id += 1;
    }

    for item in fetched {
        let note = item.note.trim();
        if note.is_empty() || note.starts_with('~') {
            continue;
        }
        rows.push(PrintableItem::new(next_id, &item.category, note));
        next_id += 1;
    }

    rows
}
