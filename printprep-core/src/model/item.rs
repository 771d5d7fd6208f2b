//! Printable row and its category tag.

use serde::{Deserialize, Serialize};

/// Closed set of category tags, computed once per row at load time.
///
/// The raw category label stays free text for display and for the print
/// collaborator; this tag is what the validator and the shortcut predicates
/// operate on, so case-insensitive substring checks happen in exactly one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Bill of materials sheet.
    Bom,
    /// Configuration sheet.
    Config,
    /// Serial number list.
    Snl,
    /// Crystal label report (94A... part numbers; `kit` for K94A...).
    Label { kit: bool },
    /// Initial documentation pack.
    InitialDocs,
    /// Final documentation pack.
    FinalDocs,
    /// Anything else; always flagged by the validator.
    Other,
}

impl Category {
    /// Classify a raw category label. Comparisons are case-insensitive;
    /// labels are prefix-matched for the 94A/K94A families and
    /// exact-matched otherwise.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        match lower.as_str() {
            "bom" => Category::Bom,
            "config" => Category::Config,
            "snl" => Category::Snl,
            "initial docs" => Category::InitialDocs,
            "final docs" => Category::FinalDocs,
            _ if lower.starts_with("k94a") => Category::Label { kit: true },
            _ if lower.starts_with("94a") => Category::Label { kit: false },
            _ => Category::Other,
        }
    }

    /// Whether this is a label row of either family.
    pub fn is_label(&self) -> bool {
        matches!(self, Category::Label { .. })
    }
}

/// One printable artifact belonging to the loaded order.
///
/// Created in bulk when an order's items are fetched, never mutated,
/// discarded when a new order is loaded. `note_valid` is a pure derived
/// field: it flags the row for the operator but never blocks selection or
/// printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintableItem {
    /// Stable 1-based sequential id, assigned at load time.
    pub id: u32,
    /// Raw category label as fetched (trimmed).
    pub label: String,
    /// Category tag derived from the label.
    pub category: Category,
    /// Descriptive note; its required shape depends on the category.
    pub note: String,
    /// Whether the note matches the category's required format.
    pub note_valid: bool,
}

impl PrintableItem {
    /// Build a row from raw fetched text, deriving the tag and validity.
    pub fn new(id: u32, label: &str, note: &str) -> Self {
        let label = label.trim().to_string();
        let note = note.trim().to_string();
        let category = Category::from_label(&label);
        let note_valid = crate::validation::validate(category, &note);
        Self {
            id,
            label,
            category,
            note,
            note_valid,
        }
    }
}
