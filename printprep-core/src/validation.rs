//! Per-category note format validation.
//!
//! Validation is advisory: a failing note flags the row for the operator but
//! never blocks selection or printing. Operators may knowingly print a
//! flagged item.

use crate::model::Category;
use once_cell::sync::Lazy;
use regex::Regex;

/// Label notes: report number `01A` + 6 digits, revision letter + 2 digits,
/// then up to four `?`-delimited report parameters.
static LABEL_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01A\d{6}-[A-Z]\d{2}(\?[^?]+){0,4}$").unwrap());

/// Docs notes: a Windows absolute search path followed by one or two
/// `?`-delimited segments (document name, optional printer).
static DOCS_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]:\\[^?]+(\?[^?]+){1,2}$").unwrap());

/// Validate a note against the format its category requires.
pub fn validate(category: Category, note: &str) -> bool {
    match category {
        // Standard sheets carry descriptive notes; any content is fine.
        Category::Bom | Category::Config | Category::Snl => true,
        Category::Label { .. } => LABEL_NOTE.is_match(note),
        Category::InitialDocs | Category::FinalDocs => DOCS_NOTE.is_match(note),
        Category::Other => false,
    }
}

/// Validate a raw category label and note pair.
pub fn validate_labeled(label: &str, note: &str) -> bool {
    validate(Category::from_label(label), note)
}
