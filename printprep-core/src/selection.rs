//! Row selection: the selection set, shortcut predicates and the
//! toggle-all engine.
//!
//! `SelectionSet` is an immutable value: every operation returns a new set,
//! so a reader holding a clone never observes a half-updated selection.

use crate::config::STARTING_ID_CUTOFF;
use crate::model::{Category, PrintableItem};
use std::collections::BTreeSet;

/// The set of row ids currently chosen for printing.
///
/// Invariant (maintained by `PrintSession`): always a subset of the ids in
/// the current row list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<u32>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    /// Return a new set with the id added.
    pub fn with_row(&self, id: u32) -> Self {
        let mut ids = self.ids.clone();
        ids.insert(id);
        Self { ids }
    }

    /// Return a new set with the id removed.
    pub fn without_row(&self, id: u32) -> Self {
        let mut ids = self.ids.clone();
        ids.remove(&id);
        Self { ids }
    }

    /// Flip a single row (direct checkbox click; bypasses the toggle engine).
    pub fn toggled_row(&self, id: u32) -> Self {
        if self.contains(id) {
            self.without_row(id)
        } else {
            self.with_row(id)
        }
    }

    /// Drop any ids not present in the given row list.
    pub fn retained(&self, rows: &[PrintableItem]) -> Self {
        let valid: BTreeSet<u32> = rows.iter().map(|r| r.id).collect();
        Self {
            ids: self.ids.intersection(&valid).copied().collect(),
        }
    }
}

impl FromIterator<u32> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Category shortcuts: bulk-select actions over all rows matching a
/// predicate. The sets may overlap; an early row belongs to Starting even
/// when its category is unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Starting,
    Labels,
    FinalDocs,
}

impl Shortcut {
    /// Whether a row belongs to this shortcut.
    pub fn matches(&self, item: &PrintableItem) -> bool {
        match self {
            Shortcut::Starting => {
                item.id <= STARTING_ID_CUTOFF || item.category == Category::InitialDocs
            }
            Shortcut::Labels => item.category.is_label(),
            Shortcut::FinalDocs => item.category == Category::FinalDocs,
        }
    }

    /// The "fully selected" threshold for the toggle decision.
    ///
    /// For Starting this is `count(InitialDocs rows) + 3`: the first three
    /// rows belong to the shortcut whether or not they carry the initial
    /// docs label. For the other shortcuts it is simply the matching count.
    fn threshold(&self, rows: &[PrintableItem]) -> usize {
        match self {
            Shortcut::Starting => {
                rows.iter()
                    .filter(|r| r.category == Category::InitialDocs)
                    .count()
                    + STARTING_ID_CUTOFF as usize
            }
            Shortcut::Labels | Shortcut::FinalDocs => {
                rows.iter().filter(|r| self.matches(r)).count()
            }
        }
    }
}

/// Apply the toggle-all rule for a shortcut: if fewer matching rows are
/// selected than the shortcut's threshold, select every matching row;
/// otherwise deselect every matching row. Rows outside the shortcut are
/// untouched. Strict two-state flip: repeated invocations alternate between
/// all-matching-selected and none-matching-selected.
pub fn toggle_shortcut(
    shortcut: Shortcut,
    selection: &SelectionSet,
    rows: &[PrintableItem],
) -> SelectionSet {
    let matching: Vec<u32> = rows
        .iter()
        .filter(|r| shortcut.matches(r))
        .map(|r| r.id)
        .collect();
    let matching_selected = matching.iter().filter(|id| selection.contains(**id)).count();

    let mut next = selection.clone();
    if matching_selected < shortcut.threshold(rows) {
        for id in matching {
            next = next.with_row(id);
        }
    } else {
        for id in matching {
            next = next.without_row(id);
        }
    }
    next
}
