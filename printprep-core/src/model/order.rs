//! Manufacturing order loaded for a print session.

use serde::{Deserialize, Serialize};

/// A manufacturing order. Immutable once loaded for a session; a new order
/// number always triggers a fresh fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order number (at least 8 characters, validated at load).
    pub order_number: String,
    /// Part number being built.
    pub part_number: String,
    /// Assembly number (may equal the part number for simple parts).
    pub assn_number: String,
    /// Quantity due on the order.
    pub due_quantity: u32,
}

impl Order {
    /// Create an order with all text fields trimmed.
    pub fn new(
        order_number: &str,
        part_number: &str,
        assn_number: &str,
        due_quantity: u32,
    ) -> Self {
        Self {
            order_number: order_number.trim().to_string(),
            part_number: part_number.trim().to_string(),
            assn_number: assn_number.trim().to_string(),
            due_quantity,
        }
    }

    /// Whether the part is its own assembly (affects report parameters).
    pub fn is_self_assembly(&self) -> bool {
        self.part_number == self.assn_number
    }
}
