//! Print request and outcome types exchanged with the print collaborator.

use super::{Order, PrintableItem};
use serde::{Deserialize, Serialize};

/// Unit of work sent to the external print collaborator: one order, one
/// printable row, plus the operator context at the moment of dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintRequest {
    pub order: Order,
    pub item: PrintableItem,
    /// Operator name (caller guarantees it is at least 2 characters).
    pub username: String,
    /// Starting serial number as displayed, zero padding included.
    pub serial_number: String,
    /// Non-initial print pass; forwarded verbatim to the collaborator.
    pub reprint: bool,
}

/// Resolution of one print request. Failure reasons are opaque collaborator
/// strings; the engine forwards them without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintOutcome {
    Success,
    Failure(String),
}

impl PrintOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PrintOutcome::Success)
    }
}

/// One audit line for the serial number tracker file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerRecord {
    pub part_number: String,
    pub assn_number: String,
    pub serial_number: String,
    pub username: String,
}

impl TrackerRecord {
    /// Build a record from a dispatched request.
    pub fn from_request(request: &PrintRequest) -> Self {
        Self {
            part_number: request.order.part_number.clone(),
            assn_number: request.order.assn_number.clone(),
            serial_number: request.serial_number.clone(),
            username: request.username.clone(),
        }
    }
}
