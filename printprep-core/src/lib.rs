//! printprep-core - Print job selection, validation and dispatch for
//! manufacturing shop orders.
//!
//! Given an order number, this library builds the list of printable
//! artifacts (labels, BOM sheets, configuration sheets, serial number
//! lists, doc packs), applies category-shortcut selection, validates each
//! row's note against its category's required format, and dispatches the
//! selected rows as independent print requests with a single rolling
//! notification stream for the outcomes.
//!
//! Order lookup, serial number storage and physical printing are external
//! collaborators behind the traits in [`source`]; [`session::PrintSession`]
//! ties everything together for a UI layer.
//!
//! # Example
//!
//! ```
//! use printprep_core::model::{Category, PrintableItem};
//! use printprep_core::selection::{toggle_shortcut, SelectionSet, Shortcut};
//!
//! let rows = vec![
//!     PrintableItem::new(1, "BOM", "Bill of Materials"),
//!     PrintableItem::new(2, "94A-LBL", "01A123456-A01"),
//! ];
//! assert!(rows[1].note_valid);
//!
//! let selection = toggle_shortcut(Shortcut::Starting, &SelectionSet::new(), &rows);
//! assert!(selection.contains(1) && selection.contains(2));
//! ```

pub mod catalog;
pub mod config;
pub mod counter;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod notify;
pub mod selection;
pub mod session;
pub mod source;
pub mod validation;

// Re-exports for convenience
pub use catalog::{build_rows, FetchedItem};
pub use config::Settings;
pub use counter::Counter;
pub use dispatch::{DispatchReport, PrintDispatcher};
pub use error::{EngineError, Result};
pub use model::{Category, Order, PrintOutcome, PrintRequest, PrintableItem, TrackerRecord};
pub use notify::{NotificationMessage, NotificationQueue, Severity};
pub use selection::{toggle_shortcut, SelectionSet, Shortcut};
pub use session::PrintSession;
pub use source::{FileSerialStore, OrderSource, PrintClient, SerialSource};
