//! Data model for orders, printable rows and print requests.

pub mod item;
pub mod order;
pub mod request;

pub use item::{Category, PrintableItem};
pub use order::Order;
pub use request::{PrintOutcome, PrintRequest, TrackerRecord};
