//! Error types for the print job engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the engine.
///
/// Per-row print failures and input-format findings are deliberately *not*
/// represented here: failed rows surface as warning notifications and bad
/// counter text surfaces as an advisory field error. Nothing in this enum is
/// treated as process-fatal; every variant is recoverable by operator action.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Order number '{order_number}' is too short: expected at least {minimum} characters")]
    OrderNumberTooShort {
        order_number: String,
        minimum: usize,
    },

    #[error("Order not found: {order_number}")]
    OrderNotFound { order_number: String },

    #[error("Failed to fetch order {order_number}: {message}")]
    OrderLookup {
        order_number: String,
        message: String,
    },

    #[error("Failed to fetch printable items for {order_number}: {message}")]
    ItemLookup {
        order_number: String,
        message: String,
    },

    #[error("Failed to fetch serial number: {message}")]
    SerialLookup { message: String },

    #[error("Username '{username}' is too short: at least 2 characters required")]
    UsernameTooShort { username: String },

    #[error("No order loaded")]
    NoOrderLoaded,

    #[error("Invalid serial number '{value}' in {path}")]
    InvalidSerialFile { path: PathBuf, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
