//! Bidirectional display counters for print quantity and starting serial
//! number.
//!
//! The counter works on the display string, not a stored integer: direct
//! text entry replaces the value verbatim, and increment/decrement parse
//! whatever is currently shown. A non-numeric value sets an advisory field
//! error; it renders an error indicator but never blocks submission.

use crate::config::REQUIRES_NUMBER;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// A non-negative integer counter rendered as a string.
///
/// The serial-number instance is zero-padded: results are left-padded to the
/// string's length at the time of the operation, so `"007"` decrements to
/// `"006"`. The field widens when the digit count outgrows it (`"099"` →
/// `"100"`, `"999"` → `"1000"`) and never narrows. Decrementing `"000"`
/// clamps at `"000"`: negative serials do not exist in this domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    text: String,
    zero_padded: bool,
    error: Option<&'static str>,
}

impl Counter {
    /// Plain counter (print quantity).
    pub fn new(initial: impl Into<String>) -> Self {
        let mut counter = Self {
            text: String::new(),
            zero_padded: false,
            error: None,
        };
        counter.set_text(initial);
        counter
    }

    /// Zero-padded counter (starting serial number).
    pub fn zero_padded(initial: impl Into<String>) -> Self {
        let mut counter = Self {
            text: String::new(),
            zero_padded: true,
            error: None,
        };
        counter.set_text(initial);
        counter
    }

    /// Current display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Advisory field error, if the current text is not digits-only.
    pub fn error(&self) -> Option<&str> {
        self.error
    }

    /// Parsed numeric value, if the text is a valid number.
    pub fn value(&self) -> Option<u64> {
        self.text.parse().ok()
    }

    /// Replace the value verbatim (direct text entry) and refresh the
    /// validity flag.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = if DIGITS_ONLY.is_match(&self.text) {
            None
        } else {
            Some(REQUIRES_NUMBER)
        };
    }

    /// Replace the value with a freshly fetched one; the pad width becomes
    /// the new value's own length.
    pub fn reset(&mut self, text: impl Into<String>) {
        self.set_text(text);
    }

    pub fn increment(&mut self) {
        self.step(|n| n + 1);
    }

    /// Decrement, clamping at zero.
    pub fn decrement(&mut self) {
        self.step(|n| n.saturating_sub(1));
    }

    fn step(&mut self, op: impl FnOnce(u64) -> u64) {
        let Some(current) = self.value() else {
            // Not a number; leave the text alone, keep the error visible.
            self.error = Some(REQUIRES_NUMBER);
            return;
        };
        let next = op(current);
        let rendered = if self.zero_padded {
            format!("{:0width$}", next, width = self.text.len())
        } else {
            next.to_string()
        };
        self.set_text(rendered);
    }
}
