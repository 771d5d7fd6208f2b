//! External collaborator interfaces and the file-backed serial store.
//!
//! The engine never talks to the order database or a physical printer
//! directly; it consumes these traits. Every method is independently
//! resolvable and none blocks the caller beyond its own await.

use crate::catalog::FetchedItem;
use crate::config::DEFAULT_SERIAL_SEED;
use crate::error::{EngineError, Result};
use crate::model::{Order, PrintOutcome, PrintRequest, TrackerRecord};
use async_trait::async_trait;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Order and printable-item lookup.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch the order for a number; `EngineError::OrderNotFound` if unknown.
    async fn fetch_order(&self, order_number: &str) -> Result<Order>;

    /// Fetch the raw printable rows for an order, in catalog order. The
    /// engine assigns sequential 1-based ids on receipt.
    async fn fetch_printable_items(&self, order_number: &str) -> Result<Vec<FetchedItem>>;
}

/// Starting-serial-number lookup.
#[async_trait]
pub trait SerialSource: Send + Sync {
    /// Next starting serial number, zero padding included.
    async fn fetch_serial_number(&self) -> Result<String>;
}

/// Physical print execution. One call per row, independently resolvable;
/// failure reasons are opaque strings forwarded to the operator.
#[async_trait]
pub trait PrintClient: Send + Sync {
    async fn submit_print(&self, request: PrintRequest) -> PrintOutcome;
}

/// Serial number store backed by two plain text files: the current count
/// and an append-only audit tracker.
#[derive(Debug, Clone)]
pub struct FileSerialStore {
    count_path: PathBuf,
    tracker_path: PathBuf,
}

const TRACKER_HEADER: &str =
    "Date        Model Number                  Part Number                   Serial Number   Initials \n";

impl FileSerialStore {
    /// Store rooted at a documents directory, using the conventional file
    /// names `SerialNumberCount.txt` and `serialNumberTracker.txt`.
    pub fn new(doc_dir: &Path) -> Self {
        Self {
            count_path: doc_dir.join("SerialNumberCount.txt"),
            tracker_path: doc_dir.join("serialNumberTracker.txt"),
        }
    }

    fn read_count(&self) -> Result<String> {
        if !self.count_path.exists() {
            let mut file = File::create(&self.count_path)?;
            file.write_all(DEFAULT_SERIAL_SEED.as_bytes())?;
            return Ok(DEFAULT_SERIAL_SEED.to_string());
        }

        let mut file = File::open(&self.count_path)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content.trim().to_string())
    }

    /// Advance the stored count to `serial` if it is numerically higher,
    /// preserving the printed serial's zero-pad width. Lower or equal
    /// values are ignored so a reprint run never rewinds the count.
    pub fn advance(&self, serial: &str) -> Result<()> {
        let stored = self.read_count()?;
        let stored_n: u64 = stored
            .parse()
            .map_err(|_| EngineError::InvalidSerialFile {
                path: self.count_path.clone(),
                value: stored.clone(),
            })?;
        let serial_n: u64 = serial
            .parse()
            .map_err(|_| EngineError::InvalidSerialFile {
                path: self.count_path.clone(),
                value: serial.to_string(),
            })?;

        if serial_n > stored_n {
            let padded = format!("{:0width$}", serial_n, width = serial.len());
            let mut file = File::create(&self.count_path)?;
            file.write_all(padded.as_bytes())?;
        }
        Ok(())
    }

    /// Append one audit line, creating the tracker file with its header on
    /// first use. Columns are fixed-width to stay readable in a plain text
    /// viewer.
    pub fn append_tracker(&self, record: &TrackerRecord) -> Result<()> {
        if !self.tracker_path.exists() {
            let mut file = File::create(&self.tracker_path)?;
            file.write_all(TRACKER_HEADER.as_bytes())?;
        }

        let mut file = OpenOptions::new().append(true).open(&self.tracker_path)?;
        writeln!(
            file,
            "{: <12}{: <30}{: <30}{: <16}{}",
            Local::now().format("%Y-%m-%d"),
            record.part_number,
            record.assn_number,
            record.serial_number,
            record.username,
        )?;
        Ok(())
    }
}

#[async_trait]
impl SerialSource for FileSerialStore {
    async fn fetch_serial_number(&self) -> Result<String> {
        self.read_count()
    }
}
