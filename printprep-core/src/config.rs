//! Configuration constants and persisted settings for the engine.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Minimum order number length accepted at load time.
pub const MIN_ORDER_NUMBER_LEN: usize = 8;

/// Minimum username length required before dispatch is permitted.
pub const MIN_USERNAME_LEN: usize = 2;

/// Highest row id that always belongs to the Starting shortcut.
pub const STARTING_ID_CUTOFF: u32 = 3;

/// Seed written to a serial count file that does not exist yet.
pub const DEFAULT_SERIAL_SEED: &str = "001010129";

/// Field error shown when counter text is not digits-only.
pub const REQUIRES_NUMBER: &str = "Requires a number";

/// Persisted application settings: report paths and printer names consumed
/// by print collaborators. Selection and validation state is never
/// persisted; only this printer/path configuration is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub bom_report_path: String,
    pub snl_report_path: String,
    pub config_sheet_path: String,
    pub label_report_path: String,
    pub pdf_to_printer_path: String,
    pub default_printer: String,
    pub label_printer_125x025: String,
    pub label_printer_2x025: String,
    pub label_printer_075x025: String,
    pub label_printer_2x3: String,
    pub label_printer_4x6: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bom_report_path: r"\\pxsvsapp01\eciShared\Shop Order Processing\BOMRPTv2.rpt".into(),
            snl_report_path: r"\\pxsvsapp01\eciShared\Shop Order Processing\SerialNumberList_v4.rpt".into(),
            config_sheet_path: r"X:\Projects\Configuration Sheets".into(),
            label_report_path: r"\\pxsvsfs01\Production\Manufacturing Instructions\Crystal Label Reports".into(),
            pdf_to_printer_path: r"C:\Program Files (x86)\PdftoPrinter\PDFtoPrinter.exe".into(),
            default_printer: "PXS-PRN-SHOP-BRTHR".into(),
            label_printer_125x025: r"\\PXSVSFS01\125x25Zebra".into(),
            label_printer_2x025: r"\\PXSVSFS01\2x25ZEBRA".into(),
            label_printer_075x025: r"\\PXSVSFS01\075x025_Zebra".into(),
            label_printer_2x3: r"\\PXSVSFS01\2x3ZEBRA".into(),
            label_printer_4x6: r"\\PXSVSFS01\ZDesigner ZD621-203dpi ZPL".into(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, creating it with defaults if missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let settings = Settings::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
