//! printprep - prepare and dispatch manufacturing print jobs.
//!
//! Orders are read from a JSON fixture file (the production order database
//! sits behind the same trait); printing runs against a dry-run client that
//! logs each request instead of driving a physical printer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use printprep_core::{
    EngineError, FetchedItem, FileSerialStore, Order, OrderSource, PrintClient, PrintOutcome,
    PrintRequest, PrintSession, Settings, Shortcut, TrackerRecord,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Prepare and dispatch print jobs for a manufacturing order.
#[derive(Parser, Debug)]
#[command(name = "printprep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Order number (at least 8 characters)
    order: String,

    /// JSON fixture with the order and its printable items
    #[arg(short, long)]
    items: PathBuf,

    /// Directory holding the serial count and tracker files
    #[arg(short, long, default_value = "documents")]
    docs: PathBuf,

    /// Category shortcuts to toggle, in order
    #[arg(short, long, value_enum)]
    select: Vec<ShortcutArg>,

    /// Individual row ids to toggle
    #[arg(short, long)]
    row: Vec<u32>,

    /// Operator name (at least 2 characters; required unless --list)
    #[arg(short, long, default_value = "")]
    user: String,

    /// Mark this batch as a reprint run
    #[arg(long)]
    reprint: bool,

    /// List rows with their note validity, don't print
    #[arg(long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ShortcutArg {
    Starting,
    Labels,
    FinalDocs,
}

impl From<ShortcutArg> for Shortcut {
    fn from(arg: ShortcutArg) -> Self {
        match arg {
            ShortcutArg::Starting => Shortcut::Starting,
            ShortcutArg::Labels => Shortcut::Labels,
            ShortcutArg::FinalDocs => Shortcut::FinalDocs,
        }
    }
}

/// On-disk shape of the order fixture.
#[derive(Debug, Clone, Deserialize)]
struct OrderFixture {
    order: Order,
    items: Vec<FetchedItem>,
}

/// Order source backed by a single fixture file.
struct FixtureSource {
    fixture: OrderFixture,
}

#[async_trait]
impl OrderSource for FixtureSource {
    async fn fetch_order(&self, order_number: &str) -> printprep_core::Result<Order> {
        if self.fixture.order.order_number != order_number {
            return Err(EngineError::OrderNotFound {
                order_number: order_number.to_string(),
            });
        }
        Ok(self.fixture.order.clone())
    }

    async fn fetch_printable_items(
        &self,
        _order_number: &str,
    ) -> printprep_core::Result<Vec<FetchedItem>> {
        Ok(self.fixture.items.clone())
    }
}

/// Print client that logs each request instead of driving a printer, but
/// still keeps the serial books: every print appends a tracker line and
/// advances the stored count, exactly as the production client does.
struct DryRunClient {
    store: Arc<FileSerialStore>,
    printer: String,
}

#[async_trait]
impl PrintClient for DryRunClient {
    async fn submit_print(&self, request: PrintRequest) -> PrintOutcome {
        info!(
            order = %request.order.order_number,
            row = request.item.id,
            label = %request.item.label,
            serial = %request.serial_number,
            reprint = request.reprint,
            printer = %self.printer,
            "dry-run print"
        );
        let record = TrackerRecord::from_request(&request);
        if let Err(err) = self.store.append_tracker(&record) {
            return PrintOutcome::Failure(err.to_string());
        }
        if let Err(err) = self.store.advance(&request.serial_number) {
            return PrintOutcome::Failure(err.to_string());
        }
        PrintOutcome::Success
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let content = std::fs::read_to_string(&args.items)
        .with_context(|| format!("Failed to read {}", args.items.display()))?;
    let fixture: OrderFixture = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.items.display()))?;

    std::fs::create_dir_all(&args.docs)
        .with_context(|| format!("Failed to create {}", args.docs.display()))?;
    let settings = Settings::load(&args.docs.join("appSettings.json"))
        .context("Failed to load settings")?;
    let serials = Arc::new(FileSerialStore::new(&args.docs));

    let mut session = PrintSession::new(
        Arc::new(FixtureSource { fixture }),
        Arc::clone(&serials) as Arc<dyn printprep_core::SerialSource>,
        Arc::new(DryRunClient {
            store: serials,
            printer: settings.default_printer,
        }),
    );

    session
        .load_order(&args.order)
        .await
        .with_context(|| format!("Failed to load order {}", args.order))?;

    let order = session.order().expect("order just loaded");
    info!(
        "Order {} part {} assn {} due {}",
        order.order_number, order.part_number, order.assn_number, order.due_quantity
    );

    if args.list {
        for row in session.rows() {
            let flag = if row.note_valid { " " } else { "!" };
            println!("{} {:>3}  {:<20} {}", flag, row.id, row.label, row.note);
        }
        return Ok(());
    }

    for shortcut in &args.select {
        session.toggle_shortcut((*shortcut).into());
    }
    for id in &args.row {
        session.toggle_row(*id);
    }

    if session.selection().is_empty() {
        anyhow::bail!("Nothing selected; use --select or --row");
    }
    info!(
        "Selected rows: {:?}",
        session.selection().iter().collect::<Vec<_>>()
    );

    let report = session.print(&args.user, args.reprint).await?;

    // Surface the rolling notifications in queue order
    let notifications = session.notifications();
    let mut queue = notifications.lock().expect("notification queue lock poisoned");
    while let Some(message) = queue.poll() {
        match message.severity {
            printprep_core::Severity::Warning => warn!("{}", message.text),
            _ => info!("{}", message.text),
        }
        queue.dismiss();
        queue.exited();
    }
    drop(queue);

    info!(
        "Printed {}/{} rows ({} failed)",
        report.succeeded, report.attempted, report.failed
    );
    if let Some(serial) = &report.refreshed_serial {
        info!("Next starting serial number: {}", serial);
    }
    if report.failed > 0 {
        anyhow::bail!("{} row(s) failed to print", report.failed);
    }

    Ok(())
}
