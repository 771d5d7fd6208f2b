//! End-to-end session tests with stub collaborators.
//!
//! These exercise the full path an operator takes: load an order, select
//! rows via category shortcuts, dispatch, and observe the notification and
//! serial number effects. The stubs stand in for the order database, the
//! serial store and the print executor.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use printprep_core::{
    EngineError, FetchedItem, Order, OrderSource, PrintClient, PrintOutcome, PrintRequest,
    PrintSession, PrintableItem, Result, SelectionSet, SerialSource, Severity, Shortcut,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ==================== Stub Collaborators ====================

struct StubSource {
    items: Vec<FetchedItem>,
    known_orders: HashSet<String>,
}

impl StubSource {
    fn new(items: Vec<FetchedItem>) -> Self {
        Self {
            items,
            known_orders: HashSet::from(["71234567".to_string()]),
        }
    }
}

#[async_trait]
impl OrderSource for StubSource {
    async fn fetch_order(&self, order_number: &str) -> Result<Order> {
        if !self.known_orders.contains(order_number) {
            return Err(EngineError::OrderNotFound {
                order_number: order_number.to_string(),
            });
        }
        Ok(Order::new(order_number, "02A000123", "02A000123", 4))
    }

    async fn fetch_printable_items(&self, _order_number: &str) -> Result<Vec<FetchedItem>> {
        Ok(self.items.clone())
    }
}

/// Serial source handing out consecutive values, so a refetch after a
/// successful batch is observable.
struct CountingSerials {
    fetches: AtomicUsize,
}

impl CountingSerials {
    fn new() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SerialSource for CountingSerials {
    async fn fetch_serial_number(&self) -> Result<String> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{:09}", 1010129 + n as u64))
    }
}

struct StubClient {
    fail_ids: HashSet<u32>,
    seen: Mutex<Vec<PrintRequest>>,
}

impl StubClient {
    fn new(fail_ids: impl IntoIterator<Item = u32>) -> Self {
        Self {
            fail_ids: fail_ids.into_iter().collect(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PrintClient for StubClient {
    async fn submit_print(&self, request: PrintRequest) -> PrintOutcome {
        self.seen.lock().unwrap().push(request.clone());
        if self.fail_ids.contains(&request.item.id) {
            PrintOutcome::Failure(format!("no printer for {}", request.item.label))
        } else {
            PrintOutcome::Success
        }
    }
}

fn session_with(
    items: Vec<FetchedItem>,
    fail_ids: impl IntoIterator<Item = u32>,
) -> (PrintSession, Arc<StubClient>, Arc<CountingSerials>) {
    let client = Arc::new(StubClient::new(fail_ids));
    let serials = Arc::new(CountingSerials::new());
    let session = PrintSession::new(
        Arc::new(StubSource::new(items)),
        Arc::clone(&serials) as Arc<dyn SerialSource>,
        Arc::clone(&client) as Arc<dyn PrintClient>,
    );
    (session, client, serials)
}

fn drain_notifications(session: &PrintSession) -> Vec<(String, Severity)> {
    let handle = session.notifications();
    let mut queue = handle.lock().unwrap();
    let mut out = Vec::new();
    while let Some(message) = queue.poll() {
        out.push((message.text.clone(), message.severity));
        queue.dismiss();
        queue.exited();
    }
    out
}

fn order_items() -> Vec<FetchedItem> {
    vec![
        FetchedItem::new("94A-LBL", "01A000111-B02"),
        FetchedItem::new("K94A000003-A01", "01A000038-A01"),
        FetchedItem::new("INITIAL DOCS", r"P:\Docs?initial.pdf"),
        FetchedItem::new("Final DOCS", r"P:\Docs?final.pdf"),
    ]
}

// ==================== Engine-Level Scenario ====================

/// The two-row scenario: a BOM row and one label row, both with ids in the
/// Starting range, selected via the Starting shortcut and dispatched.
#[tokio::test]
async fn test_two_row_starting_batch_succeeds() {
    let rows = vec![
        PrintableItem::new(1, "BOM", "x"),
        PrintableItem::new(2, "94A-LBL", "01A000111-B02"),
    ];

    let selection =
        printprep_core::toggle_shortcut(Shortcut::Starting, &SelectionSet::new(), &rows);
    assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2]);

    let client = Arc::new(StubClient::new([]));
    let serials = Arc::new(CountingSerials::new());
    let notifications = Arc::new(Mutex::new(printprep_core::NotificationQueue::new()));
    let dispatcher = printprep_core::PrintDispatcher::new(
        Arc::clone(&client) as Arc<dyn PrintClient>,
        Arc::clone(&serials) as Arc<dyn SerialSource>,
        Arc::clone(&notifications),
    );

    let order = Order::new("71234567", "02A000123", "02A000123", 4);
    let selected: Vec<PrintableItem> = selection
        .iter()
        .map(|id| rows[(id - 1) as usize].clone())
        .collect();
    let report = dispatcher
        .dispatch(&order, &selected, "jd", "001010129", false)
        .await;

    assert!(report.all_succeeded());
    assert!(report.refreshed_serial.is_some());
    assert_eq!(client.seen.lock().unwrap().len(), 2);

    let mut queue = notifications.lock().unwrap();
    let message = queue.poll().unwrap();
    assert_eq!(message.severity, Severity::Success);
}

// ==================== Session Scenarios ====================

#[tokio::test]
async fn test_full_session_all_success() {
    let (mut session, client, serials) = session_with(order_items(), []);

    session.load_order("71234567").await.unwrap();
    assert_eq!(session.rows().len(), 7);
    assert_eq!(session.serial().text(), "001010129");

    // Starting: standard sheets (ids 1-3) plus the initial docs row (id 6)
    session.toggle_shortcut(Shortcut::Starting);
    assert_eq!(session.selection().iter().collect::<Vec<_>>(), vec![1, 2, 3, 6]);

    let report = session.print("jd", false).await.unwrap();
    assert_eq!(report.attempted, 4);
    assert!(report.all_succeeded());

    // One aggregate success message, then the serial was refetched
    let messages = drain_notifications(&session);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, Severity::Success);
    assert_eq!(session.serial().text(), "001010130");
    assert_eq!(serials.fetches.load(Ordering::SeqCst), 2);

    let seen = client.seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert!(seen.iter().all(|r| r.serial_number == "001010129"));
    assert!(seen.iter().all(|r| r.username == "jd"));
}

#[tokio::test]
async fn test_full_session_partial_failure() {
    // Fail the K94A label row (id 5 after the three standard sheets)
    let (mut session, _client, serials) = session_with(order_items(), [5]);

    session.load_order("71234567").await.unwrap();
    session.toggle_shortcut(Shortcut::Labels);
    assert_eq!(session.selection().iter().collect::<Vec<_>>(), vec![4, 5]);

    let report = session.print("jd", false).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.all_succeeded());

    // Exactly one warning for the failed row, no aggregate success
    let messages = drain_notifications(&session);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, Severity::Warning);
    assert!(messages[0].0.contains("K94A000003-A01"));

    // Serial was not refetched and the counter kept its value
    assert_eq!(serials.fetches.load(Ordering::SeqCst), 1);
    assert_eq!(session.serial().text(), "001010129");
}

#[tokio::test]
async fn test_unknown_order_surfaces_not_found() {
    let (mut session, _client, _serials) = session_with(order_items(), []);
    let err = session.load_order("99999999").await.unwrap_err();
    assert!(matches!(err, EngineError::OrderNotFound { .. }));
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_reload_discards_previous_state() {
    let (mut session, _client, _serials) = session_with(order_items(), []);

    session.load_order("71234567").await.unwrap();
    session.toggle_shortcut(Shortcut::Labels);
    session.quantity_mut().set_text("99");
    assert!(!session.selection().is_empty());

    session.load_order("71234567").await.unwrap();
    assert!(session.selection().is_empty());
    assert_eq!(session.quantity().text(), "4");
}

#[tokio::test]
async fn test_quantity_counter_overrides_due_quantity() {
    let (mut session, client, _serials) = session_with(order_items(), []);

    session.load_order("71234567").await.unwrap();
    session.toggle_row(1);
    session.quantity_mut().increment();
    assert_eq!(session.quantity().text(), "5");

    session.print("jd", false).await.unwrap();
    let seen = client.seen.lock().unwrap();
    assert_eq!(seen[0].order.due_quantity, 5);
}

#[tokio::test]
async fn test_invalid_quantity_falls_back_to_order_quantity() {
    let (mut session, client, _serials) = session_with(order_items(), []);

    session.load_order("71234567").await.unwrap();
    session.toggle_row(1);
    session.quantity_mut().set_text("lots");
    assert!(session.quantity().error().is_some());

    // Advisory only: dispatch still runs, with the order's own quantity
    session.print("jd", false).await.unwrap();
    let seen = client.seen.lock().unwrap();
    assert_eq!(seen[0].order.due_quantity, 4);
}

#[tokio::test]
async fn test_flagged_rows_still_print() {
    let items = vec![FetchedItem::new("94A-LBL", "not a report number")];
    let (mut session, client, _serials) = session_with(items, []);

    session.load_order("71234567").await.unwrap();
    let row = &session.rows()[3];
    assert!(!row.note_valid);

    session.toggle_row(4);
    let report = session.print("jd", false).await.unwrap();
    assert!(report.all_succeeded());
    assert_eq!(client.seen.lock().unwrap().len(), 1);
}
