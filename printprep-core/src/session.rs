//! Print session facade: the outbound surface consumed by the UI layer.
//!
//! A session owns the loaded order, its row list, the selection, the two
//! counters and the notification queue, and wires them to the external
//! collaborators. Selection and validation state live only for the process
//! lifetime; loading a new order discards all of it.

use crate::catalog;
use crate::config::{MIN_ORDER_NUMBER_LEN, MIN_USERNAME_LEN};
use crate::counter::Counter;
use crate::dispatch::{DispatchReport, PrintDispatcher};
use crate::error::{EngineError, Result};
use crate::model::{Category, Order, PrintableItem};
use crate::notify::NotificationQueue;
use crate::selection::{toggle_shortcut, SelectionSet, Shortcut};
use crate::source::{OrderSource, PrintClient, SerialSource};
use std::sync::{Arc, Mutex};

pub struct PrintSession {
    source: Arc<dyn OrderSource>,
    serials: Arc<dyn SerialSource>,
    dispatcher: PrintDispatcher,
    notifications: Arc<Mutex<NotificationQueue>>,
    order: Option<Order>,
    rows: Vec<PrintableItem>,
    selection: SelectionSet,
    quantity: Counter,
    serial: Counter,
}

impl PrintSession {
    pub fn new(
        source: Arc<dyn OrderSource>,
        serials: Arc<dyn SerialSource>,
        client: Arc<dyn PrintClient>,
    ) -> Self {
        let notifications = Arc::new(Mutex::new(NotificationQueue::new()));
        let dispatcher =
            PrintDispatcher::new(client, Arc::clone(&serials), Arc::clone(&notifications));
        Self {
            source,
            serials,
            dispatcher,
            notifications,
            order: None,
            rows: Vec::new(),
            selection: SelectionSet::new(),
            quantity: Counter::new("0"),
            serial: Counter::zero_padded("0"),
        }
    }

    /// Load an order and rebuild the session around it: fetches the order,
    /// its printable rows and the starting serial number, and resets the
    /// selection and counters. Any previous session state is discarded.
    pub async fn load_order(&mut self, order_number: &str) -> Result<()> {
        let order_number = order_number.trim();
        if order_number.len() < MIN_ORDER_NUMBER_LEN {
            return Err(EngineError::OrderNumberTooShort {
                order_number: order_number.to_string(),
                minimum: MIN_ORDER_NUMBER_LEN,
            });
        }

        tracing::info!(%order_number, "loading order");
        let order = self.source.fetch_order(order_number).await?;
        let fetched = self.source.fetch_printable_items(order_number).await?;
        let serial = self.serials.fetch_serial_number().await?;

        self.rows = catalog::build_rows(fetched);
        self.selection = SelectionSet::new();
        self.quantity = Counter::new(order.due_quantity.to_string());
        self.serial = Counter::zero_padded(serial);
        self.order = Some(order);

        tracing::info!(rows = self.rows.len(), "order loaded");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.order.is_some()
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn rows(&self) -> &[PrintableItem] {
        &self.rows
    }

    /// Current selection; an immutable value, replaced wholesale on every
    /// toggle.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selected rows in selection iteration order.
    pub fn selected_rows(&self) -> Vec<PrintableItem> {
        self.selection
            .iter()
            .filter_map(|id| self.rows.iter().find(|r| r.id == id))
            .cloned()
            .collect()
    }

    /// Direct checkbox toggle of a single row. Ids not in the row list are
    /// ignored, keeping the selection a subset of the current rows.
    pub fn toggle_row(&mut self, id: u32) {
        if self.rows.iter().any(|r| r.id == id) {
            self.selection = self.selection.toggled_row(id);
        }
    }

    /// Category shortcut: toggle-all over the matching rows.
    pub fn toggle_shortcut(&mut self, shortcut: Shortcut) {
        self.selection = toggle_shortcut(shortcut, &self.selection, &self.rows);
    }

    pub fn quantity(&self) -> &Counter {
        &self.quantity
    }

    pub fn quantity_mut(&mut self) -> &mut Counter {
        &mut self.quantity
    }

    pub fn serial(&self) -> &Counter {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut Counter {
        &mut self.serial
    }

    /// Shared notification queue handle for the presentation layer.
    pub fn notifications(&self) -> Arc<Mutex<NotificationQueue>> {
        Arc::clone(&self.notifications)
    }

    /// Outstanding print requests in the current batch.
    pub fn remaining(&self) -> usize {
        self.dispatcher.remaining()
    }

    /// Whether a batch is in flight; the UI disables re-submission while
    /// this is true.
    pub fn is_dispatching(&self) -> bool {
        self.dispatcher.is_dispatching()
    }

    /// The reprint flag only applies to label and doc rows: it is
    /// meaningless while the selection holds nothing past the standard
    /// sheets and initial docs.
    pub fn reprint_allowed(&self) -> bool {
        self.selected_rows()
            .iter()
            .any(|r| r.id > crate::config::STARTING_ID_CUTOFF && r.category != Category::InitialDocs)
    }

    /// Dispatch the current selection.
    ///
    /// The username gate lives here, not in the dispatcher: dispatch is
    /// only permitted once an operator has identified themselves. The
    /// quantity counter overrides the order's due quantity when it holds a
    /// valid number; the serial counter is replaced by the collaborator's
    /// fresh value after an all-success batch.
    pub async fn print(&mut self, username: &str, reprint: bool) -> Result<DispatchReport> {
        if username.len() < MIN_USERNAME_LEN {
            return Err(EngineError::UsernameTooShort {
                username: username.to_string(),
            });
        }
        let order = self.order.as_ref().ok_or(EngineError::NoOrderLoaded)?;

        let mut effective = order.clone();
        if let Some(quantity) = self.quantity.value().and_then(|v| u32::try_from(v).ok()) {
            effective.due_quantity = quantity;
        }

        let selected = self.selected_rows();
        let report = self
            .dispatcher
            .dispatch(&effective, &selected, username, self.serial.text(), reprint)
            .await;

        if let Some(fresh) = &report.refreshed_serial {
            self.serial.reset(fresh.clone());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FetchedItem;
    use crate::model::PrintOutcome;
    use crate::model::PrintRequest;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct StubSource;

    #[async_trait]
    impl OrderSource for StubSource {
        async fn fetch_order(&self, order_number: &str) -> Result<Order> {
            Ok(Order::new(order_number, "02A000123", "02A000123", 4))
        }

        async fn fetch_printable_items(&self, _order_number: &str) -> Result<Vec<FetchedItem>> {
            Ok(vec![
                FetchedItem::new("94A-LBL", "01A000111-B02"),
                FetchedItem::new("INITIAL DOCS", r"P:\Docs?initial.pdf"),
            ])
        }
    }

    struct StubSerials;

    #[async_trait]
    impl SerialSource for StubSerials {
        async fn fetch_serial_number(&self) -> Result<String> {
            Ok("001010129".to_string())
        }
    }

    struct OkClient;

    #[async_trait]
    impl PrintClient for OkClient {
        async fn submit_print(&self, _request: PrintRequest) -> PrintOutcome {
            PrintOutcome::Success
        }
    }

    fn session() -> PrintSession {
        PrintSession::new(Arc::new(StubSource), Arc::new(StubSerials), Arc::new(OkClient))
    }

    #[tokio::test]
    async fn test_load_rejects_short_order_number() {
        let mut s = session();
        let err = s.load_order("1234567").await.unwrap_err();
        assert!(matches!(err, EngineError::OrderNumberTooShort { .. }));
        assert!(!s.is_loaded());
    }

    #[tokio::test]
    async fn test_load_builds_rows_and_counters() {
        let mut s = session();
        s.load_order("71234567").await.unwrap();
        assert!(s.is_loaded());
        assert_eq!(s.rows().len(), 5);
        assert_eq!(s.quantity().text(), "4");
        assert_eq!(s.serial().text(), "001010129");
        assert!(s.selection().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_row_ignores_unknown_ids() {
        let mut s = session();
        s.load_order("71234567").await.unwrap();
        s.toggle_row(42);
        assert!(s.selection().is_empty());
        s.toggle_row(4);
        assert!(s.selection().contains(4));
    }

    #[tokio::test]
    async fn test_reprint_gate() {
        let mut s = session();
        s.load_order("71234567").await.unwrap();

        // Standard sheets and initial docs alone do not enable reprint
        s.toggle_shortcut(Shortcut::Starting);
        assert!(!s.reprint_allowed());

        // A label row does (id 4 in this fixture)
        s.toggle_row(4);
        assert!(s.reprint_allowed());
    }

    #[tokio::test]
    async fn test_print_requires_username() {
        let mut s = session();
        s.load_order("71234567").await.unwrap();
        s.toggle_row(1);

        let err = s.print("j", false).await.unwrap_err();
        assert!(matches!(err, EngineError::UsernameTooShort { .. }));
    }

    #[tokio::test]
    async fn test_print_requires_loaded_order() {
        let mut s = session();
        let err = s.print("jd", false).await.unwrap_err();
        assert!(matches!(err, EngineError::NoOrderLoaded));
    }
}
