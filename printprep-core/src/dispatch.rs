//! Concurrent print dispatch and outcome aggregation.
//!
//! Every selected row becomes one independent print request. Requests are
//! concurrently outstanding with no ordering dependency; the dispatcher
//! joins them as a counted completion group, so the "all succeeded" check
//! cannot race between two resolutions.

use crate::model::{Order, PrintOutcome, PrintRequest, PrintableItem};
use crate::notify::{NotificationQueue, Severity};
use crate::source::{PrintClient, SerialSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

/// Aggregate result of one print batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Fresh serial number fetched after an all-success batch.
    pub refreshed_serial: Option<String>,
}

impl DispatchReport {
    /// Every dispatched row resolved successfully.
    pub fn all_succeeded(&self) -> bool {
        self.attempted > 0 && self.failed == 0
    }
}

/// Fires one print request per selected row and aggregates the outcomes
/// into notifications: one warning per failed row, and a single success
/// message only when the whole batch succeeded.
pub struct PrintDispatcher {
    client: Arc<dyn PrintClient>,
    serials: Arc<dyn SerialSource>,
    notifications: Arc<Mutex<NotificationQueue>>,
    remaining: Arc<AtomicUsize>,
}

impl PrintDispatcher {
    pub fn new(
        client: Arc<dyn PrintClient>,
        serials: Arc<dyn SerialSource>,
        notifications: Arc<Mutex<NotificationQueue>>,
    ) -> Self {
        Self {
            client,
            serials,
            notifications,
            remaining: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Print requests still outstanding in the current batch.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Whether a batch is currently in flight; the UI disables re-submission
    /// while this is true.
    pub fn is_dispatching(&self) -> bool {
        self.remaining() > 0
    }

    /// Dispatch one batch. `rows` are the selected rows in selection
    /// iteration order; the caller has already verified the username.
    ///
    /// Per-row failures are tolerated: each produces one warning
    /// notification and leaves its siblings running. When every outcome is
    /// a success, one success notification is published and a fresh serial
    /// number is fetched for the report.
    pub async fn dispatch(
        &self,
        order: &Order,
        rows: &[PrintableItem],
        username: &str,
        serial_number: &str,
        reprint: bool,
    ) -> DispatchReport {
        let mut report = DispatchReport {
            attempted: rows.len(),
            ..Default::default()
        };
        if rows.is_empty() {
            return report;
        }

        self.remaining.store(rows.len(), Ordering::SeqCst);

        let mut tasks = JoinSet::new();
        for row in rows {
            let client = Arc::clone(&self.client);
            let request = PrintRequest {
                order: order.clone(),
                item: row.clone(),
                username: username.to_string(),
                serial_number: serial_number.to_string(),
                reprint,
            };
            tasks.spawn(async move {
                let label = request.item.label.clone();
                let outcome = client.submit_print(request).await;
                (label, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            // Never below zero, even if a task is double-counted by a panic.
            let _ = self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));

            let (label, outcome) = match joined {
                Ok(resolved) => resolved,
                Err(join_err) => ("print task".to_string(), PrintOutcome::Failure(join_err.to_string())),
            };

            match outcome {
                PrintOutcome::Success => {
                    tracing::debug!(%label, "print succeeded");
                    report.succeeded += 1;
                }
                PrintOutcome::Failure(reason) => {
                    tracing::warn!(%label, %reason, "print failed");
                    report.failed += 1;
                    self.publish(
                        format!("Error printing: {} Error: {}", label, reason),
                        Severity::Warning,
                    );
                }
            }
        }

        self.remaining.store(0, Ordering::SeqCst);

        if report.all_succeeded() {
            tracing::info!(count = report.succeeded, "print batch complete");
            self.publish("Successful print", Severity::Success);
            match self.serials.fetch_serial_number().await {
                Ok(fresh) => report.refreshed_serial = Some(fresh),
                // Non-fatal: the operator keeps the current serial and may
                // re-navigate to refresh it.
                Err(err) => tracing::warn!(%err, "serial number refresh failed"),
            }
        }

        report
    }

    fn publish(&self, text: impl Into<String>, severity: Severity) {
        self.notifications
            .lock()
            .expect("notification queue lock poisoned")
            .publish(text, severity);
    }
}
