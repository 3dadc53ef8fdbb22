use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is closed.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            error!("Event delivery failed: {}", e);
        }
    }
}

// Define the various events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Ledger events
    LedgerRebuilt {
        entries_written: u64,
        completed_at: DateTime<Utc>,
    },

    // Production events
    ProductionRunCompleted {
        run_id: i64,
        output_item_id: i64,
        output_qty: Decimal,
    },
    ProductionRunUpdated {
        run_id: i64,
    },
    ProductionRunDeleted {
        run_id: i64,
    },
    ProductionRunRestored {
        run_id: i64,
    },

    // Document events
    PurchaseReceiptRecorded {
        receipt_id: i64,
        item_id: i64,
        quantity: Decimal,
    },
    SalesShipmentRecorded {
        shipment_id: i64,
        item_id: i64,
        quantity: Decimal,
    },
    StockTransferRecorded {
        transfer_id: i64,
        item_id: i64,
        quantity: Decimal,
    },
    StockAdjustmentRecorded {
        adjustment_id: i64,
        item_id: i64,
        quantity_delta: Decimal,
    },
    DocumentDeleted {
        reference_type: String,
        reference_id: i64,
    },
    DocumentRestored {
        reference_type: String,
        reference_id: i64,
    },

    // Generic event for custom messages
    Generic {
        message: String,
        timestamp: DateTime<Utc>,
        metadata: serde_json::Value,
    },
}

impl Event {
    /// Create a generic event with string data
    pub fn with_data(data: String) -> Self {
        Event::Generic {
            message: data,
            timestamp: Utc::now(),
            metadata: serde_json::Value::Null,
        }
    }
}

// Function to process incoming events. Most events only need structured
// logging today; the match keeps a seam for follow-on side effects.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::LedgerRebuilt {
                entries_written,
                completed_at,
            } => {
                info!(entries_written, %completed_at, "Stock ledger rebuilt");
            }
            Event::ProductionRunCompleted {
                run_id,
                output_item_id,
                output_qty,
            } => {
                info!(run_id, output_item_id, %output_qty, "Production run completed");
            }
            Event::ProductionRunUpdated { run_id } => {
                info!(run_id, "Production run updated");
            }
            Event::ProductionRunDeleted { run_id } => {
                info!(run_id, "Production run deleted");
            }
            Event::ProductionRunRestored { run_id } => {
                info!(run_id, "Production run restored");
            }
            Event::PurchaseReceiptRecorded {
                receipt_id,
                item_id,
                quantity,
            } => {
                info!(receipt_id, item_id, %quantity, "Purchase receipt recorded");
            }
            Event::SalesShipmentRecorded {
                shipment_id,
                item_id,
                quantity,
            } => {
                info!(shipment_id, item_id, %quantity, "Sales shipment recorded");
            }
            Event::StockTransferRecorded {
                transfer_id,
                item_id,
                quantity,
            } => {
                info!(transfer_id, item_id, %quantity, "Stock transfer recorded");
            }
            Event::StockAdjustmentRecorded {
                adjustment_id,
                item_id,
                quantity_delta,
            } => {
                info!(adjustment_id, item_id, %quantity_delta, "Stock adjustment recorded");
            }
            Event::DocumentDeleted {
                reference_type,
                reference_id,
            } => {
                info!(reference_type, reference_id, "Document soft-deleted");
            }
            Event::DocumentRestored {
                reference_type,
                reference_id,
            } => {
                info!(reference_type, reference_id, "Document restored");
            }
            Event::Generic { message, .. } => {
                info!("Event: {}", message);
            }
        }
    }

    warn!("Event processing loop has ended");
}
