use parking_lot::RwLock;
use serde::Serialize;
use starlight_core::types::{Transaction, TransactionStatus};
use std::sync::Arc;
use tracing::info;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessOutcome {
    /// Status flipped to Completed.
    Processed { transaction: Transaction },
    /// Already Completed; nothing changed.
    AlreadyCompleted { transaction: Transaction },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Ordered, in-memory list of sponsor transactions.
#[derive(Clone)]
pub struct PaymentLedger {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PaymentLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
        }
    }

    /// Ledger preloaded with the demo transactions.
    pub fn seeded() -> Self {
        let ledger = Self::new(demo_transactions());
        info!(transactions = ledger.transactions.read().len(), "Payment ledger seeded");
        ledger
    }

    pub fn list(&self) -> Vec<Transaction> {
        self.transactions.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.transactions.read().iter().find(|t| t.id == id).cloned()
    }

    /// Mark a Pending or Failed transaction Completed. `None` if the id is unknown.
    pub fn process(&self, id: &str) -> Option<ProcessOutcome> {
        let mut transactions = self.transactions.write();
        let tx = transactions.iter_mut().find(|t| t.id == id)?;
        if tx.status == TransactionStatus::Completed {
            return Some(ProcessOutcome::AlreadyCompleted { transaction: tx.clone() });
        }
        let previous = tx.status;
        tx.status = TransactionStatus::Completed;
        metrics::counter!("payments.processed").increment(1);
        info!(transaction_id = id, ?previous, "Transaction processed");
        Some(ProcessOutcome::Processed { transaction: tx.clone() })
    }

    pub fn summary(&self) -> LedgerSummary {
        let transactions = self.transactions.read();
        let mut summary = LedgerSummary {
            total: transactions.len(),
            ..Default::default()
        };
        for t in transactions.iter() {
            match t.status {
                TransactionStatus::Completed => summary.completed += 1,
                TransactionStatus::Pending => summary.pending += 1,
                TransactionStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }
}

fn tx(id: &str, sponsor: &str, campaign: &str, amount: &str, date: &str, status: TransactionStatus, method: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        sponsor_name: sponsor.to_string(),
        campaign_id: campaign.to_string(),
        amount: amount.to_string(),
        date: date.to_string(),
        status,
        method: method.to_string(),
    }
}

fn demo_transactions() -> Vec<Transaction> {
    use TransactionStatus::*;
    vec![
        tx("txn-1001", "Nimbus Audio", "ad-01", "$1,250.00", "2024-05-02", Completed, "Visa •••• 4242"),
        tx("txn-1002", "Brightside Travel", "un-01", "$860.00", "2024-05-04", Pending, "Bank transfer"),
        tx("txn-1003", "Peak Outdoor Co.", "sh-01", "$420.50", "2024-05-07", Failed, "Mastercard •••• 5100"),
        tx("txn-1004", "Lumen Coffee", "ad-03", "$2,100.00", "2024-05-09", Completed, "PayPal"),
        tx("txn-1005", "Orbit Games", "sh-03", "$615.75", "2024-05-12", Pending, "Visa •••• 1881"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_summary() {
        let ledger = PaymentLedger::seeded();
        assert_eq!(
            ledger.summary(),
            LedgerSummary {
                total: 5,
                completed: 2,
                pending: 2,
                failed: 1
            }
        );
    }

    #[test]
    fn test_process_flips_pending_and_failed() {
        let ledger = PaymentLedger::seeded();
        for id in ["txn-1002", "txn-1003"] {
            match ledger.process(id) {
                Some(ProcessOutcome::Processed { transaction }) => {
                    assert_eq!(transaction.status, TransactionStatus::Completed)
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(ledger.get("txn-1003").unwrap().status, TransactionStatus::Completed);
        assert_eq!(ledger.summary().completed, 4);
    }

    #[test]
    fn test_process_completed_and_unknown() {
        let ledger = PaymentLedger::seeded();
        assert!(matches!(
            ledger.process("txn-1001"),
            Some(ProcessOutcome::AlreadyCompleted { .. })
        ));
        assert!(ledger.process("txn-9999").is_none());
        // Order is preserved
        let ids: Vec<String> = ledger.list().into_iter().map(|t| t.id).collect();
        assert_eq!(ids.first().map(String::as_str), Some("txn-1001"));
    }

    #[test]
    fn test_clones_share_state() {
        let ledger = PaymentLedger::seeded();
        let other = ledger.clone();
        other.process("txn-1005");
        assert_eq!(ledger.get("txn-1005").unwrap().status, TransactionStatus::Completed);
    }
}
