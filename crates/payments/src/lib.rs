//! Payments mockup: an in-memory transaction ledger with local status flips.
//! Nothing here talks to a payment gateway or persists across restarts.

pub mod ledger;

pub use ledger::{LedgerSummary, PaymentLedger, ProcessOutcome};
