//! Domain module
//!
//! Core domain types and business logic.

pub mod transaction;

pub use transaction::{format_transaction, format_transactions, FormattedTransaction, RawTransactionRow};
