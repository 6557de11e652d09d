//! Service layer for spendscope
//!
//! Services sit between a [`LedgerSource`](crate::storage::LedgerSource) and
//! the pure engine: they read the ledger, apply settings, and call the
//! engine with explicit inputs.

pub mod aggregation;
pub mod budget;

pub use aggregation::{AggregatedTransactions, AggregationService};
pub use budget::BudgetService;
