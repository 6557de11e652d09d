//! Storage layer for spendscope
//!
//! Read-only ledger access for the engine, plus JSON persistence of the
//! filter configuration with atomic writes.

pub mod file_io;
pub mod filters;
pub mod ledger;

pub use file_io::{read_json_optional, read_json_required, write_json_atomic};
pub use filters::FilterStore;
pub use ledger::{LedgerSource, Snapshot, TransactionPredicate};
