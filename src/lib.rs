//! spendscope - transaction aggregation and budget reconciliation
//!
//! Groups a ledger's transactions into a tree by any nesting of category,
//! month, year, account, and budget entry, partitioned by transaction source,
//! and compares budget targets with actual monthly spend.
//!
//! # Architecture
//!
//! - `engine`: pure aggregation, filtering, and reconciliation
//! - `models`: ids, money, and the stored records the engine reads
//! - `storage`: the read-only ledger seam, snapshots, and filter persistence
//! - `services`: query pipelines on top of a ledger
//! - `config`: paths and user settings
//! - `display`, `export`, `cli`: presentation and the command-line surface
//! - `error`, `logging`: error type and tracing setup
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendscope::engine::{aggregate, Catalog, Dimension, FilterConfiguration};
//! use spendscope::models::{Category, Money, Transaction};
//!
//! let groceries = Category::new("Groceries");
//! let catalog = Catalog::new(vec![groceries.clone()], Vec::new(), Vec::new());
//! let txns = vec![
//!     Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), Money::from_cents(-5000))
//!         .with_category(groceries.id),
//! ];
//!
//! let mut config = FilterConfiguration::seeded(Dimension::Category);
//! config.toggle_dimension(Dimension::Month).unwrap();
//!
//! let groups = aggregate(&txns, &config, &catalog);
//! assert_eq!(groups[0].group_name, "Groceries");
//! assert_eq!(groups[0].subgroups[0].group_name, "January 2025");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SpendscopeError, SpendscopeResult};
