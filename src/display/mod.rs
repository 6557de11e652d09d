//! Display formatting for terminal output
//!
//! Tree rendering for aggregation results, tables for budget status and the
//! filter configuration, and the visibility filtering that presentation
//! applies after the engine has built a tree.

pub mod format;
pub mod tables;
pub mod tree;
pub mod visibility;

pub use format::{format_money, separator, truncate};
pub use tables::{format_budget_status, format_choices, format_filters};
pub use tree::format_aggregation_tree;
pub use visibility::visible_groups;
