//! Aggregation and reconciliation engine
//!
//! Pure, synchronous functions over in-memory snapshots. Nothing here
//! performs I/O or holds state between calls; the filter configuration and
//! the lookup catalog are explicit inputs to every call.

pub mod aggregate;
pub mod catalog;
pub mod choices;
pub mod dimension;
pub mod filter;
pub mod partition;
pub mod reconcile;
pub mod targets;

pub use aggregate::{aggregate, aggregate_refs, totals, AggregatedNode, ALL_GROUP_ID, ALL_GROUP_NAME};
pub use catalog::{Catalog, EntryRef};
pub use choices::{grouping_choices, ChoiceOption, GroupingChoices};
pub use dimension::{
    BucketKey, Dimension, NO_ACCOUNT_ID, NO_ACCOUNT_LABEL, UNASSIGNED_ID, UNASSIGNED_LABEL,
    UNCATEGORIZED_ID, UNCATEGORIZED_LABEL,
};
pub use filter::{FilterConfiguration, FilterEntry, Toggle};
pub use partition::{
    aggregate_sources, partition_by_source, TransactionSourceGroup, UNSPECIFIED_SOURCE_NAME,
};
pub use reconcile::{
    reconcile, unbudgeted_transactions, BudgetEntryStatus, BudgetStatus, CategoryLinkStatus,
};
pub use targets::apply_budget_targets;
