//! Transaction-source partitioner
//!
//! Sources are the top-level boundary of every aggregation: each source's
//! transactions are aggregated on their own and never share totals with
//! another source.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{aggregate_refs, AggregatedNode};
use super::catalog::Catalog;
use super::filter::FilterConfiguration;
use crate::models::{Transaction, TransactionSourceId};

/// Display name of the group holding transactions without a source
pub const UNSPECIFIED_SOURCE_NAME: &str = "Unspecified Source";

/// Aggregation tree of one transaction source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSourceGroup {
    /// `None` for the unspecified-source group
    pub transaction_source_id: Option<TransactionSourceId>,
    pub transaction_source_name: String,
    pub groups: Vec<AggregatedNode>,
}

impl TransactionSourceGroup {
    pub fn is_unspecified(&self) -> bool {
        self.transaction_source_id.is_none()
    }
}

/// Split transactions into disjoint per-source sets.
///
/// Sources come out in ascending id order with the unspecified group last.
/// Transactions keep their input order inside a set.
pub fn partition_by_source(
    transactions: &[Transaction],
) -> Vec<(Option<TransactionSourceId>, Vec<&Transaction>)> {
    let mut by_source: BTreeMap<TransactionSourceId, Vec<&Transaction>> = BTreeMap::new();
    let mut unspecified = Vec::new();

    for txn in transactions {
        match txn.source_id {
            Some(id) => by_source.entry(id).or_default().push(txn),
            None => unspecified.push(txn),
        }
    }

    let mut parts: Vec<(Option<TransactionSourceId>, Vec<&Transaction>)> = by_source
        .into_iter()
        .map(|(id, txns)| (Some(id), txns))
        .collect();
    if !unspecified.is_empty() {
        parts.push((None, unspecified));
    }
    parts
}

/// Partition by source and aggregate each partition independently.
///
/// Sources whose transactions are all filtered out are omitted.
pub fn aggregate_sources(
    transactions: &[Transaction],
    config: &FilterConfiguration,
    catalog: &Catalog,
) -> Vec<TransactionSourceGroup> {
    let dimensions = config.ordered_dimensions();

    partition_by_source(transactions)
        .into_iter()
        .filter_map(|(source_id, txns)| {
            let groups = aggregate_refs(&txns, &dimensions, config, catalog);
            if groups.is_empty() {
                return None;
            }
            let name = match source_id {
                Some(id) => catalog
                    .source(id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| id.key()),
                None => UNSPECIFIED_SOURCE_NAME.to_string(),
            };
            tracing::debug!(source = %name, roots = groups.len(), "aggregated source");
            Some(TransactionSourceGroup {
                transaction_source_id: source_id,
                transaction_source_name: name,
                groups,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Dimension;
    use crate::models::{Money, TransactionSource};
    use chrono::NaiveDate;

    fn txn(cents: i64) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), Money::from_cents(cents))
    }

    #[test]
    fn test_partition_is_disjoint_and_ordered() {
        let a = TransactionSource::new("A");
        let b = TransactionSource::new("B");
        let txns = vec![
            txn(-1).with_source(b.id),
            txn(-2),
            txn(-3).with_source(a.id),
            txn(-4).with_source(b.id),
        ];

        let parts = partition_by_source(&txns);
        assert_eq!(parts.len(), 3);

        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(parts[0].0, Some(expected[0]));
        assert_eq!(parts[1].0, Some(expected[1]));
        assert_eq!(parts[2].0, None);

        let total: usize = parts.iter().map(|(_, t)| t.len()).sum();
        assert_eq!(total, txns.len());

        let b_part = parts.iter().find(|(id, _)| *id == Some(b.id)).unwrap();
        let amounts: Vec<i64> = b_part.1.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![-1, -4]);
    }

    #[test]
    fn test_sources_do_not_share_totals() {
        let a = TransactionSource::new("Checking Feed");
        let catalog = Catalog::new(Vec::new(), Vec::new(), vec![a.clone()]);
        let txns = vec![txn(-100).with_source(a.id), txn(-50)];

        let groups = aggregate_sources(&txns, &FilterConfiguration::default(), &catalog);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].transaction_source_name, "Checking Feed");
        assert_eq!(groups[0].groups[0].total_withdrawals.cents(), 100);
        assert!(groups[1].is_unspecified());
        assert_eq!(groups[1].transaction_source_name, UNSPECIFIED_SOURCE_NAME);
        assert_eq!(groups[1].groups[0].total_withdrawals.cents(), 50);
    }

    #[test]
    fn test_fully_filtered_source_is_omitted() {
        let a = TransactionSource::new("A");
        let catalog = Catalog::new(Vec::new(), Vec::new(), vec![a.clone()]);
        let txns = vec![
            txn(-100).with_source(a.id),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), Money::from_cents(-5)),
        ];

        let mut config = FilterConfiguration::seeded(Dimension::Year);
        config.set_specifics(Dimension::Year, ["2024"]).unwrap();

        let groups = aggregate_sources(&txns, &config, &catalog);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].is_unspecified());
    }

    #[test]
    fn test_empty_input() {
        assert!(partition_by_source(&[]).is_empty());
        assert!(aggregate_sources(&[], &FilterConfiguration::default(), &Catalog::default()).is_empty());
    }
}
