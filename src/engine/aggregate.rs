//! Aggregation engine
//!
//! Recursive partition-and-sum over an ordered list of dimensions. Leaves
//! sum their transactions directly; every other node's totals are the sum of
//! its children, so parent totals equal the sum of their subgroups exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::catalog::Catalog;
use super::dimension::{BucketKey, Dimension};
use super::filter::FilterConfiguration;
use crate::models::{Money, Transaction, TransactionId};

/// Group id of the single node produced when no dimension is configured
pub const ALL_GROUP_ID: &str = "all";
pub const ALL_GROUP_NAME: &str = "All";

/// One node of the aggregation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedNode {
    pub group_id: String,
    pub group_name: String,

    /// Dimension that produced this level; `None` only for the ungrouped node
    pub groupby_kind: Option<Dimension>,

    /// Sum of positive amounts
    pub total_deposits: Money,

    /// Sum of withdrawal magnitudes
    pub total_withdrawals: Money,

    /// `total_deposits - total_withdrawals`
    pub total_balance: Money,

    pub transaction_count: usize,

    /// Budget target for budget-kind nodes, see `apply_budget_targets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted_total: Option<Money>,

    /// Transactions of a leaf, for drill-down. Empty on inner nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<TransactionId>,

    #[serde(default)]
    pub subgroups: Vec<AggregatedNode>,
}

impl AggregatedNode {
    /// Leaf summing `txns` directly
    fn leaf(key: BucketKey, kind: Option<Dimension>, txns: &[&Transaction]) -> Self {
        let total_deposits: Money = txns.iter().map(|t| t.amount.deposit_part()).sum();
        let total_withdrawals: Money = txns.iter().map(|t| t.amount.withdrawal_part()).sum();
        Self {
            group_id: key.id,
            group_name: key.label,
            groupby_kind: kind,
            total_deposits,
            total_withdrawals,
            total_balance: total_deposits - total_withdrawals,
            transaction_count: txns.len(),
            budgeted_total: None,
            transactions: txns.iter().map(|t| t.id).collect(),
            subgroups: Vec::new(),
        }
    }

    /// Inner node whose totals come from its children only
    fn branch(key: BucketKey, kind: Dimension, subgroups: Vec<AggregatedNode>) -> Self {
        let total_deposits: Money = subgroups.iter().map(|n| n.total_deposits).sum();
        let total_withdrawals: Money = subgroups.iter().map(|n| n.total_withdrawals).sum();
        Self {
            group_id: key.id,
            group_name: key.label,
            groupby_kind: Some(kind),
            total_deposits,
            total_withdrawals,
            total_balance: total_deposits - total_withdrawals,
            transaction_count: subgroups.iter().map(|n| n.transaction_count).sum(),
            budgeted_total: None,
            transactions: Vec::new(),
            subgroups,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.subgroups.is_empty()
    }

    /// All leaves below (or equal to) this node, in tree order
    pub fn leaves(&self) -> Vec<&AggregatedNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a AggregatedNode>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in &self.subgroups {
                child.collect_leaves(out);
            }
        }
    }

    /// Number of levels from this node down to its deepest leaf
    pub fn depth(&self) -> usize {
        1 + self.subgroups.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Direct child with the given id
    pub fn child(&self, group_id: &str) -> Option<&AggregatedNode> {
        self.subgroups.iter().find(|c| c.group_id == group_id)
    }
}

/// Aggregate by the configuration's active dimensions, in nesting order
pub fn aggregate(
    transactions: &[Transaction],
    config: &FilterConfiguration,
    catalog: &Catalog,
) -> Vec<AggregatedNode> {
    let refs: Vec<&Transaction> = transactions.iter().collect();
    aggregate_refs(&refs, &config.ordered_dimensions(), config, catalog)
}

/// Aggregate by an explicit dimension sequence, applying the configuration's
/// value constraints for those dimensions.
///
/// Transactions rejected by any constraint are dropped before the first
/// bucketing step, so they contribute to no total at any level. Zero
/// admitted transactions produce an empty sequence.
pub fn aggregate_refs(
    transactions: &[&Transaction],
    dimensions: &[Dimension],
    config: &FilterConfiguration,
    catalog: &Catalog,
) -> Vec<AggregatedNode> {
    let admitted: Vec<&Transaction> = transactions
        .iter()
        .copied()
        .filter(|t| config.admits(t, dimensions, catalog))
        .collect();

    tracing::trace!(
        input = transactions.len(),
        admitted = admitted.len(),
        depth = dimensions.len(),
        "aggregating"
    );

    if admitted.is_empty() {
        return Vec::new();
    }

    if dimensions.is_empty() {
        return vec![AggregatedNode::leaf(
            BucketKey::new(ALL_GROUP_ID, ALL_GROUP_NAME),
            None,
            &admitted,
        )];
    }

    build_level(&admitted, dimensions, catalog)
}

fn build_level(
    txns: &[&Transaction],
    dimensions: &[Dimension],
    catalog: &Catalog,
) -> Vec<AggregatedNode> {
    let Some((&head, rest)) = dimensions.split_first() else {
        return Vec::new();
    };

    // Insertion-stable grouping
    let mut buckets: Vec<(BucketKey, Vec<&Transaction>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for &txn in txns {
        let key = head.bucket_key(txn, catalog);
        match index.get(&key.id) {
            Some(&i) => buckets[i].1.push(txn),
            None => {
                index.insert(key.id.clone(), buckets.len());
                buckets.push((key, vec![txn]));
            }
        }
    }

    // Stable sort keeps insertion order for equal keys
    buckets.sort_by(|a, b| head.compare(&a.0, &b.0));

    buckets
        .into_iter()
        .map(|(key, members)| {
            if rest.is_empty() {
                AggregatedNode::leaf(key, Some(head), &members)
            } else {
                AggregatedNode::branch(key, head, build_level(&members, rest, catalog))
            }
        })
        .collect()
}

/// Sum of deposits, withdrawals, and balance over a set of root nodes
pub fn totals(groups: &[AggregatedNode]) -> (Money, Money, Money) {
    let deposits: Money = groups.iter().map(|g| g.total_deposits).sum();
    let withdrawals: Money = groups.iter().map(|g| g.total_withdrawals).sum();
    (deposits, withdrawals, deposits - withdrawals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    struct Fixture {
        catalog: Catalog,
        groceries: Category,
        rent: Category,
        txns: Vec<Transaction>,
    }

    fn fixture() -> Fixture {
        let groceries = Category::new("Groceries");
        let rent = Category::new("Rent");
        let catalog = Catalog::new(vec![groceries.clone(), rent.clone()], Vec::new(), Vec::new());
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let txns = vec![
            Transaction::new(date(1, 10), Money::from_cents(-5000)).with_category(groceries.id),
            Transaction::new(date(2, 3), Money::from_cents(-3000)).with_category(groceries.id),
            Transaction::new(date(1, 1), Money::from_cents(-2000)).with_category(rent.id),
        ];
        Fixture {
            catalog,
            groceries,
            rent,
            txns,
        }
    }

    fn config(dims: &[Dimension]) -> FilterConfiguration {
        let mut config = FilterConfiguration::seeded(dims[0]);
        for d in &dims[1..] {
            config.toggle_dimension(*d).unwrap();
        }
        config
    }

    #[test]
    fn test_category_then_month() {
        let f = fixture();
        let groups = aggregate(
            &f.txns,
            &config(&[Dimension::Category, Dimension::Month]),
            &f.catalog,
        );

        assert_eq!(groups.len(), 2);

        let groceries = &groups[0];
        assert_eq!(groceries.group_name, "Groceries");
        assert_eq!(groceries.group_id, f.groceries.id.key());
        assert_eq!(groceries.groupby_kind, Some(Dimension::Category));
        assert_eq!(groceries.total_withdrawals.cents(), 8000);
        assert!(groceries.total_deposits.is_zero());
        assert_eq!(groceries.subgroups.len(), 2);
        assert_eq!(groceries.subgroups[0].group_id, "2025-01");
        assert_eq!(groceries.subgroups[0].total_withdrawals.cents(), 5000);
        assert_eq!(groceries.subgroups[1].group_id, "2025-02");
        assert_eq!(groceries.subgroups[1].total_withdrawals.cents(), 3000);
        assert_eq!(groceries.subgroups[0].groupby_kind, Some(Dimension::Month));

        let rent = &groups[1];
        assert_eq!(rent.group_id, f.rent.id.key());
        assert_eq!(rent.total_withdrawals.cents(), 2000);
        assert_eq!(rent.subgroups.len(), 1);
        assert_eq!(rent.subgroups[0].total_withdrawals.cents(), 2000);
    }

    #[test]
    fn test_deepest_level_has_no_subgroups() {
        let f = fixture();
        let groups = aggregate(&f.txns, &config(&[Dimension::Category]), &f.catalog);
        assert!(groups.iter().all(|g| g.is_leaf()));
        assert_eq!(groups[0].transactions.len(), 2);
    }

    #[test]
    fn test_no_dimensions_yields_single_ungrouped_leaf() {
        let f = fixture();
        let refs: Vec<&Transaction> = f.txns.iter().collect();
        let groups = aggregate_refs(&refs, &[], &FilterConfiguration::default(), &f.catalog);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_id, ALL_GROUP_ID);
        assert!(groups[0].groupby_kind.is_none());
        assert_eq!(groups[0].total_withdrawals.cents(), 10000);
        assert_eq!(groups[0].transaction_count, 3);
    }

    #[test]
    fn test_no_transactions_yields_no_groups() {
        let f = fixture();
        assert!(aggregate(&[], &config(&[Dimension::Category]), &f.catalog).is_empty());
        assert!(aggregate_refs(&[], &[], &FilterConfiguration::default(), &f.catalog).is_empty());
    }

    #[test]
    fn test_specifics_exclude_before_aggregation() {
        let f = fixture();
        let mut config = config(&[Dimension::Category, Dimension::Month]);
        config.set_specifics(Dimension::Month, ["2025-01"]).unwrap();

        let groups = aggregate(&f.txns, &config, &f.catalog);
        let groceries = &groups[0];
        assert_eq!(groceries.total_withdrawals.cents(), 5000);
        assert_eq!(groceries.subgroups.len(), 1);
        assert_eq!(groups[1].total_withdrawals.cents(), 2000);
    }

    #[test]
    fn test_excluded_parent_disappears() {
        let f = fixture();
        let mut config = config(&[Dimension::Category, Dimension::Month]);
        config.set_specifics(Dimension::Month, ["2025-02"]).unwrap();

        let groups = aggregate(&f.txns, &config, &f.catalog);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name, "Groceries");
    }

    #[test]
    fn test_empty_specifics_yield_empty_result() {
        let f = fixture();
        let mut config = config(&[Dimension::Category, Dimension::Month]);
        config.set_specifics(Dimension::Month, Vec::<String>::new()).unwrap();
        assert!(aggregate(&f.txns, &config, &f.catalog).is_empty());
    }

    #[test]
    fn test_deposits_and_balance() {
        let f = fixture();
        let mut txns = f.txns.clone();
        txns.push(
            Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(), Money::from_cents(1500))
                .with_category(f.groceries.id),
        );

        let groups = aggregate(&txns, &config(&[Dimension::Category]), &f.catalog);
        let groceries = &groups[0];
        assert_eq!(groceries.total_deposits.cents(), 1500);
        assert_eq!(groceries.total_withdrawals.cents(), 8000);
        assert_eq!(groceries.total_balance.cents(), -6500);

        let (deposits, withdrawals, balance) = totals(&groups);
        assert_eq!(deposits.cents(), 1500);
        assert_eq!(withdrawals.cents(), 10000);
        assert_eq!(balance.cents(), -8500);
    }

    #[test]
    fn test_years_sort_chronologically() {
        let f = fixture();
        let mut txns = f.txns.clone();
        txns.insert(
            0,
            Transaction::new(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(), Money::from_cents(-1)),
        );
        txns.push(Transaction::new(
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            Money::from_cents(-1),
        ));

        let groups = aggregate(&txns, &config(&[Dimension::Year]), &f.catalog);
        let ids: Vec<&str> = groups.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(ids, vec!["2023", "2025", "2026"]);
    }

    #[test]
    fn test_leaves_and_depth() {
        let f = fixture();
        let groups = aggregate(
            &f.txns,
            &config(&[Dimension::Year, Dimension::Category, Dimension::Month]),
            &f.catalog,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].depth(), 3);
        assert_eq!(groups[0].leaves().len(), 3);
        assert!(groups[0].child(&f.rent.id.key()).is_some());
    }
}
