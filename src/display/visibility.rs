//! Presentation-side visibility filtering
//!
//! The engine always nests by every active dimension. Hiding a dimension
//! removes its level here, after the tree is built: its children move up
//! into the parent level and siblings that now share a bucket are merged.
//! Totals are sums either way, so they do not change.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::engine::{
    totals, AggregatedNode, BucketKey, Dimension, FilterConfiguration, ALL_GROUP_ID,
    ALL_GROUP_NAME,
};
use crate::models::TransactionId;

/// Remove the levels of dimensions marked invisible in `config`
pub fn visible_groups(groups: &[AggregatedNode], config: &FilterConfiguration) -> Vec<AggregatedNode> {
    let hidden: HashSet<Dimension> = config.hidden_dimensions().into_iter().collect();
    if hidden.is_empty() {
        return groups.to_vec();
    }

    let spliced = splice(groups.to_vec(), &hidden);
    if spliced.is_empty() && !groups.is_empty() {
        // Every level was hidden
        return vec![ungrouped(groups)];
    }
    spliced
}

fn splice(nodes: Vec<AggregatedNode>, hidden: &HashSet<Dimension>) -> Vec<AggregatedNode> {
    let mut out: Vec<AggregatedNode> = Vec::new();

    for mut node in nodes {
        if node.groupby_kind.is_some_and(|d| hidden.contains(&d)) {
            for child in splice(node.subgroups, hidden) {
                merge_into(&mut out, child);
            }
            continue;
        }

        let children = std::mem::take(&mut node.subgroups);
        if !children.is_empty() {
            let leaf_ids = leaf_transactions(&children);
            node.subgroups = splice(children, hidden);
            if node.subgroups.is_empty() {
                // Became a leaf; keep drill-down working
                node.transactions = leaf_ids;
            }
        }
        merge_into(&mut out, node);
    }

    out.sort_by(compare_siblings);
    out
}

fn merge_into(out: &mut Vec<AggregatedNode>, node: AggregatedNode) {
    let Some(existing) = out
        .iter_mut()
        .find(|n| n.groupby_kind == node.groupby_kind && n.group_id == node.group_id)
    else {
        out.push(node);
        return;
    };

    existing.total_deposits += node.total_deposits;
    existing.total_withdrawals += node.total_withdrawals;
    existing.total_balance += node.total_balance;
    existing.transaction_count += node.transaction_count;
    existing.budgeted_total = match (existing.budgeted_total, node.budgeted_total) {
        (Some(a), Some(b)) => Some(a + b),
        (a, b) => a.or(b),
    };
    existing.transactions.extend(node.transactions);

    let mut subgroups = std::mem::take(&mut existing.subgroups);
    for child in node.subgroups {
        merge_into(&mut subgroups, child);
    }
    subgroups.sort_by(compare_siblings);
    existing.subgroups = subgroups;
}

fn compare_siblings(a: &AggregatedNode, b: &AggregatedNode) -> Ordering {
    match (a.groupby_kind, b.groupby_kind) {
        (Some(x), Some(y)) if x == y => x.compare(
            &BucketKey::new(a.group_id.as_str(), a.group_name.as_str()),
            &BucketKey::new(b.group_id.as_str(), b.group_name.as_str()),
        ),
        _ => Ordering::Equal,
    }
}

fn leaf_transactions(nodes: &[AggregatedNode]) -> Vec<TransactionId> {
    nodes
        .iter()
        .flat_map(|n| n.leaves())
        .flat_map(|leaf| leaf.transactions.iter().copied())
        .collect()
}

fn ungrouped(groups: &[AggregatedNode]) -> AggregatedNode {
    let (total_deposits, total_withdrawals, total_balance) = totals(groups);
    AggregatedNode {
        group_id: ALL_GROUP_ID.to_string(),
        group_name: ALL_GROUP_NAME.to_string(),
        groupby_kind: None,
        total_deposits,
        total_withdrawals,
        total_balance,
        transaction_count: groups.iter().map(|g| g.transaction_count).sum(),
        budgeted_total: None,
        transactions: leaf_transactions(groups),
        subgroups: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{aggregate, Catalog};
    use crate::models::{Account, AccountType, Category, Money, Transaction};
    use chrono::NaiveDate;

    fn fixture() -> (Vec<Transaction>, Catalog) {
        let groceries = Category::new("Groceries");
        let rent = Category::new("Rent");
        let catalog = Catalog::new(vec![groceries.clone(), rent.clone()], Vec::new(), Vec::new());
        let date = |y, m| NaiveDate::from_ymd_opt(y, m, 1).unwrap();
        let txns = vec![
            Transaction::new(date(2025, 1), Money::from_cents(-5000)).with_category(groceries.id),
            Transaction::new(date(2025, 2), Money::from_cents(-3000)).with_category(groceries.id),
            Transaction::new(date(2025, 1), Money::from_cents(-2000)).with_category(rent.id),
            Transaction::new(date(2024, 12), Money::from_cents(-100)).with_category(rent.id),
        ];
        (txns, catalog)
    }

    fn category_month() -> FilterConfiguration {
        let mut config = FilterConfiguration::default();
        config.toggle_dimension(Dimension::Month).unwrap();
        config
    }

    #[test]
    fn test_nothing_hidden_is_identity() {
        let (txns, catalog) = fixture();
        let config = category_month();
        let groups = aggregate(&txns, &config, &catalog);
        assert_eq!(visible_groups(&groups, &config), groups);
    }

    #[test]
    fn test_hidden_outer_level_merges_children() {
        let (txns, catalog) = fixture();
        let mut config = category_month();
        let groups = aggregate(&txns, &config, &catalog);
        config.set_visible(Dimension::Category, false).unwrap();

        let visible = visible_groups(&groups, &config);
        let ids: Vec<&str> = visible.iter().map(|g| g.group_id.as_str()).collect();
        assert_eq!(ids, vec!["2024-12", "2025-01", "2025-02"]);

        let jan = &visible[1];
        assert_eq!(jan.total_withdrawals.cents(), 7000);
        assert_eq!(jan.transaction_count, 2);
        assert_eq!(jan.transactions.len(), 2);

        let (_, before, _) = totals(&groups);
        let (_, after, _) = totals(&visible);
        assert_eq!(before, after);
    }

    #[test]
    fn test_hidden_inner_level_turns_parent_into_leaf() {
        let (txns, catalog) = fixture();
        let mut config = category_month();
        let groups = aggregate(&txns, &config, &catalog);
        config.set_visible(Dimension::Month, false).unwrap();

        let visible = visible_groups(&groups, &config);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|g| g.is_leaf()));
        assert_eq!(visible[0].transactions.len(), 2);
        assert_eq!(visible[0].total_withdrawals.cents(), 8000);
    }

    #[test]
    fn test_hidden_middle_level_merges_grandchildren() {
        let groceries = Category::new("Groceries");
        let rent = Category::new("Rent");
        let checking = Account::new("Checking", AccountType::Checking);
        let visa = Account::new("Visa", AccountType::Credit);
        let catalog = Catalog::new(
            vec![groceries.clone(), rent.clone()],
            vec![checking.clone(), visa.clone()],
            Vec::new(),
        );
        let txn = |y, m, cents, category: &Category| {
            Transaction::new(NaiveDate::from_ymd_opt(y, m, 10).unwrap(), Money::from_cents(cents))
                .with_category(category.id)
        };
        let txns = vec![
            txn(2025, 1, -5000, &groceries).with_account(checking.id),
            txn(2025, 2, -3000, &groceries).with_account(checking.id),
            txn(2025, 2, -700, &groceries).with_account(visa.id),
            txn(2025, 1, 400, &groceries).with_account(visa.id),
            txn(2025, 1, -2000, &rent).with_account(checking.id),
            txn(2024, 12, -100, &rent),
        ];

        let mut config = category_month();
        config.toggle_dimension(Dimension::Account).unwrap();
        let groups = aggregate(&txns, &config, &catalog);
        config.set_visible(Dimension::Month, false).unwrap();

        let visible = visible_groups(&groups, &config);
        assert_eq!(visible.len(), 2);

        let grocery_accounts = &visible[0].subgroups;
        let names: Vec<&str> = grocery_accounts.iter().map(|g| g.group_name.as_str()).collect();
        assert_eq!(names, vec!["Checking", "Visa"]);
        assert!(grocery_accounts.iter().all(|g| g.groupby_kind == Some(Dimension::Account)));

        let grocery_checking = &grocery_accounts[0];
        assert_eq!(grocery_checking.total_withdrawals.cents(), 8000);
        assert_eq!(grocery_checking.transaction_count, 2);
        assert_eq!(grocery_checking.transactions.len(), 2);

        let grocery_visa = &grocery_accounts[1];
        assert_eq!(grocery_visa.total_withdrawals.cents(), 700);
        assert_eq!(grocery_visa.total_deposits.cents(), 400);
        assert_eq!(grocery_visa.total_balance.cents(), -300);
        assert_eq!(grocery_visa.transaction_count, 2);

        let rent_accounts: Vec<&str> = visible[1].subgroups.iter().map(|g| g.group_name.as_str()).collect();
        assert_eq!(rent_accounts, vec!["Checking", "No Account"]);

        for category in &visible {
            let count: usize = category.subgroups.iter().map(|g| g.transaction_count).sum();
            assert_eq!(count, category.transaction_count);
        }
        assert_eq!(totals(&groups), totals(&visible));
    }

    #[test]
    fn test_everything_hidden_collapses_to_one_node() {
        let (txns, catalog) = fixture();
        let mut config = FilterConfiguration::default();
        let groups = aggregate(&txns, &config, &catalog);
        config.set_visible(Dimension::Category, false).unwrap();

        let visible = visible_groups(&groups, &config);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].group_id, ALL_GROUP_ID);
        assert_eq!(visible[0].total_withdrawals.cents(), 10100);
        assert_eq!(visible[0].transactions.len(), 4);
    }
}
