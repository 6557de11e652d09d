//! CSV export
//!
//! One row per tree node (aggregation) or per linked category and month
//! (budget status), for spreadsheets.

use serde::Serialize;
use std::io::Write;

use crate::engine::{AggregatedNode, BudgetStatus};
use crate::error::SpendscopeResult;
use crate::services::AggregatedTransactions;

/// Separator between group names in the `path` column
pub const PATH_SEPARATOR: &str = " / ";

#[derive(Debug, Serialize)]
struct NodeRow<'a> {
    source: &'a str,
    path: String,
    dimensions: String,
    depth: usize,
    deposits: String,
    withdrawals: String,
    balance: String,
    transactions: usize,
    budgeted: Option<String>,
}

#[derive(Debug, Serialize)]
struct BudgetRow<'a> {
    budget: &'a str,
    entry: &'a str,
    month: String,
    category: &'a str,
    target: String,
    spent: String,
    transactions: usize,
}

/// Export every node of an aggregation, depth first
pub fn export_aggregation_csv<W: Write>(result: &AggregatedTransactions, writer: W) -> SpendscopeResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    for source in &result.sources {
        let mut stack: Vec<(Vec<&AggregatedNode>, &AggregatedNode)> =
            source.groups.iter().rev().map(|n| (Vec::new(), n)).collect();

        while let Some((ancestors, node)) = stack.pop() {
            let mut lineage = ancestors.clone();
            lineage.push(node);

            csv.serialize(NodeRow {
                source: &source.transaction_source_name,
                path: lineage
                    .iter()
                    .map(|n| n.group_name.as_str())
                    .collect::<Vec<_>>()
                    .join(PATH_SEPARATOR),
                dimensions: lineage
                    .iter()
                    .map(|n| n.groupby_kind.map_or("all", |d| d.as_str()))
                    .collect::<Vec<_>>()
                    .join(PATH_SEPARATOR),
                depth: ancestors.len(),
                deposits: node.total_deposits.to_decimal_string(),
                withdrawals: node.total_withdrawals.to_decimal_string(),
                balance: node.total_balance.to_decimal_string(),
                transactions: node.transaction_count,
                budgeted: node.budgeted_total.map(|m| m.to_decimal_string()),
            })?;

            for child in node.subgroups.iter().rev() {
                stack.push((lineage.clone(), child));
            }
        }
    }

    csv.flush()?;
    Ok(())
}

/// Export a budget status, one row per entry, month, and linked category.
/// Entries without spend get a single row with an empty month.
pub fn export_budget_csv<W: Write>(status: &BudgetStatus, writer: W) -> SpendscopeResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);

    for entry in &status.entries {
        if entry.category_links_status.is_empty() {
            csv.serialize(BudgetRow {
                budget: &status.name,
                entry: &entry.name,
                month: String::new(),
                category: "",
                target: entry.amount.to_decimal_string(),
                spent: entry.total.to_decimal_string(),
                transactions: 0,
            })?;
            continue;
        }

        for (month, links) in &entry.category_links_status {
            for link in links {
                csv.serialize(BudgetRow {
                    budget: &status.name,
                    entry: &entry.name,
                    month: month.key(),
                    category: &link.stylized_name,
                    target: entry.amount.to_decimal_string(),
                    spent: link.total.to_decimal_string(),
                    transactions: link.transactions.len(),
                })?;
            }
        }
    }

    csv.flush()?;
    Ok(())
}
