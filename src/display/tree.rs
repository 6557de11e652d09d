//! Aggregation tree rendering

use super::format::{format_money, separator};
use super::visibility::visible_groups;
use crate::engine::{AggregatedNode, FilterConfiguration};
use crate::services::AggregatedTransactions;

/// Render an aggregation result as an indented tree per source, with hidden
/// dimensions removed.
pub fn format_aggregation_tree(
    result: &AggregatedTransactions,
    config: &FilterConfiguration,
    symbol: &str,
) -> String {
    if result.is_empty() {
        return "No transactions match the current filters.\n".to_string();
    }

    let mut output = String::new();
    let ordering: Vec<&str> = result.group_by_ordering.iter().map(|d| d.as_str()).collect();
    output.push_str(&format!("Grouped by: {}\n\n", ordering.join(" > ")));

    for source in &result.sources {
        output.push_str(&format!("{}\n", source.transaction_source_name));
        let groups = visible_groups(&source.groups, config);
        for (i, node) in groups.iter().enumerate() {
            write_node(&mut output, node, "", i + 1 == groups.len(), symbol);
        }
        output.push('\n');
    }

    output.push_str(&format!("{}\n", separator(48)));
    output.push_str(&format!(
        "Deposits: {}  Withdrawals: {}  Balance: {}\n",
        format_money(result.overall_deposits, symbol),
        format_money(result.overall_withdrawals, symbol),
        format_money(result.overall_balance, symbol),
    ));

    output
}

fn write_node(output: &mut String, node: &AggregatedNode, indent: &str, is_last: bool, symbol: &str) {
    let branch = if is_last { "└── " } else { "├── " };

    let mut line = format!(
        "{}{}{}  out {}  in {}  ({} txn{})",
        indent,
        branch,
        node.group_name,
        format_money(node.total_withdrawals, symbol),
        format_money(node.total_deposits, symbol),
        node.transaction_count,
        if node.transaction_count == 1 { "" } else { "s" },
    );
    if let Some(target) = node.budgeted_total {
        line.push_str(&format!("  target {}", format_money(target, symbol)));
    }
    output.push_str(&line);
    output.push('\n');

    let child_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
    for (i, child) in node.subgroups.iter().enumerate() {
        write_node(output, child, &child_indent, i + 1 == node.subgroups.len(), symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{aggregate_sources, totals, Catalog, Dimension, GroupingChoices};
    use crate::models::{Category, Money, Transaction};
    use chrono::NaiveDate;

    fn result(config: &FilterConfiguration) -> AggregatedTransactions {
        let groceries = Category::new("Groceries");
        let catalog = Catalog::new(vec![groceries.clone()], Vec::new(), Vec::new());
        let txns = vec![
            Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(), Money::from_cents(-2500))
                .with_category(groceries.id),
            Transaction::new(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(), Money::from_cents(-1000))
                .with_category(groceries.id),
        ];
        let sources = aggregate_sources(&txns, config, &catalog);
        let (overall_deposits, overall_withdrawals, overall_balance) = totals(&sources[0].groups);
        AggregatedTransactions {
            sources,
            overall_deposits,
            overall_withdrawals,
            overall_balance,
            group_by_ordering: config.ordered_dimensions(),
            grouping_choices: GroupingChoices::default(),
        }
    }

    #[test]
    fn test_tree_lines() {
        let mut config = FilterConfiguration::default();
        config.toggle_dimension(Dimension::Month).unwrap();

        let text = format_aggregation_tree(&result(&config), &config, "$");
        assert!(text.contains("Grouped by: category > month"));
        assert!(text.contains("└── Groceries  out $35.00  in $0.00  (2 txns)"));
        assert!(text.contains("    ├── January 2025  out $25.00"));
        assert!(text.contains("    └── February 2025  out $10.00"));
        assert!(text.contains("Balance: -$35.00"));
    }

    #[test]
    fn test_hidden_dimension_is_not_rendered() {
        let mut config = FilterConfiguration::default();
        config.toggle_dimension(Dimension::Month).unwrap();
        let result = result(&config);
        config.set_visible(Dimension::Month, false).unwrap();

        let text = format_aggregation_tree(&result, &config, "$");
        assert!(text.contains("Groceries"));
        assert!(!text.contains("January 2025"));
    }

    #[test]
    fn test_empty_result() {
        let empty = AggregatedTransactions {
            sources: Vec::new(),
            overall_deposits: Money::zero(),
            overall_withdrawals: Money::zero(),
            overall_balance: Money::zero(),
            group_by_ordering: vec![Dimension::Category],
            grouping_choices: GroupingChoices::default(),
        };
        let text = format_aggregation_tree(&empty, &FilterConfiguration::default(), "$");
        assert!(text.starts_with("No transactions"));
    }
}
