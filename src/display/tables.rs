//! Tabular views: budget status, filter configuration, grouping choices

use tabled::{settings::Style, Table, Tabled};

use super::format::{format_money, truncate};
use crate::engine::{BudgetStatus, Dimension, FilterConfiguration, GroupingChoices};

const MAX_LABEL: usize = 40;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "")]
    flag: &'static str,
}

#[derive(Tabled)]
struct FilterRow {
    #[tabled(rename = "#")]
    index: u32,
    #[tabled(rename = "Dimension")]
    dimension: Dimension,
    #[tabled(rename = "Visible")]
    visible: &'static str,
    #[tabled(rename = "Values")]
    values: String,
}

#[derive(Tabled)]
struct ChoiceRow {
    #[tabled(rename = "Dimension")]
    dimension: Dimension,
    #[tabled(rename = "Value")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
}

/// Render a budget status, one row per entry and month with spend
pub fn format_budget_status(status: &BudgetStatus, symbol: &str) -> String {
    if status.entries.is_empty() {
        return format!("Budget '{}' has no entries.\n", status.name);
    }

    let mut rows = Vec::new();
    for entry in &status.entries {
        if entry.category_links_status.is_empty() {
            rows.push(BudgetRow {
                entry: truncate(&entry.name, MAX_LABEL),
                month: "-".into(),
                target: format_money(entry.amount, symbol),
                spent: format_money(entry.total, symbol),
                remaining: format_money(entry.amount, symbol),
                flag: "",
            });
            continue;
        }
        for month in entry.months() {
            rows.push(BudgetRow {
                entry: truncate(&entry.name, MAX_LABEL),
                month: month.label(),
                target: format_money(entry.amount, symbol),
                spent: format_money(entry.month_total(month), symbol),
                remaining: format_money(entry.remaining_for(month), symbol),
                flag: if entry.is_over_target(month) { "OVER" } else { "" },
            });
        }
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!(
        "Budget: {}\n{}\nTotal spent: {}\n",
        status.name,
        table,
        format_money(status.total_spent(), symbol)
    )
}

/// Render the active dimensions in nesting order
pub fn format_filters(config: &FilterConfiguration) -> String {
    let rows: Vec<FilterRow> = config
        .ordered_dimensions()
        .into_iter()
        .filter_map(|dimension| {
            let entry = config.entry(dimension)?;
            let values = if entry.include_all {
                "all".to_string()
            } else if entry.specifics.is_empty() {
                "(none)".to_string()
            } else {
                entry.specifics.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            Some(FilterRow {
                index: entry.index,
                dimension,
                visible: if entry.visible { "yes" } else { "no" },
                values,
            })
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Render the selectable filter values, optionally for one dimension
pub fn format_choices(choices: &GroupingChoices, only: Option<Dimension>) -> String {
    let rows: Vec<ChoiceRow> = Dimension::ALL
        .into_iter()
        .filter(|d| only.map_or(true, |o| o == *d))
        .flat_map(|dimension| {
            choices.options(dimension).iter().map(move |option| ChoiceRow {
                dimension,
                id: option.id.clone(),
                label: truncate(&option.label, MAX_LABEL),
            })
        })
        .collect();

    if rows.is_empty() {
        return "No values to choose from.\n".to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
