//! Grouping choices
//!
//! For each dimension, the values a user can pick as filter specifics. The
//! UI offers these as checkboxes, and the filter model uses them to refuse
//! values that no bucket could ever match.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::catalog::Catalog;
use super::dimension::{BucketKey, Dimension, UNASSIGNED_ID, UNASSIGNED_LABEL};
use crate::models::Transaction;

/// One selectable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

impl From<BucketKey> for ChoiceOption {
    fn from(key: BucketKey) -> Self {
        Self {
            id: key.id,
            label: key.label,
        }
    }
}

/// Selectable values per dimension, each list in bucket order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingChoices {
    options: BTreeMap<Dimension, Vec<ChoiceOption>>,
}

impl GroupingChoices {
    /// Replace the options of a dimension
    pub fn insert(&mut self, dimension: Dimension, options: Vec<ChoiceOption>) {
        self.options.insert(dimension, options);
    }

    pub fn options(&self, dimension: Dimension) -> &[ChoiceOption] {
        self.options
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, dimension: Dimension, id: &str) -> bool {
        self.options(dimension).iter().any(|o| o.id == id)
    }

    /// Resolve a user-typed value (id or exact label) to a bucket id
    pub fn resolve(&self, dimension: Dimension, value: &str) -> Option<&str> {
        let options = self.options(dimension);
        options
            .iter()
            .find(|o| o.id == value)
            .or_else(|| options.iter().find(|o| o.label == value))
            .map(|o| o.id.as_str())
    }
}

/// Collect the selectable values for every dimension.
///
/// Catalog records on archived sources are left out; anything a transaction
/// actually buckets into is always included.
pub fn grouping_choices(catalog: &Catalog, transactions: &[Transaction]) -> GroupingChoices {
    let mut choices = GroupingChoices::default();

    for dimension in Dimension::ALL {
        let mut keys: Vec<BucketKey> = match dimension {
            Dimension::Category => catalog
                .categories()
                .filter(|c| !c.archived)
                .filter(|c| !c.source_id.is_some_and(|s| catalog.is_archived_source(s)))
                .map(|c| BucketKey::new(c.id.key(), c.name.clone()))
                .collect(),
            Dimension::Account => catalog
                .accounts()
                .map(|a| BucketKey::new(a.id.key(), a.name.clone()))
                .collect(),
            Dimension::Budget => {
                let mut keys: Vec<BucketKey> = catalog
                    .budget_entries()
                    .iter()
                    .map(|e| BucketKey::new(e.id.key(), e.name.clone()))
                    .collect();
                keys.push(BucketKey::new(UNASSIGNED_ID, UNASSIGNED_LABEL));
                keys
            }
            Dimension::Month | Dimension::Year => Vec::new(),
        };

        keys.extend(transactions.iter().map(|t| dimension.bucket_key(t, catalog)));
        keys.sort_by(|a, b| dimension.compare(a, b));

        let mut seen = HashSet::new();
        keys.retain(|k| seen.insert(k.id.clone()));

        choices.insert(dimension, keys.into_iter().map(ChoiceOption::from).collect());
    }

    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dimension::UNCATEGORIZED_ID;
    use crate::models::{Budget, BudgetEntry, Category, Money, TransactionSource};
    use chrono::NaiveDate;

    #[test]
    fn test_choices() {
        let live = TransactionSource::new("Chase");
        let mut old = TransactionSource::new("Old Bank");
        old.archived = true;
        let groceries = Category::for_source("Groceries", live.id);
        let stale = Category::for_source("Stale", old.id);
        let budget = Budget::new("Budget").with_entry(
            BudgetEntry::new("Food", Money::from_cents(100)).with_link(groceries.id, "Groceries"),
        );
        let catalog = Catalog::new(
            vec![groceries.clone(), stale.clone()],
            Vec::new(),
            vec![live, old],
        )
        .with_budget(&budget);

        let txns = vec![
            Transaction::new(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(), Money::from_cents(-1))
                .with_category(groceries.id),
            Transaction::new(NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(), Money::from_cents(-1)),
        ];

        let choices = grouping_choices(&catalog, &txns);

        let categories: Vec<&str> = choices
            .options(Dimension::Category)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(categories, vec!["Groceries", "Uncategorized"]);
        assert!(choices.contains(Dimension::Category, UNCATEGORIZED_ID));
        assert!(!choices.contains(Dimension::Category, &stale.id.key()));

        let months: Vec<&str> = choices
            .options(Dimension::Month)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(months, vec!["2024-12", "2025-02"]);

        let years: Vec<&str> = choices
            .options(Dimension::Year)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(years, vec!["2024", "2025"]);

        let budgets: Vec<&str> = choices
            .options(Dimension::Budget)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(budgets, vec!["Food", "Unbudgeted"]);
    }

    #[test]
    fn test_resolve_by_label() {
        let mut choices = GroupingChoices::default();
        choices.insert(
            Dimension::Month,
            vec![ChoiceOption::new("2025-01", "January 2025")],
        );
        assert_eq!(choices.resolve(Dimension::Month, "January 2025"), Some("2025-01"));
        assert_eq!(choices.resolve(Dimension::Month, "2025-01"), Some("2025-01"));
        assert_eq!(choices.resolve(Dimension::Month, "2025-02"), None);
    }
}
