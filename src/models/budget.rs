//! Budget definitions
//!
//! A budget is a set of entries; each entry has a monthly target and links
//! one or more categories whose spending counts against it. A category may
//! be linked to at most one entry of a budget.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::ids::{BudgetCategoryLinkId, BudgetEntryId, BudgetId, CategoryId};
use super::money::Money;
use crate::error::{SpendscopeError, SpendscopeResult};

/// Link from a budget entry to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategoryLink {
    pub id: BudgetCategoryLinkId,
    pub category_id: CategoryId,

    /// Display label, conventionally "<category> (<source>)"
    #[serde(default)]
    pub stylized_name: String,
}

impl BudgetCategoryLink {
    pub fn new(category_id: CategoryId, stylized_name: impl Into<String>) -> Self {
        Self {
            id: BudgetCategoryLinkId::new(),
            category_id,
            stylized_name: stylized_name.into(),
        }
    }
}

/// One line of a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: BudgetEntryId,
    pub name: String,

    /// Monthly target
    pub target_amount: Money,

    #[serde(default)]
    pub category_links: Vec<BudgetCategoryLink>,
}

impl BudgetEntry {
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: BudgetEntryId::new(),
            name: name.into(),
            target_amount,
            category_links: Vec::new(),
        }
    }

    /// Link a category to this entry
    pub fn with_link(mut self, category_id: CategoryId, stylized_name: impl Into<String>) -> Self {
        self.category_links
            .push(BudgetCategoryLink::new(category_id, stylized_name));
        self
    }

    /// Ids of all linked categories
    pub fn category_ids(&self) -> HashSet<CategoryId> {
        self.category_links.iter().map(|l| l.category_id).collect()
    }

    /// Whether the entry tracks anything yet
    pub fn has_links(&self) -> bool {
        !self.category_links.is_empty()
    }
}

impl fmt::Display for BudgetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/month)", self.name, self.target_amount)
    }
}

/// A user's budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    pub entries: Vec<BudgetEntry>,
}

fn default_active() -> bool {
    true
}

impl Budget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            active: true,
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: BudgetEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entry(&self, id: BudgetEntryId) -> Option<&BudgetEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Category -> owning entry. When a category is (invalidly) linked twice,
    /// the entry listed first wins.
    pub fn entry_by_category(&self) -> HashMap<CategoryId, &BudgetEntry> {
        let mut lookup = HashMap::new();
        for entry in &self.entries {
            for link in &entry.category_links {
                lookup.entry(link.category_id).or_insert(entry);
            }
        }
        lookup
    }

    /// Self-contained checks: names, targets, and exclusive category links
    pub fn validate(&self) -> SpendscopeResult<()> {
        let mut owners: BTreeMap<CategoryId, Vec<&BudgetEntry>> = BTreeMap::new();

        for entry in &self.entries {
            if entry.name.trim().is_empty() {
                return Err(SpendscopeError::Validation(
                    "Budget entry name cannot be empty".into(),
                ));
            }
            if entry.target_amount.is_negative() {
                return Err(SpendscopeError::Validation(format!(
                    "Budget entry '{}' has a negative target ({})",
                    entry.name, entry.target_amount
                )));
            }
            // A category repeated within one entry is harmless; dedupe it
            for category_id in entry.category_ids() {
                owners.entry(category_id).or_default().push(entry);
            }
        }

        if let Some((category_id, entries)) = owners.into_iter().find(|(_, e)| e.len() > 1) {
            let category = entries
                .first()
                .and_then(|e| e.category_links.iter().find(|l| l.category_id == category_id))
                .map(|l| l.stylized_name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| category_id.key());
            return Err(SpendscopeError::AmbiguousBudgetLink {
                category,
                entries: entries.iter().map(|e| e.name.clone()).collect(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_by_category() {
        let groceries = CategoryId::new();
        let rent = CategoryId::new();
        let food = BudgetEntry::new("Food", Money::from_cents(40000))
            .with_link(groceries, "Groceries (Checking)");
        let housing = BudgetEntry::new("Housing", Money::from_cents(150000))
            .with_link(rent, "Rent (Checking)");
        let budget = Budget::new("Budget").with_entry(food).with_entry(housing);

        let lookup = budget.entry_by_category();
        assert_eq!(lookup[&groceries].name, "Food");
        assert_eq!(lookup[&rent].name, "Housing");
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_ambiguous_link_rejected() {
        let groceries = CategoryId::new();
        let budget = Budget::new("Budget")
            .with_entry(
                BudgetEntry::new("Food", Money::from_cents(100))
                    .with_link(groceries, "Groceries (Checking)"),
            )
            .with_entry(
                BudgetEntry::new("Household", Money::from_cents(100))
                    .with_link(groceries, "Groceries (Checking)"),
            );

        match budget.validate() {
            Err(SpendscopeError::AmbiguousBudgetLink { category, entries }) => {
                assert_eq!(category, "Groceries (Checking)");
                assert_eq!(entries, vec!["Food".to_string(), "Household".to_string()]);
            }
            other => panic!("expected ambiguous link error, got {:?}", other),
        }

        // First entry wins in the lookup
        assert_eq!(budget.entry_by_category()[&groceries].name, "Food");
    }

    #[test]
    fn test_same_category_twice_in_one_entry_is_fine() {
        let groceries = CategoryId::new();
        let budget = Budget::new("Budget").with_entry(
            BudgetEntry::new("Food", Money::from_cents(100))
                .with_link(groceries, "Groceries")
                .with_link(groceries, "Groceries"),
        );
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_negative_target_rejected() {
        let budget =
            Budget::new("Budget").with_entry(BudgetEntry::new("Fun", Money::from_cents(-1)));
        assert!(budget.validate().unwrap_err().is_validation());
    }
}
