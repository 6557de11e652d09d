//! Name lookups used while bucketing
//!
//! Transactions only carry ids. The catalog resolves those ids to display
//! names and maps categories to the budget entry that owns them.

use std::collections::HashMap;

use crate::models::{
    Account, AccountId, Budget, BudgetEntryId, Category, CategoryId, TransactionSource,
    TransactionSourceId,
};

/// Budget entry that owns a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub id: BudgetEntryId,
    pub name: String,
}

/// Read-only id -> record lookups for one aggregation call
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: HashMap<CategoryId, Category>,
    accounts: HashMap<AccountId, Account>,
    sources: HashMap<TransactionSourceId, TransactionSource>,
    entries_by_category: HashMap<CategoryId, EntryRef>,
    budget_entries: Vec<EntryRef>,
}

impl Catalog {
    pub fn new(
        categories: impl IntoIterator<Item = Category>,
        accounts: impl IntoIterator<Item = Account>,
        sources: impl IntoIterator<Item = TransactionSource>,
    ) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
            sources: sources.into_iter().map(|s| (s.id, s)).collect(),
            entries_by_category: HashMap::new(),
            budget_entries: Vec::new(),
        }
    }

    /// Attach the budget used by the budget dimension
    pub fn with_budget(mut self, budget: &Budget) -> Self {
        self.entries_by_category = budget
            .entry_by_category()
            .into_iter()
            .map(|(category_id, entry)| {
                (
                    category_id,
                    EntryRef {
                        id: entry.id,
                        name: entry.name.clone(),
                    },
                )
            })
            .collect();
        self.budget_entries = budget
            .entries
            .iter()
            .map(|e| EntryRef {
                id: e.id,
                name: e.name.clone(),
            })
            .collect();
        self
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    pub fn source(&self, id: TransactionSourceId) -> Option<&TransactionSource> {
        self.sources.get(&id)
    }

    /// Budget entry owning a category, if any
    pub fn entry_for_category(&self, id: CategoryId) -> Option<&EntryRef> {
        self.entries_by_category.get(&id)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn sources(&self) -> impl Iterator<Item = &TransactionSource> {
        self.sources.values()
    }

    /// Entries of the attached budget, in budget order
    pub fn budget_entries(&self) -> &[EntryRef] {
        &self.budget_entries
    }

    /// Whether a source exists and is archived
    pub fn is_archived_source(&self, id: TransactionSourceId) -> bool {
        self.sources.get(&id).is_some_and(|s| s.archived)
    }

    /// "<category> (<source>)", or the bare name for categories without a
    /// known source
    pub fn stylized_category_name(&self, id: CategoryId) -> Option<String> {
        let category = self.categories.get(&id)?;
        match category.source_id.and_then(|s| self.sources.get(&s)) {
            Some(source) => Some(format!("{} ({})", category.name, source.name)),
            None => Some(category.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetEntry, Money};

    #[test]
    fn test_stylized_name() {
        let source = TransactionSource::new("Chase");
        let groceries = Category::for_source("Groceries", source.id);
        let loose = Category::new("Misc");
        let catalog = Catalog::new(
            vec![groceries.clone(), loose.clone()],
            Vec::new(),
            vec![source],
        );

        assert_eq!(
            catalog.stylized_category_name(groceries.id).as_deref(),
            Some("Groceries (Chase)")
        );
        assert_eq!(catalog.stylized_category_name(loose.id).as_deref(), Some("Misc"));
        assert!(catalog.stylized_category_name(CategoryId::new()).is_none());
    }

    #[test]
    fn test_budget_lookup() {
        let groceries = Category::new("Groceries");
        let entry = BudgetEntry::new("Food", Money::from_cents(100)).with_link(groceries.id, "Groceries");
        let entry_id = entry.id;
        let budget = Budget::new("Budget").with_entry(entry);

        let catalog = Catalog::new(vec![groceries.clone()], Vec::new(), Vec::new()).with_budget(&budget);
        assert_eq!(catalog.entry_for_category(groceries.id).map(|e| e.id), Some(entry_id));
        assert_eq!(catalog.budget_entries().len(), 1);
        assert!(catalog.entry_for_category(CategoryId::new()).is_none());
    }
}
