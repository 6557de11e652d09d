//! Ledger snapshots
//!
//! The engine reads transactions and budgets through [`LedgerSource`] and
//! never writes back. [`Snapshot`] is the file-backed implementation: one
//! JSON document holding every record a query needs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::file_io::{read_json_required, write_json_atomic};
use crate::engine::Catalog;
use crate::error::SpendscopeResult;
use crate::models::{Account, Budget, Category, Transaction, TransactionSource};

/// Predicate applied by the storage layer before transactions reach the engine
pub type TransactionPredicate<'a> = &'a dyn Fn(&Transaction) -> bool;

/// Read-only query seam between storage and the engine
pub trait LedgerSource {
    /// Transactions, optionally narrowed by a predicate
    fn transactions(&self, filter: Option<TransactionPredicate<'_>>) -> SpendscopeResult<Vec<Transaction>>;

    /// Budgets visible to the current scope
    fn budgets_for_scope(&self) -> SpendscopeResult<Vec<Budget>>;

    /// Id -> name lookups for categories, accounts, and sources
    fn catalog(&self) -> SpendscopeResult<Catalog>;
}

/// In-memory ledger, loaded from a single JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub sources: Vec<TransactionSource>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Snapshot {
    /// Load a snapshot; the file must exist
    pub fn load(path: impl AsRef<Path>) -> SpendscopeResult<Self> {
        let path = path.as_ref();
        let snapshot: Snapshot = read_json_required(path)?;
        tracing::debug!(
            path = %path.display(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SpendscopeResult<()> {
        write_json_atomic(path, self)
    }
}

impl LedgerSource for Snapshot {
    fn transactions(&self, filter: Option<TransactionPredicate<'_>>) -> SpendscopeResult<Vec<Transaction>> {
        Ok(match filter {
            Some(keep) => self.transactions.iter().filter(|t| keep(t)).cloned().collect(),
            None => self.transactions.clone(),
        })
    }

    fn budgets_for_scope(&self) -> SpendscopeResult<Vec<Budget>> {
        Ok(self.budgets.iter().filter(|b| b.active).cloned().collect())
    }

    fn catalog(&self) -> SpendscopeResult<Catalog> {
        Ok(Catalog::new(
            self.categories.iter().cloned(),
            self.accounts.iter().cloned(),
            self.sources.iter().cloned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn snapshot() -> Snapshot {
        let groceries = Category::new("Groceries");
        let mut retired = Budget::new("Retired");
        retired.active = false;
        Snapshot {
            transactions: vec![
                Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), Money::from_cents(-100))
                    .with_category(groceries.id),
                Transaction::new(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(), Money::from_cents(200)),
            ],
            categories: vec![groceries],
            budgets: vec![Budget::new("Household"), retired],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_transactions_predicate() {
        let snapshot = snapshot();
        assert_eq!(snapshot.transactions(None).unwrap().len(), 2);

        let deposits = snapshot
            .transactions(Some(&|t: &Transaction| t.is_deposit()))
            .unwrap();
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].amount.cents(), 200);
    }

    #[test]
    fn test_inactive_budgets_are_out_of_scope() {
        let budgets = snapshot().budgets_for_scope().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].name, "Household");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        let snapshot = snapshot();

        snapshot.save(&path).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_sparse_document() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"transactions":[{"id":"00000000-0000-0000-0000-000000000001","amount":-500,"date":"2025-03-01"}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(snapshot.transactions[0].category_id.is_none());
        assert!(snapshot.catalog().unwrap().categories().next().is_none());
    }
}
