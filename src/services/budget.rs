//! Budget service
//!
//! Budget lookup, edit-time validation, and the reconciliation entry point.

use crate::engine::{reconcile, unbudgeted_transactions, BudgetStatus, Catalog};
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::models::{Budget, BudgetId, DateWindow, Transaction};
use crate::storage::LedgerSource;

/// Service for budget queries
pub struct BudgetService<'a> {
    ledger: &'a dyn LedgerSource,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(ledger: &'a dyn LedgerSource) -> Self {
        Self { ledger }
    }

    /// Budgets in scope
    pub fn list(&self) -> SpendscopeResult<Vec<Budget>> {
        self.ledger.budgets_for_scope()
    }

    /// Find a budget by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> SpendscopeResult<Option<Budget>> {
        let budgets = self.list()?;

        if let Some(budget) = budgets
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(identifier.trim()))
        {
            return Ok(Some(budget.clone()));
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return Ok(budgets.into_iter().find(|b| b.id == id));
        }

        Ok(None)
    }

    /// The named budget, or the first one in scope when no name is given
    pub fn resolve(&self, selector: Option<&str>) -> SpendscopeResult<Option<Budget>> {
        match selector {
            Some(identifier) => self
                .find(identifier)?
                .map(Some)
                .ok_or_else(|| SpendscopeError::budget_not_found(identifier)),
            None => Ok(self.list()?.into_iter().next()),
        }
    }

    /// Edit-time checks: exclusive category links, names, targets, and
    /// links that point at categories the catalog knows.
    pub fn validate(budget: &Budget, catalog: &Catalog) -> SpendscopeResult<()> {
        budget.validate()?;

        for entry in &budget.entries {
            for link in &entry.category_links {
                if catalog.category(link.category_id).is_none() {
                    let identifier = if link.stylized_name.is_empty() {
                        link.category_id.key()
                    } else {
                        link.stylized_name.clone()
                    };
                    return Err(SpendscopeError::category_not_found(identifier));
                }
            }
        }

        Ok(())
    }

    /// Validate the selected budget against the ledger's catalog
    pub fn check(&self, selector: Option<&str>) -> SpendscopeResult<Budget> {
        let budget = self.require(selector)?;
        Self::validate(&budget, &self.ledger.catalog()?)?;
        Ok(budget)
    }

    /// Reconcile the selected budget over `window`
    pub fn status(&self, selector: Option<&str>, window: &DateWindow) -> SpendscopeResult<BudgetStatus> {
        let mut budget = self.require(selector)?;
        let catalog = self.ledger.catalog()?;
        refresh_link_names(&mut budget, &catalog);

        let transactions = self.ledger.transactions(Some(&|t: &Transaction| window.contains(t.date)))?;
        let status = reconcile(&budget, &transactions, window);

        tracing::info!(
            budget = %status.name,
            entries = status.entries.len(),
            months = status.months_with_entries.len(),
            spent = %status.total_spent(),
            "budget status computed"
        );

        Ok(status)
    }

    /// Withdrawals in `window` that the selected budget does not account for
    pub fn unbudgeted(&self, selector: Option<&str>, window: &DateWindow) -> SpendscopeResult<Vec<Transaction>> {
        let budget = self.require(selector)?;
        let transactions = self.ledger.transactions(None)?;
        Ok(unbudgeted_transactions(&budget, &transactions, window)
            .into_iter()
            .cloned()
            .collect())
    }

    fn require(&self, selector: Option<&str>) -> SpendscopeResult<Budget> {
        self.resolve(selector)?
            .ok_or_else(|| SpendscopeError::Budget("No budget defined in the ledger".into()))
    }
}

/// Rebuild each link's display name from current category and source names
fn refresh_link_names(budget: &mut Budget, catalog: &Catalog) {
    for entry in &mut budget.entries {
        for link in &mut entry.category_links {
            if let Some(name) = catalog.stylized_category_name(link.category_id) {
                link.stylized_name = name;
            }
        }
    }
}
