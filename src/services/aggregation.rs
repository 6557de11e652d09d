//! Aggregation service
//!
//! The full query pipeline: read the ledger, drop out-of-window and archived
//! transactions, aggregate per source, attach budget targets, and wrap the
//! result with overall totals and the grouping choices.

use serde::{Deserialize, Serialize};

use super::budget::BudgetService;
use crate::config::Settings;
use crate::engine::{
    aggregate_sources, apply_budget_targets, grouping_choices, totals, Catalog, Dimension,
    FilterConfiguration, GroupingChoices, TransactionSourceGroup,
};
use crate::error::SpendscopeResult;
use crate::models::{Budget, DateWindow, Money, Transaction};
use crate::storage::LedgerSource;

/// Aggregation result as handed to presentation or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedTransactions {
    pub sources: Vec<TransactionSourceGroup>,
    pub overall_deposits: Money,
    pub overall_withdrawals: Money,
    pub overall_balance: Money,

    /// Nesting order the tree was built with, outermost first
    pub group_by_ordering: Vec<Dimension>,

    pub grouping_choices: GroupingChoices,
}

impl AggregatedTransactions {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Service running aggregation queries against a ledger
pub struct AggregationService<'a> {
    ledger: &'a dyn LedgerSource,
    settings: &'a Settings,
}

impl<'a> AggregationService<'a> {
    pub fn new(ledger: &'a dyn LedgerSource, settings: &'a Settings) -> Self {
        Self { ledger, settings }
    }

    /// Catalog with the selected budget attached, if there is one
    pub fn catalog(&self, budget: Option<&Budget>) -> SpendscopeResult<Catalog> {
        let catalog = self.ledger.catalog()?;
        Ok(match budget {
            Some(budget) => catalog.with_budget(budget),
            None => catalog,
        })
    }

    /// Transactions inside `window`, without archived sources unless the
    /// settings ask for them
    pub fn transactions(&self, window: &DateWindow, catalog: &Catalog) -> SpendscopeResult<Vec<Transaction>> {
        let include_archived = self.settings.include_archived_sources;
        let keep = |t: &Transaction| {
            window.contains(t.date)
                && (include_archived || !t.source_id.is_some_and(|s| catalog.is_archived_source(s)))
        };
        self.ledger.transactions(Some(&keep))
    }

    /// Run a full aggregation query.
    ///
    /// `budget` selects the budget used by the budget dimension and for
    /// targets; `None` picks the first budget in scope.
    pub fn aggregate(
        &self,
        config: &FilterConfiguration,
        window: &DateWindow,
        budget: Option<&str>,
    ) -> SpendscopeResult<AggregatedTransactions> {
        let budget = BudgetService::new(self.ledger).resolve(budget)?;
        let catalog = self.catalog(budget.as_ref())?;
        let transactions = self.transactions(window, &catalog)?;

        let choices = grouping_choices(&catalog, &transactions);
        let mut sources = aggregate_sources(&transactions, config, &catalog);
        if let Some(budget) = &budget {
            for source in &mut sources {
                apply_budget_targets(&mut source.groups, budget);
            }
        }

        let (overall_deposits, overall_withdrawals, overall_balance) = sources
            .iter()
            .map(|s| totals(&s.groups))
            .fold((Money::zero(), Money::zero(), Money::zero()), |acc, t| {
                (acc.0 + t.0, acc.1 + t.1, acc.2 + t.2)
            });

        let group_by_ordering = config.ordered_dimensions();

        tracing::info!(
            transactions = transactions.len(),
            sources = sources.len(),
            ordering = ?group_by_ordering,
            withdrawals = %overall_withdrawals,
            "aggregation complete"
        );

        Ok(AggregatedTransactions {
            sources,
            overall_deposits,
            overall_withdrawals,
            overall_balance,
            group_by_ordering,
            grouping_choices: choices,
        })
    }

    /// Grouping choices over every transaction in `window`
    pub fn choices(&self, window: &DateWindow, budget: Option<&str>) -> SpendscopeResult<GroupingChoices> {
        let budget = BudgetService::new(self.ledger).resolve(budget)?;
        let catalog = self.catalog(budget.as_ref())?;
        let transactions = self.transactions(window, &catalog)?;
        Ok(grouping_choices(&catalog, &transactions))
    }
}
