//! Budget reconciliation
//!
//! Compares each budget entry's monthly target against the withdrawals of its
//! linked categories, bucketed by calendar month. Statuses are derived on
//! every call and never stored.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::models::{
    Budget, BudgetCategoryLinkId, BudgetEntry, BudgetEntryId, BudgetId, CategoryId, DateWindow,
    Money, Month, Transaction,
};

/// Spend of one linked category within one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLinkStatus {
    pub link_id: BudgetCategoryLinkId,
    pub category_id: CategoryId,
    pub stylized_name: String,

    /// Withdrawal magnitude
    pub total: Money,

    pub transactions: Vec<Transaction>,
}

/// Target versus actual spend of one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntryStatus {
    pub entry_id: BudgetEntryId,
    pub name: String,

    /// Monthly target, as stored
    pub amount: Money,

    /// Spend across the whole window
    pub total: Money,

    pub category_links_status: BTreeMap<Month, Vec<CategoryLinkStatus>>,
}

impl BudgetEntryStatus {
    /// Spend of every linked category in `month`
    pub fn month_total(&self, month: Month) -> Money {
        self.category_links_status
            .get(&month)
            .map(|links| links.iter().map(|l| l.total).sum())
            .unwrap_or_default()
    }

    /// Target minus spend for `month`; negative when overspent
    pub fn remaining_for(&self, month: Month) -> Money {
        self.amount - self.month_total(month)
    }

    pub fn is_over_target(&self, month: Month) -> bool {
        self.month_total(month) > self.amount
    }

    /// Months with any spend, ascending
    pub fn months(&self) -> impl Iterator<Item = Month> + '_ {
        self.category_links_status.keys().copied()
    }
}

/// Reconciliation of a whole budget over a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget_id: BudgetId,
    pub name: String,
    pub entries: Vec<BudgetEntryStatus>,

    /// Every month in which at least one entry had spend, ascending
    pub months_with_entries: Vec<Month>,
}

impl BudgetStatus {
    pub fn entry(&self, id: BudgetEntryId) -> Option<&BudgetEntryStatus> {
        self.entries.iter().find(|e| e.entry_id == id)
    }

    /// Sum of every entry's spend
    pub fn total_spent(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }
}

/// Reconcile `budget` against the withdrawals of `transactions` inside
/// `window`.
///
/// Category links are assumed exclusive; if a category is linked twice
/// anyway, only the first owning entry counts its transactions.
pub fn reconcile(budget: &Budget, transactions: &[Transaction], window: &DateWindow) -> BudgetStatus {
    let owners = budget.entry_by_category();

    let mut by_category: HashMap<CategoryId, Vec<&Transaction>> = HashMap::new();
    for txn in transactions {
        if !txn.is_withdrawal() || !window.contains(txn.date) {
            continue;
        }
        if let Some(category_id) = txn.category_id {
            if owners.contains_key(&category_id) {
                by_category.entry(category_id).or_default().push(txn);
            }
        }
    }

    let entries: Vec<BudgetEntryStatus> = budget
        .entries
        .iter()
        .map(|entry| reconcile_entry(entry, &owners, &by_category))
        .collect();

    let months_with_entries: Vec<Month> = entries
        .iter()
        .flat_map(|e| e.months())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    tracing::debug!(
        budget = %budget.name,
        entries = entries.len(),
        months = months_with_entries.len(),
        "reconciled budget"
    );

    BudgetStatus {
        budget_id: budget.id,
        name: budget.name.clone(),
        entries,
        months_with_entries,
    }
}

fn reconcile_entry(
    entry: &BudgetEntry,
    owners: &HashMap<CategoryId, &BudgetEntry>,
    by_category: &HashMap<CategoryId, Vec<&Transaction>>,
) -> BudgetEntryStatus {
    let mut status: BTreeMap<Month, Vec<CategoryLinkStatus>> = BTreeMap::new();
    let mut seen = HashSet::new();

    for link in &entry.category_links {
        if !seen.insert(link.category_id) {
            continue;
        }
        if owners.get(&link.category_id).map(|owner| owner.id) != Some(entry.id) {
            continue;
        }
        let Some(txns) = by_category.get(&link.category_id) else {
            continue;
        };

        let mut by_month: BTreeMap<Month, Vec<Transaction>> = BTreeMap::new();
        for txn in txns {
            by_month.entry(txn.month()).or_default().push((*txn).clone());
        }

        let stylized_name = if link.stylized_name.is_empty() {
            link.category_id.key()
        } else {
            link.stylized_name.clone()
        };

        for (month, transactions) in by_month {
            status.entry(month).or_default().push(CategoryLinkStatus {
                link_id: link.id,
                category_id: link.category_id,
                stylized_name: stylized_name.clone(),
                total: transactions.iter().map(|t| t.amount.withdrawal_part()).sum(),
                transactions,
            });
        }
    }

    let total = status
        .values()
        .flat_map(|links| links.iter().map(|l| l.total))
        .sum();

    BudgetEntryStatus {
        entry_id: entry.id,
        name: entry.name.clone(),
        amount: entry.target_amount,
        total,
        category_links_status: status,
    }
}

/// Withdrawals inside `window` that no entry of `budget` accounts for
pub fn unbudgeted_transactions<'a>(
    budget: &Budget,
    transactions: &'a [Transaction],
    window: &DateWindow,
) -> Vec<&'a Transaction> {
    let owners = budget.entry_by_category();
    transactions
        .iter()
        .filter(|t| t.is_withdrawal() && window.contains(t.date))
        .filter(|t| !t.category_id.is_some_and(|c| owners.contains_key(&c)))
        .collect()
}
