//! Core data models for spendscope
//!
//! Stored records the engine reads (transactions, categories, accounts,
//! transaction sources, budgets) plus the value types used as keys and
//! amounts throughout.

pub mod account;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod window;

pub use account::{Account, AccountType, SourceKind, TransactionSource};
pub use budget::{Budget, BudgetCategoryLink, BudgetEntry};
pub use category::Category;
pub use ids::{
    AccountId, BudgetCategoryLinkId, BudgetEntryId, BudgetId, CategoryId, TransactionId,
    TransactionSourceId,
};
pub use money::Money;
pub use transaction::Transaction;
pub use window::{DateWindow, Month};
