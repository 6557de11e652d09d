//! Transaction model
//!
//! Transactions are read-only inputs to the engine. Every reference is
//! optional because extracted statement rows are not always complete; the
//! engine routes missing references to sentinel buckets instead of failing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, TransactionSourceId};
use super::money::Money;
use super::window::Month;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Statement description
    #[serde(default)]
    pub description: String,

    /// Signed amount (positive for deposit, negative for withdrawal)
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Category reference
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Account reference
    #[serde(default)]
    pub account_id: Option<AccountId>,

    /// Feed the transaction was ingested from
    #[serde(default)]
    pub source_id: Option<TransactionSourceId>,
}

impl Transaction {
    /// Create a transaction with no references
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            description: String::new(),
            amount,
            date,
            category_id: None,
            account_id: None,
            source_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_source(mut self, source_id: TransactionSourceId) -> Self {
        self.source_id = Some(source_id);
        self
    }

    /// Check if this is a deposit (positive amount)
    pub fn is_deposit(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is a withdrawal (negative amount)
    pub fn is_withdrawal(&self) -> bool {
        self.amount.is_negative()
    }

    /// Calendar month the transaction falls in
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let category = CategoryId::new();
        let source = TransactionSourceId::new();
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            Money::from_cents(-5000),
        )
        .with_description("Corner Market")
        .with_category(category)
        .with_source(source);

        assert_eq!(txn.category_id, Some(category));
        assert_eq!(txn.source_id, Some(source));
        assert!(txn.account_id.is_none());
        assert!(txn.is_withdrawal());
        assert_eq!(txn.month(), Month::new(2025, 1).unwrap());
    }

    #[test]
    fn test_deserialize_with_missing_references() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "amount": 1200,
            "date": "2025-02-01"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(txn.is_deposit());
        assert!(txn.category_id.is_none());
        assert!(txn.description.is_empty());
    }
}
