//! Dimension registry
//!
//! The closed set of axes a transaction can be grouped by, and the single
//! function that turns a transaction into a bucket under each of them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;

use super::catalog::Catalog;
use crate::error::SpendscopeError;
use crate::models::{Month, Transaction};

/// Bucket id for transactions without a category
pub const UNCATEGORIZED_ID: &str = "uncategorized";
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Bucket id for transactions without an account
pub const NO_ACCOUNT_ID: &str = "no-account";
pub const NO_ACCOUNT_LABEL: &str = "No Account";

/// Bucket id for transactions whose category belongs to no budget entry
pub const UNASSIGNED_ID: &str = "unassigned";
pub const UNASSIGNED_LABEL: &str = "Unbudgeted";

/// A grouping axis. Declaration order breaks index ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Month,
    Year,
    Account,
    Budget,
}

impl Dimension {
    /// Every dimension in declaration order
    pub const ALL: [Dimension; 5] = [
        Dimension::Category,
        Dimension::Month,
        Dimension::Year,
        Dimension::Account,
        Dimension::Budget,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Month => "month",
            Self::Year => "year",
            Self::Account => "account",
            Self::Budget => "budget",
        }
    }

    /// Whether buckets of this dimension are ordered in time
    pub fn is_chronological(&self) -> bool {
        matches!(self, Self::Month | Self::Year)
    }

    /// Bucket of `txn` under this dimension
    pub fn bucket_key(&self, txn: &Transaction, catalog: &Catalog) -> BucketKey {
        match self {
            Self::Category => match txn.category_id {
                Some(id) => {
                    let label = catalog
                        .category(id)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| {
                            tracing::debug!(category = %id, "unknown category, labelling by id");
                            id.key()
                        });
                    BucketKey::new(id.key(), label)
                }
                None => BucketKey::new(UNCATEGORIZED_ID, UNCATEGORIZED_LABEL),
            },
            Self::Month => {
                let month = txn.month();
                BucketKey::new(month.key(), month.label())
            }
            Self::Year => {
                let year = format!("{:04}", txn.date.year());
                BucketKey::new(year.clone(), year)
            }
            Self::Account => match txn.account_id {
                Some(id) => {
                    let label = catalog
                        .account(id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| id.key());
                    BucketKey::new(id.key(), label)
                }
                None => BucketKey::new(NO_ACCOUNT_ID, NO_ACCOUNT_LABEL),
            },
            Self::Budget => match txn.category_id.and_then(|c| catalog.entry_for_category(c)) {
                Some(entry) => BucketKey::new(entry.id.key(), entry.name.clone()),
                None => BucketKey::new(UNASSIGNED_ID, UNASSIGNED_LABEL),
            },
        }
    }

    /// Ordering of two buckets of this dimension.
    ///
    /// Month and year buckets order by the date their id names, so five-digit
    /// and negative years sort correctly. The other dimensions order by
    /// label, then by id.
    pub fn compare(&self, a: &BucketKey, b: &BucketKey) -> Ordering {
        if self.is_chronological() {
            self.chronological_rank(&a.id)
                .cmp(&self.chronological_rank(&b.id))
                .then_with(|| a.id.cmp(&b.id))
        } else {
            a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id))
        }
    }

    /// `(year, month)` named by a month or year bucket id
    fn chronological_rank(&self, id: &str) -> Option<(i32, u32)> {
        match self {
            Self::Month => Month::parse(id).ok().map(|m| (m.year(), m.month())),
            Self::Year => id.parse().ok().map(|year| (year, 0)),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = SpendscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" | "categories" => Ok(Self::Category),
            "month" | "months" => Ok(Self::Month),
            "year" | "years" => Ok(Self::Year),
            "account" | "accounts" => Ok(Self::Account),
            "budget" | "budgets" => Ok(Self::Budget),
            other => Err(SpendscopeError::Validation(format!(
                "Unknown dimension '{}'. Expected one of: category, month, year, account, budget",
                other
            ))),
        }
    }
}

/// Identity of a bucket: stable id plus display label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    pub id: String,
    pub label: String,
}

impl BucketKey {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
