//! Account and transaction source models
//!
//! An account is the bank account a transaction was booked against; a
//! transaction source is the feed (institution export, uploaded statement
//! series) it was ingested from. Sources are the top-level partition of the
//! aggregation output.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, TransactionSourceId};

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    Other,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// Type of account
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// How transactions reach a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Account,
    Card,
}

/// Origin feed of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSource {
    /// Unique identifier
    pub id: TransactionSourceId,

    /// Display name (e.g., "Chase Sapphire")
    pub name: String,

    #[serde(default)]
    pub kind: SourceKind,

    /// Archived sources are hidden from aggregation by default
    #[serde(default)]
    pub archived: bool,
}

impl TransactionSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TransactionSourceId::new(),
            name: name.into(),
            kind: SourceKind::default(),
            archived: false,
        }
    }
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
