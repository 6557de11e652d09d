//! Category model
//!
//! Categories are extracted per transaction source, so two sources may each
//! have a "Groceries" category with distinct ids.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionSourceId};

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// The source this category was extracted from
    #[serde(default)]
    pub source_id: Option<TransactionSourceId>,

    /// Whether this category is archived
    #[serde(default)]
    pub archived: bool,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            source_id: None,
            archived: false,
        }
    }

    /// Create a category that belongs to a transaction source
    pub fn for_source(name: impl Into<String>, source_id: TransactionSourceId) -> Self {
        let mut category = Self::new(name);
        category.source_id = Some(source_id);
        category
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
