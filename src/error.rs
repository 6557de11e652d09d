//! Custom error types for spendscope
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::engine::Dimension;

/// The main error type for spendscope operations
#[derive(Error, Debug)]
pub enum SpendscopeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Budget-related errors
    #[error("Budget error: {0}")]
    Budget(String),

    /// A category is linked to more than one entry of the same budget
    #[error("Category '{category}' is linked to more than one budget entry: {}", entries.join(", "))]
    AmbiguousBudgetLink {
        category: String,
        entries: Vec<String>,
    },

    /// Refused: removing the last active grouping dimension
    #[error("Cannot remove '{0}': at least one grouping dimension must stay active")]
    LastDimension(Dimension),

    /// Refused: a filter value that no bucket of the dimension can produce
    #[error("Unknown {dimension} filter value: {value}")]
    UnknownFilterValue { dimension: Dimension, value: String },

    /// Refused: editing a dimension that is not part of the configuration
    #[error("Dimension '{0}' is not active")]
    DimensionInactive(Dimension),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SpendscopeError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::AmbiguousBudgetLink { .. }
        )
    }

    /// Check if this is a refused filter mutation
    ///
    /// Refusals leave the configuration exactly as it was before the call.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::LastDimension(_) | Self::UnknownFilterValue { .. } | Self::DimensionInactive(_)
        )
    }
}

impl From<std::io::Error> for SpendscopeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendscopeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SpendscopeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for SpendscopeError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for spendscope operations
pub type SpendscopeResult<T> = Result<T, SpendscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendscopeError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = SpendscopeError::category_not_found("Groceries");
        assert_eq!(err.to_string(), "Category not found: Groceries");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_ambiguous_link_error() {
        let err = SpendscopeError::AmbiguousBudgetLink {
            category: "Groceries".into(),
            entries: vec!["Food".into(), "Household".into()],
        };
        assert_eq!(
            err.to_string(),
            "Category 'Groceries' is linked to more than one budget entry: Food, Household"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_refusals() {
        let err = SpendscopeError::LastDimension(Dimension::Category);
        assert!(err.is_refusal());
        assert_eq!(
            err.to_string(),
            "Cannot remove 'category': at least one grouping dimension must stay active"
        );

        let err = SpendscopeError::UnknownFilterValue {
            dimension: Dimension::Month,
            value: "2025-13".into(),
        };
        assert!(err.is_refusal());
        assert_eq!(err.to_string(), "Unknown month filter value: 2025-13");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendscopeError = io_err.into();
        assert!(matches!(err, SpendscopeError::Io(_)));
    }
}
