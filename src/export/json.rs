//! JSON export
//!
//! Results are wrapped in a schema-versioned envelope so that consumers can
//! tell what they are reading and which build produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::engine::BudgetStatus;
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::services::AggregatedTransactions;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// What an export envelope carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Aggregation,
    BudgetStatus,
}

/// Schema-versioned wrapper around an exported result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope<T> {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub kind: ExportKind,
    pub data: T,
}

impl<T> ExportEnvelope<T> {
    pub fn new(kind: ExportKind, data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            kind,
            data,
        }
    }

    /// Check that the envelope was written by a compatible schema
    pub fn validate(&self) -> SpendscopeResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(SpendscopeError::Export(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }
        Ok(())
    }
}

fn write_envelope<W: Write, T: Serialize>(writer: &mut W, envelope: &ExportEnvelope<T>) -> SpendscopeResult<()> {
    serde_json::to_writer_pretty(&mut *writer, envelope)
        .map_err(|e| SpendscopeError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SpendscopeError::Export(e.to_string()))
}

/// Export an aggregation result as pretty JSON
pub fn export_aggregation_json<W: Write>(result: &AggregatedTransactions, writer: &mut W) -> SpendscopeResult<()> {
    write_envelope(writer, &ExportEnvelope::new(ExportKind::Aggregation, result))
}

/// Export a budget status as pretty JSON
pub fn export_budget_json<W: Write>(status: &BudgetStatus, writer: &mut W) -> SpendscopeResult<()> {
    write_envelope(writer, &ExportEnvelope::new(ExportKind::BudgetStatus, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GroupingChoices;
    use crate::models::Money;

    #[test]
    fn test_envelope_shape() {
        let result = AggregatedTransactions {
            sources: Vec::new(),
            overall_deposits: Money::zero(),
            overall_withdrawals: Money::from_cents(100),
            overall_balance: Money::from_cents(-100),
            group_by_ordering: vec![crate::engine::Dimension::Month],
            grouping_choices: GroupingChoices::default(),
        };

        let mut out = Vec::new();
        export_aggregation_json(&result, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["kind"], "aggregation");
        assert_eq!(value["data"]["overall_withdrawals"], 100);
        assert_eq!(value["data"]["group_by_ordering"][0], "month");

        let envelope: ExportEnvelope<AggregatedTransactions> = serde_json::from_slice(&out).unwrap();
        envelope.validate().unwrap();
        assert_eq!(envelope.data, result);
    }

    #[test]
    fn test_schema_mismatch() {
        let mut envelope = ExportEnvelope::new(ExportKind::BudgetStatus, ());
        envelope.schema_version = "0.1.0".into();
        assert!(envelope.validate().is_err());
    }
}
