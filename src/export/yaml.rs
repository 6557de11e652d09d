//! YAML export, for reading results by eye

use std::io::Write;

use super::json::{ExportEnvelope, ExportKind};
use crate::engine::BudgetStatus;
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::services::AggregatedTransactions;

fn write_yaml<W: Write, T: serde::Serialize>(
    writer: &mut W,
    title: &str,
    envelope: &ExportEnvelope<T>,
) -> SpendscopeResult<()> {
    let export_err = |e: std::io::Error| SpendscopeError::Export(e.to_string());
    writeln!(writer, "# spendscope {}", title).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", envelope.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", envelope.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, envelope)?;
    Ok(())
}

/// Export an aggregation result as YAML with a header comment
pub fn export_aggregation_yaml<W: Write>(result: &AggregatedTransactions, writer: &mut W) -> SpendscopeResult<()> {
    write_yaml(
        writer,
        "aggregation",
        &ExportEnvelope::new(ExportKind::Aggregation, result),
    )
}

/// Export a budget status as YAML with a header comment
pub fn export_budget_yaml<W: Write>(status: &BudgetStatus, writer: &mut W) -> SpendscopeResult<()> {
    write_yaml(
        writer,
        "budget status",
        &ExportEnvelope::new(ExportKind::BudgetStatus, status),
    )
}
