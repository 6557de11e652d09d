//! Export module for spendscope
//!
//! Serializes aggregation results and budget statuses:
//! - JSON: schema-versioned envelope, machine-readable
//! - YAML: same envelope with a header comment
//! - CSV: flattened rows for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;

pub use self::csv::{export_aggregation_csv, export_budget_csv};
pub use self::json::{
    export_aggregation_json, export_budget_json, ExportEnvelope, ExportKind, EXPORT_SCHEMA_VERSION,
};
pub use self::yaml::{export_aggregation_yaml, export_budget_yaml};

/// Output format shared by the query commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented terminal tree or table
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}
