//! Query commands: aggregation tree, budget status, grouping choices

use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{Settings, SpendscopePaths};
use crate::display::{format_aggregation_tree, format_budget_status, format_choices};
use crate::engine::Dimension;
use crate::error::{SpendscopeError, SpendscopeResult};
use crate::export::{
    export_aggregation_csv, export_aggregation_json, export_aggregation_yaml, export_budget_csv,
    export_budget_json, export_budget_yaml, OutputFormat,
};
use crate::models::{DateWindow, Month};
use crate::services::{AggregationService, BudgetService};
use crate::storage::{FilterStore, Snapshot};

/// Options shared by every query
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Ledger snapshot (JSON); defaults to the configured snapshot
    #[arg(short, long, env = "SPENDSCOPE_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// First month of the window (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    pub from: Option<Month>,

    /// Last month of the window (YYYY-MM)
    #[arg(long, value_parser = parse_month)]
    pub to: Option<Month>,

    /// Budget name or ID; defaults to the first active budget
    #[arg(short, long)]
    pub budget: Option<String>,
}

impl QueryArgs {
    fn window(&self) -> SpendscopeResult<DateWindow> {
        DateWindow::from_bounds(self.from, self.to)
    }

    fn load(&self, paths: &SpendscopePaths, settings: &Settings) -> SpendscopeResult<Snapshot> {
        Snapshot::load(settings.resolve_snapshot(self.snapshot.clone(), paths))
    }
}

/// Output options for commands that can export
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn parse_month(s: &str) -> Result<Month, String> {
    Month::parse(s).map_err(|e| e.to_string())
}

/// Open the output target: a file when given, else stdout
fn open_output(path: Option<&Path>) -> SpendscopeResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                SpendscopeError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

fn write_text(writer: &mut dyn Write, text: &str) -> SpendscopeResult<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| SpendscopeError::Export(e.to_string()))
}

/// Handle `spendscope tree`
pub fn handle_tree_command(
    paths: &SpendscopePaths,
    settings: &Settings,
    query: &QueryArgs,
    output: &OutputArgs,
) -> SpendscopeResult<()> {
    let ledger = query.load(paths, settings)?;
    let config = FilterStore::new(paths.filters_file(), settings.default_dimension).load()?;

    let service = AggregationService::new(&ledger, settings);
    let result = service.aggregate(&config, &query.window()?, query.budget.as_deref())?;

    let mut writer = open_output(output.output.as_deref())?;
    match output.format {
        OutputFormat::Table => write_text(
            &mut writer,
            &format_aggregation_tree(&result, &config, &settings.currency_symbol),
        )?,
        OutputFormat::Json => export_aggregation_json(&result, &mut writer)?,
        OutputFormat::Yaml => export_aggregation_yaml(&result, &mut writer)?,
        OutputFormat::Csv => export_aggregation_csv(&result, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = &output.output {
        eprintln!("Wrote aggregation to {}", path.display());
    }
    Ok(())
}

/// Handle `spendscope budget`
pub fn handle_budget_command(
    paths: &SpendscopePaths,
    settings: &Settings,
    query: &QueryArgs,
    output: &OutputArgs,
    validate: bool,
    unbudgeted: bool,
) -> SpendscopeResult<()> {
    let ledger = query.load(paths, settings)?;
    let service = BudgetService::new(&ledger);
    let selector = query.budget.as_deref();
    let window = query.window()?;

    if validate {
        let budget = service.check(selector)?;
        println!("Budget '{}' is valid ({} entries).", budget.name, budget.entries.len());
        return Ok(());
    }

    if unbudgeted {
        let transactions = service.unbudgeted(selector, &window)?;
        if transactions.is_empty() {
            println!("Every withdrawal in the window is budgeted.");
        }
        for txn in &transactions {
            println!("{}", txn);
        }
        return Ok(());
    }

    let status = service.status(selector, &window)?;

    let mut writer = open_output(output.output.as_deref())?;
    match output.format {
        OutputFormat::Table => write_text(
            &mut writer,
            &format_budget_status(&status, &settings.currency_symbol),
        )?,
        OutputFormat::Json => export_budget_json(&status, &mut writer)?,
        OutputFormat::Yaml => export_budget_yaml(&status, &mut writer)?,
        OutputFormat::Csv => export_budget_csv(&status, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Handle `spendscope choices`
pub fn handle_choices_command(
    paths: &SpendscopePaths,
    settings: &Settings,
    query: &QueryArgs,
    dimension: Option<Dimension>,
) -> SpendscopeResult<()> {
    let ledger = query.load(paths, settings)?;
    let service = AggregationService::new(&ledger, settings);
    let choices = service.choices(&query.window()?, query.budget.as_deref())?;
    print!("{}", format_choices(&choices, dimension));
    Ok(())
}
