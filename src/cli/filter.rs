//! Filter CLI commands
//!
//! Edit the persisted filter configuration. Refused edits exit with an error
//! and leave the saved configuration untouched.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::{Settings, SpendscopePaths};
use crate::display::format_filters;
use crate::engine::{Dimension, FilterConfiguration, Toggle};
use crate::error::SpendscopeResult;
use crate::models::DateWindow;
use crate::services::AggregationService;
use crate::storage::{FilterStore, Snapshot};

/// Filter subcommands
#[derive(Subcommand)]
pub enum FilterCommands {
    /// Show the active dimensions in nesting order
    Show,

    /// Add a dimension at the innermost level, or remove an active one
    Toggle {
        /// Dimension (category, month, year, account, budget)
        dimension: Dimension,
    },

    /// Admit only the given values of a dimension
    Only {
        dimension: Dimension,

        /// Bucket ids or exact labels; none at all admits nothing
        values: Vec<String>,

        /// Ledger snapshot used to check the values
        #[arg(short, long, env = "SPENDSCOPE_SNAPSHOT")]
        snapshot: Option<PathBuf>,

        /// Budget whose entries the budget dimension is checked against;
        /// defaults to the first active budget
        #[arg(short, long)]
        budget: Option<String>,

        /// Store the values without checking them against the ledger
        #[arg(long)]
        unchecked: bool,
    },

    /// Admit every value of a dimension again
    All { dimension: Dimension },

    /// Hide a dimension's level in the terminal tree
    Hide { dimension: Dimension },

    /// Show a hidden dimension's level again
    Unhide { dimension: Dimension },

    /// Change a dimension's nesting index (lower is outer)
    Move { dimension: Dimension, index: u32 },

    /// Go back to the single default dimension
    Reset,
}

/// Handle a filter command
pub fn handle_filter_command(
    paths: &SpendscopePaths,
    settings: &Settings,
    cmd: FilterCommands,
) -> SpendscopeResult<()> {
    let store = FilterStore::new(paths.filters_file(), settings.default_dimension);

    let config = match cmd {
        FilterCommands::Show => store.load()?,

        FilterCommands::Toggle { dimension } => {
            let (config, outcome) = store.update(|c| c.toggle_dimension(dimension))?;
            match outcome {
                Toggle::Added { index } => println!("Added {} at level {}.", dimension, index),
                Toggle::Removed => println!("Removed {}.", dimension),
            }
            config
        }

        FilterCommands::Only {
            dimension,
            values,
            snapshot,
            budget,
            unchecked,
        } => {
            let (config, ()) = if unchecked {
                store.update(|c| c.set_specifics(dimension, values))?
            } else {
                let ledger = Snapshot::load(settings.resolve_snapshot(snapshot, paths))?;
                let choices = AggregationService::new(&ledger, settings)
                    .choices(&DateWindow::unbounded(), budget.as_deref())?;

                // Accept labels as well as ids
                let resolved: Vec<String> = values
                    .iter()
                    .map(|v| choices.resolve(dimension, v).unwrap_or(v.as_str()).to_string())
                    .collect();
                store.update(|c| c.set_specifics_checked(dimension, resolved, &choices))?
            };
            println!("Filtering {} to {} value(s).", dimension, specifics_len(&config, dimension));
            config
        }

        FilterCommands::All { dimension } => store.update(|c| c.include_all(dimension))?.0,

        FilterCommands::Hide { dimension } => store.update(|c| c.set_visible(dimension, false))?.0,

        FilterCommands::Unhide { dimension } => store.update(|c| c.set_visible(dimension, true))?.0,

        FilterCommands::Move { dimension, index } => {
            store.update(|c| c.set_index(dimension, index))?.0
        }

        FilterCommands::Reset => store.reset()?,
    };

    print!("{}", format_filters(&config));
    Ok(())
}

fn specifics_len(config: &FilterConfiguration, dimension: Dimension) -> usize {
    config.entry(dimension).map_or(0, |e| e.specifics.len())
}
