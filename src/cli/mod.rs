//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer.

pub mod filter;
pub mod query;

pub use filter::{handle_filter_command, FilterCommands};
pub use query::{
    handle_budget_command, handle_choices_command, handle_tree_command, OutputArgs, QueryArgs,
};
