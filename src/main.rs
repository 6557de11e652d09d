use anyhow::Result;
use clap::{Parser, Subcommand};

use spendscope::cli::{
    handle_budget_command, handle_choices_command, handle_filter_command, handle_tree_command,
    FilterCommands, OutputArgs, QueryArgs,
};
use spendscope::config::{Settings, SpendscopePaths};
use spendscope::engine::Dimension;
use spendscope::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "spendscope",
    version,
    about = "Transaction aggregation and budget reconciliation",
    long_about = "spendscope groups a ledger's transactions by any nesting of \
                  category, month, year, account, and budget, and reconciles \
                  budget targets against actual spend month by month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate transactions by the saved filter configuration
    Tree {
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Reconcile a budget against actual spend
    Budget {
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        output: OutputArgs,

        /// Only check the budget's category links
        #[arg(long, conflicts_with = "unbudgeted")]
        validate: bool,

        /// List withdrawals that no budget entry accounts for
        #[arg(long)]
        unbudgeted: bool,
    },

    /// List the values each dimension can be filtered to
    Choices {
        #[command(flatten)]
        query: QueryArgs,

        /// Only this dimension
        #[arg(short, long)]
        dimension: Option<Dimension>,
    },

    /// Filter configuration commands
    #[command(subcommand)]
    Filter(FilterCommands),

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = SpendscopePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Tree { query, output }) => {
            handle_tree_command(&paths, &settings, &query, &output)?;
        }
        Some(Commands::Budget {
            query,
            output,
            validate,
            unbudgeted,
        }) => {
            handle_budget_command(&paths, &settings, &query, &output, validate, unbudgeted)?;
        }
        Some(Commands::Choices { query, dimension }) => {
            handle_choices_command(&paths, &settings, &query, dimension)?;
        }
        Some(Commands::Filter(cmd)) => {
            handle_filter_command(&paths, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("spendscope configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Filters file:     {}", paths.filters_file().display());
            println!(
                "Snapshot:         {}",
                settings.resolve_snapshot(None, &paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Default dimension:        {}", settings.default_dimension);
            println!("  Currency symbol:          {}", settings.currency_symbol);
            println!(
                "  Include archived sources: {}",
                settings.include_archived_sources
            );
        }
        None => {
            println!("spendscope - transaction aggregation and budget reconciliation");
            println!();
            println!("Run 'spendscope --help' for usage information.");
        }
    }

    Ok(())
}
