//! stockctl CLI - stockroom inventory and duty tracking
//!
//! Entry point for the `stockctl` command-line tool, which provides:
//! - Inventory listing, quick-add, quantity updates and archive/unarchive
//! - Low-stock reports with CSV export
//! - The daily duty checklist
//! - Name suggestions from the catalog of previously added items
//! - The web quick-add page (`serve`, with the `server` feature)

use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use stockctl_core::config::{load_dotenv, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_USER};
use stockctl_core::{DbConfig, PgRepository};

mod commands;
mod export;
mod render;
mod tracing_setup;

use render::Output;

#[derive(Parser, Debug)]
#[command(
    name = "stockctl",
    author,
    version,
    about = "Stockroom organizer: inventory, low-stock reports and daily duties",
    long_about = "Track stockroom inventory with shelf/overstock locations, report and export \
                  low stock, keep a daily duty checklist, and serve a quick-add web page."
)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    /// Render rows as pretty JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Connection settings, each also read from the environment
#[derive(Args, Debug)]
struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = DEFAULT_HOST, global = true)]
    db_host: String,

    /// Database port
    #[arg(
        long,
        env = "DB_PORT",
        default_value_t = stockctl_core::config::DEFAULT_PORT,
        global = true
    )]
    db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = DEFAULT_USER, global = true)]
    db_user: String,

    /// Database password
    #[arg(
        long,
        env = "DB_PASSWORD",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = DEFAULT_DATABASE, global = true)]
    db_name: String,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            host: args.db_host,
            port: args.db_port,
            user: args.db_user,
            password: args.db_password,
            database: args.db_name,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List active inventory with location info
    ListItems,
    /// Add an item and remember its name for suggestions
    AddItem(commands::items::AddItemArgs),
    /// Overwrite the quantity of an item
    UpdateQty(commands::items::UpdateQtyArgs),
    /// Show items with quantity at or below a threshold
    LowStock(commands::items::LowStockArgs),
    /// Export low-stock items to CSV
    ExportLowStock(commands::items::ExportLowStockArgs),
    /// List duties, newest first
    ListDuties,
    /// Add a duty dated today
    AddDuty(commands::duties::AddDutyArgs),
    /// Mark a duty completed
    CompleteDuty(commands::duties::CompleteDutyArgs),
    /// Soft-delete an item (hidden from listings)
    ArchiveItem(commands::items::ItemIdArgs),
    /// Restore an archived item
    UnarchiveItem(commands::items::ItemIdArgs),
    /// Suggest catalog names containing a substring
    SuggestNames(commands::items::SuggestNamesArgs),
    /// Create the tables if they do not exist
    InitDb,
    /// Run the quick-add web page and JSON endpoints
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values must be in place before clap reads DB_* defaults
    load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config = DbConfig::from(cli.db);
    tracing::debug!(db = %config.target(), "using database");
    let repo = PgRepository::from_config(&config);

    let stdout = io::stdout();
    let mut out = Output::new(stdout.lock(), cli.json);

    match cli.command {
        Commands::ListItems => commands::run_list_items(&repo, &mut out).await?,
        Commands::AddItem(args) => commands::run_add_item(&repo, &mut out, args).await?,
        Commands::UpdateQty(args) => commands::run_update_qty(&repo, &mut out, args).await?,
        Commands::LowStock(args) => commands::run_low_stock(&repo, &mut out, args).await?,
        Commands::ExportLowStock(args) => {
            commands::run_export_low_stock(&repo, &mut out, args).await?
        }
        Commands::ListDuties => commands::run_list_duties(&repo, &mut out).await?,
        Commands::AddDuty(args) => commands::run_add_duty(&repo, &mut out, args).await?,
        Commands::CompleteDuty(args) => {
            commands::run_complete_duty(&repo, &mut out, args).await?
        }
        Commands::ArchiveItem(args) => {
            commands::run_archive_item(&repo, &mut out, args).await?
        }
        Commands::UnarchiveItem(args) => {
            commands::run_unarchive_item(&repo, &mut out, args).await?
        }
        Commands::SuggestNames(args) => {
            commands::run_suggest_names(&repo, &mut out, args).await?
        }
        Commands::InitDb => commands::run_init_db(&repo, &mut out).await?,
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(repo, args).await?,
        Commands::Completions(args) => run_completions(args, &mut out.into_inner())?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs, writer: &mut impl Write) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, writer);

    Ok(())
}
