use clap::{ArgAction, Parser, Subcommand};
use commands::{config, interactive, search, show};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "rateit")]
#[command(about = "RateIt - Search movies, keep a list of what you watched and how you rated it")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    #[command(long_about = "Run a single title search and print the matching movies. Queries shorter than the configured minimum length are not sent.")]
    Search {
        /// Title (or part of a title) to look up
        title: String,
    },
    /// Show the details of one movie
    Show {
        /// Catalog id, e.g. tt0120338
        id: String,
    },
    /// Interactive session: search, open details, rate and keep a watched list
    #[command(long_about = "Start a line-driven session. Plain text changes the search query; commands start with ':' (type :help to list them). The watched list lives for the duration of the session.")]
    Interactive,
    /// Manage configuration and the catalog API key
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the catalog API key in the credentials file
    SetKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging_with_file(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { title } => search::run_search(title, &output).await,
        Commands::Show { id } => show::run_show(id, &output).await,
        Commands::Interactive => interactive::run_interactive(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}
