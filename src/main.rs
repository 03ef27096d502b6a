//! Curate: duplicate checks and relevance scoring for the resource catalog

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::OutputFormat;
use curate::config::{Config, LogFormat, DEFAULT_CONFIG_FILE};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "curate")]
#[command(about = "Deduplicate and score candidates for the curated resource list")]
#[command(version)]
struct Cli {
    /// Configuration file path (missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Repository root holding the catalog and queues
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every pending candidate against the catalog and rejected set
    CheckPending {
        /// Render a Markdown report
        #[arg(long)]
        report: bool,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the full duplicate check on an ad-hoc candidate
    Check {
        /// Candidate URL
        #[arg(short, long)]
        url: Option<String>,

        /// Candidate name
        #[arg(short, long)]
        name: Option<String>,

        /// Candidate description
        #[arg(short, long)]
        description: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Look up a URL by normalized form and repository identity
    CheckUrl {
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List resources with a similar name
    CheckName {
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Score a candidate's relevance
    Score {
        /// Candidate name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Candidate description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Candidate URL
        #[arg(short, long, default_value = "")]
        url: String,

        /// External signal (upvotes, stars)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        signal: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show catalog, queue and index statistics
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config first so [logging] applies; -v raises the level
    let mut config = Config::load_or_default(&cli.config)?;
    init_logging(&config, cli.verbose)?;
    debug!("Using configuration {}", cli.config.display());

    if let Some(root) = cli.root {
        config.store.root = root;
    }

    match cli.command {
        Commands::CheckPending {
            report,
            output,
            format,
        } => commands::check_pending(config, report, output, format),
        Commands::Check {
            url,
            name,
            description,
            format,
        } => commands::check_candidate(config, url, name, description, format),
        Commands::CheckUrl { url, format } => commands::check_url(config, url, format),
        Commands::CheckName { name, format } => commands::check_name(config, name, format),
        Commands::Score {
            name,
            description,
            url,
            signal,
            format,
        } => commands::score_candidate(config, name, description, url, signal, format),
        Commands::Stats { format } => commands::show_stats(config, format),
        Commands::Init { path } => commands::init_config(path),
    }
}

fn init_logging(config: &Config, verbose: u8) -> Result<()> {
    let level = config.logging.level.raised(verbose).to_tracing();
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }
    Ok(())
}
