//! # Gloss CLI
//!
//! Command-line interface for the Gloss glossary engine.
//!
//! ## Commands
//!
//! - `gloss lookup <id>` - Show a term record
//! - `gloss search <query>` - Fuzzy-search term names
//! - `gloss scan [FILE]` - List every term occurrence in a text
//! - `gloss annotate [FILE]` - Link matched terms to their glossary pages
//! - `gloss highlight [FILE]` - Wrap matched terms in a markup tag
//! - `gloss validate [FILE]` - Flag discouraged wording
//! - `gloss fix [FILE]` - Auto-correct discouraged wording
//! - `gloss status` - Show store statistics
//!
//! Text-consuming commands read from a file argument or stdin.
//!
//! ## Example Usage
//!
//! ```bash
//! gloss --terms-dir glossary/terms --meta-dir glossary/meta search "ransomware"
//! cat draft.md | gloss validate
//! gloss fix draft.md --write
//! ```

mod app;
mod commands;

use clap::{Parser, Subcommand};
use gloss_core::LinkFormat;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Gloss - glossary term matching and terminology validation
#[derive(Parser)]
#[command(name = "gloss")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory of term YAML files
    #[arg(long, global = true, default_value = "terms")]
    terms_dir: PathBuf,

    /// Directory of metadata files (categories, style guide)
    #[arg(long, global = true, default_value = "meta")]
    meta_dir: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a term record by id
    Lookup {
        /// Term id (e.g., "apt", "ransomware")
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Fuzzy-search term names
    Search {
        /// Search query (English or localized)
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// List every term occurrence in a text
    Scan {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Link matched terms to their glossary pages
    Annotate {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Link format (markdown, html)
        #[arg(short, long, default_value = "markdown")]
        format: LinkFormat,

        /// Base URL for glossary links
        #[arg(short, long, default_value = "")]
        base_url: String,
    },

    /// Wrap matched terms in a markup tag
    Highlight {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Markup tag to wrap matches in
        #[arg(short, long, default_value = "mark")]
        tag: String,
    },

    /// Flag discouraged wording
    Validate {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Print a Markdown report instead of one line per issue
        #[arg(short, long)]
        report: bool,
    },

    /// Auto-correct discouraged wording
    Fix {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Write the corrected text back to the file
        #[arg(short, long)]
        write: bool,
    },

    /// Show store statistics
    Status,
}

#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let app = app::App::new(&cli.terms_dir, &cli.meta_dir)?;

    // Execute command
    match cli.command {
        Commands::Lookup { id, output } => commands::lookup::run(&app, &id, output),
        Commands::Search {
            query,
            limit,
            output,
        } => commands::search::run(&app, &query, limit, output),
        Commands::Scan { file, output } => commands::scan::run(&app, file.as_deref(), output),
        Commands::Annotate {
            file,
            format,
            base_url,
        } => commands::annotate::run(&app, file.as_deref(), format, &base_url),
        Commands::Highlight { file, tag } => {
            commands::highlight::run(&app, file.as_deref(), &tag)
        }
        Commands::Validate { file, report } => {
            commands::validate::run(&app, file.as_deref(), report)
        }
        Commands::Fix { file, write } => commands::fix::run(&app, file.as_deref(), write),
        Commands::Status => commands::status::run(&app),
    }
}
