//! CLI argument definitions for histx.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `export` | Export an item's history without prompts |
//! | `wizard` | Collect export parameters step by step |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `http://localhost:8080` | Backend REST base URL |
//! | `--cookie` | none | Opaque session cookie |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--output-dir` | `.` | Directory export files land in |
//! | `--quiet` | `false` | Suppress informational logging |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use histx_core::FileFormat;

/// Export historical item data from a persistence REST backend.
///
/// Fetches unit metadata and historical datapoints for a named item over a
/// date range, then writes the result as an RFC 4180 CSV or pretty-printed
/// JSON file.
#[derive(Debug, Parser)]
#[command(
    name = "histx",
    author,
    version,
    about = "Export historical item data to CSV or JSON"
)]
pub struct Cli {
    /// Base URL of the backend exposing the /rest API.
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Session cookie passed through opaquely to the backend.
    #[arg(long, global = true)]
    pub cookie: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Directory export files are written into.
    #[arg(long, global = true, default_value = ".")]
    pub output_dir: PathBuf,

    /// Suppress informational logging.
    #[arg(long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export an item's history without prompts.
    ///
    /// # Examples
    ///
    ///   histx export Temperature --begin 2024-01-01 --end 2024-01-03
    ///   histx export Temperature --begin 2024-01-01 --end 2024-01-03 --format json
    Export(ExportArgs),

    /// Collect export parameters step by step at the terminal.
    ///
    /// Prompts for item name, date range, and file format; enter 'back' to
    /// return to the previous step.
    ///
    /// # Examples
    ///
    ///   histx wizard
    ///   histx wizard --itemname Temperature
    Wizard(WizardArgs),
}

/// Arguments for the `export` command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Item whose history should be exported.
    pub item: String,

    /// First calendar date of the range (YYYY-MM-DD).
    #[arg(long)]
    pub begin: String,

    /// Last calendar date of the range (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub end: String,

    /// Output file format.
    #[arg(long, value_enum, default_value_t = FormatSelector::Csv)]
    pub format: FormatSelector,
}

/// Arguments for the `wizard` command.
#[derive(Debug, Args)]
pub struct WizardArgs {
    /// Pre-fill the item name and start at the date-range step.
    #[arg(long)]
    pub itemname: Option<String>,
}

/// File format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatSelector {
    /// RFC 4180 CSV, comma-delimited, LF line endings.
    Csv,
    /// Pretty-printed JSON with 2-space indentation.
    Json,
}

impl From<FormatSelector> for FileFormat {
    fn from(value: FormatSelector) -> Self {
        match value {
            FormatSelector::Csv => Self::Csv,
            FormatSelector::Json => Self::Json,
        }
    }
}
