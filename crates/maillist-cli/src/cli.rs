//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use maillist_cli::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "maillist",
    version,
    about = "Manage mailing list campaigns, uploads and segments",
    long_about = "Manage mailing list campaigns from the command line.\n\n\
                  Upload CSV contact lists, map their columns onto the system field\n\
                  catalog, build segments from filter conditions and export CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Data file to use instead of the configured one.
    #[arg(long = "data-file", value_name = "PATH", global = true)]
    pub data_file: Option<PathBuf>,

    /// Act as this user instead of the configured one.
    #[arg(long = "user", value_name = "ID", global = true)]
    pub user: Option<String>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include contact values in logs (they are redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the system field catalog.
    Catalog,

    /// Create, inspect and delete campaigns.
    #[command(subcommand)]
    Campaign(CampaignCommand),

    /// Upload a CSV contact list into a campaign.
    Upload(UploadArgs),

    /// Inspect or delete uploaded lists.
    #[command(subcommand)]
    List(ListCommand),

    /// Create, evaluate and delete segments.
    #[command(subcommand)]
    Segment(SegmentCommand),

    /// Export a campaign or segment as CSV.
    Export(ExportArgs),

    /// Show the record fields present in a campaign.
    Fields {
        #[arg(value_name = "CAMPAIGN")]
        campaign: String,
    },
}

#[derive(Subcommand)]
pub enum CampaignCommand {
    /// Create a campaign.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List your campaigns, newest first.
    List,
    /// Show a campaign with its lists and segments.
    Show {
        #[arg(value_name = "CAMPAIGN")]
        id: String,
    },
    /// Replace a campaign's name and description.
    Update {
        #[arg(value_name = "CAMPAIGN")]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a campaign with its lists, records and segments.
    Delete {
        #[arg(value_name = "CAMPAIGN")]
        id: String,
    },
}

#[derive(Args)]
pub struct UploadArgs {
    #[arg(value_name = "CAMPAIGN")]
    pub campaign: String,

    /// CSV file with a header row.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Override one column's target, e.g. --map "E-mail=email". Repeatable.
    ///
    /// An empty id excludes the column. Overrides apply after auto-mapping.
    #[arg(long = "map", value_name = "HEADER=ID")]
    pub map: Vec<String>,

    /// Start from an empty mapping instead of auto-mapping.
    #[arg(long = "no-auto-map")]
    pub no_auto_map: bool,

    /// Show the mapping and stop without importing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// Show a list's mapping and records.
    Show {
        #[arg(value_name = "LIST")]
        id: String,
        /// Maximum number of records to print.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Delete a list and its records.
    Delete {
        #[arg(value_name = "LIST")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SegmentCommand {
    /// Create a segment from filter conditions.
    Create {
        #[arg(value_name = "CAMPAIGN")]
        campaign: String,
        name: String,
        /// Condition as FIELD:OPERATOR:VALUE, e.g. "city:equals:Boston". Repeatable.
        #[arg(long = "where", value_name = "CONDITION")]
        conditions: Vec<String>,
    },
    /// List a campaign's segments, newest first.
    List {
        #[arg(value_name = "CAMPAIGN")]
        campaign: String,
    },
    /// Show a segment's conditions and per-condition match counts.
    Show {
        #[arg(value_name = "SEGMENT")]
        id: String,
    },
    /// Replace a segment's name and conditions.
    Update {
        #[arg(value_name = "SEGMENT")]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long = "where", value_name = "CONDITION")]
        conditions: Vec<String>,
    },
    /// Delete a segment.
    Delete {
        #[arg(value_name = "SEGMENT")]
        id: String,
    },
    /// Print the records currently matching a segment.
    Records {
        #[arg(value_name = "SEGMENT")]
        id: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_name = "CAMPAIGN")]
    pub campaign: String,

    /// Export only this segment's records.
    #[arg(long, value_name = "SEGMENT")]
    pub segment: Option<String>,

    /// Write to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
