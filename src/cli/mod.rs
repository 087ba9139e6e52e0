//! Command-line interface for datahub-catalog.
//!
//! The `datahub` binary is a thin presentation layer over [`crate::api`]:
//! - `browse`: filter, search and page through a dataset
//! - `tree` / `facets`: explore the category hierarchy
//! - `flag`: toggle and list bookmarks, cart items, pins
//! - `login` / `logout` / `status`: the login gate
//! - `config`: view and modify configuration

mod commands;

pub use commands::*;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::{DataSource, FlagKind};

/// Browse the India & States and IMF data catalogs.
#[derive(Debug, Parser)]
#[command(name = "datahub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding flags and the login session.
    #[arg(short = 'd', long, global = true, env = "DATAHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format for structured data.
    #[arg(short = 'o', long, global = true, default_value = "text", env = "DATAHUB_OUTPUT")]
    pub output: OutputFormat,

    /// Output as JSON (shorthand for -o json).
    #[arg(long, global = true, env = "DATAHUB_JSON")]
    pub json: bool,

    /// Enable colored output (auto-detected by default).
    #[arg(long, global = true, env = "DATAHUB_COLOR")]
    pub color: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "DATAHUB_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "DATAHUB_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "DATAHUB_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List dataset records with filters, search and paging.
    #[command(alias = "ls")]
    Browse(BrowseArgs),

    /// Show the category tree of a dataset.
    Tree(TreeArgs),

    /// List subcategories or subsets present in the records.
    Facets(FacetsArgs),

    /// Toggle and inspect per-record flags.
    Flag(FlagArgs),

    /// Log in with the demo account.
    Login(LoginArgs),

    /// Forget the stored login.
    Logout,

    /// Show login state and flag totals.
    Status,

    /// View and modify configuration.
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "datahub", &mut io::stdout());
}

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Tab-separated values.
    Tsv,
    /// Compact single-line output.
    Compact,
}

/// Arguments for the browse command.
#[derive(Debug, Parser)]
pub struct BrowseArgs {
    /// Dataset to browse (india, imf). Defaults to the configured source.
    #[arg(short = 's', long)]
    pub source: Option<DataSource>,

    /// First level: category (india) or region (imf).
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Second level: subcategory (india) or country (imf).
    #[arg(long, alias = "country")]
    pub subcategory: Option<String>,

    /// Third level: subset (india) or indicator category (imf).
    #[arg(long, alias = "indicator")]
    pub subset: Option<String>,

    /// Case-insensitive search over title and category fields.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Only records with this flag (bookmark, plus, pin, more).
    #[arg(short = 'f', long)]
    pub flag: Option<FlagKind>,

    /// Page number. Out-of-range values are clamped.
    #[arg(short = 'p', long, default_value = "1", allow_hyphen_values = true)]
    pub page: String,

    /// Records per page. Defaults to the configured page size.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print every matching record without paging.
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Arguments for the tree command.
#[derive(Debug, Parser)]
pub struct TreeArgs {
    /// Dataset (india, imf). Defaults to the configured source.
    #[arg(short = 's', long)]
    pub source: Option<DataSource>,

    /// Labels leading to the subtree to show.
    pub path: Vec<String>,

    /// Maximum depth to print (default: unlimited).
    #[arg(long)]
    pub depth: Option<usize>,
}

/// Arguments for the facets command.
#[derive(Debug, Parser)]
pub struct FacetsArgs {
    /// Dataset (india, imf). Defaults to the configured source.
    #[arg(short = 's', long)]
    pub source: Option<DataSource>,

    /// Category whose subcategories to list.
    #[arg(short = 'c', long)]
    pub category: String,

    /// List subsets of this subcategory instead.
    #[arg(long)]
    pub subcategory: Option<String>,
}

/// Arguments for the flag command.
#[derive(Debug, Parser)]
pub struct FlagArgs {
    /// Flag action.
    #[command(subcommand)]
    pub action: FlagAction,
}

/// Flag subcommands.
#[derive(Debug, Subcommand)]
pub enum FlagAction {
    /// Flip a flag on a record.
    Toggle {
        /// Record identifier.
        id: String,
        /// Flag to flip (bookmark, plus, pin, more).
        kind: FlagKind,
    },

    /// Show the flags of a record.
    Show {
        /// Record identifier.
        id: String,
    },

    /// List flagged records across both datasets.
    #[command(alias = "ls")]
    List {
        /// Only records with this flag.
        #[arg(short = 'k', long)]
        kind: Option<FlagKind>,
    },

    /// Count flagged records in a dataset.
    Count {
        /// Flag to count (default: plus, the cart).
        #[arg(short = 'k', long, default_value = "plus")]
        kind: FlagKind,

        /// Dataset. Defaults to the configured source.
        #[arg(short = 's', long)]
        source: Option<DataSource>,
    },
}

/// Arguments for the login command.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Email address (prompted when omitted).
    #[arg(short = 'e', long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long, env = "DATAHUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Get a configuration value.
    Get {
        /// Configuration key (e.g., "browse.page_size").
        key: String,
    },

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Value to set.
        value: String,
    },

    /// Show configuration file path.
    Path,

    /// Initialize default configuration file.
    Init,

    /// Reset configuration to defaults.
    Reset,
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    if let Some(color) = cli.color {
        console::set_colors_enabled(color);
    }

    match &cli.command {
        Commands::Browse(args) => commands::browse::run(&cli, args),
        Commands::Tree(args) => commands::tree::run(&cli, args),
        Commands::Facets(args) => commands::facets::run(&cli, args),
        Commands::Flag(args) => commands::flag::run(&cli, args),
        Commands::Login(args) => commands::auth::login(&cli, args),
        Commands::Logout => commands::auth::logout(&cli),
        Commands::Status => commands::auth::status(&cli),
        Commands::Config(args) => commands::config::run(&cli, args),
        Commands::Completions(args) => {
            generate_completions(args.shell);
            Ok(())
        }
    }
}
