use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ghmap",
    version,
    about = "Decode GitHub API payloads into typed records and encode update requests"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "GHMAP_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail when a payload is missing a key instead of using its default
    #[arg(long, global = true)]
    pub strict: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,

    /// Log converter dispatch to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a JSON payload into a typed record
    #[command(visible_alias = "d")]
    Decode {
        /// Record type, e.g. user or repository-list (see `ghmap targets`)
        target: String,

        /// JSON file to read (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Encode an update record into a minimal request body
    #[command(visible_alias = "e")]
    Encode {
        /// Update type, e.g. user-update (see `ghmap targets`)
        target: String,

        /// JSON file holding the update record (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// List the registered decode and encode targets
    Targets,
}
