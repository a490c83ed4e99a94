//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// vplcfg - Property-path configuration and capability matching for video
/// acceleration parameter records
#[derive(Parser)]
#[command(name = "vplcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set properties on an empty video parameter record and print them back
    Set(SetArgs),

    /// List addressable property paths
    Schema(SchemaArgs),

    /// List implementations from a manifest that satisfy the filters
    Match(MatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Args)]
pub struct SetArgs {
    /// Properties to set, applied after the configured params
    #[arg(value_name = "PATH=VALUE")]
    pub params: Vec<String>,

    /// Read params from this file instead of the global and project config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail instead of attaching missing extension buffers
    #[arg(long)]
    pub no_attach: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct SchemaArgs {
    /// List implementation description paths instead of video parameters
    #[arg(long)]
    pub caps: bool,

    /// Only list paths starting with this prefix
    pub prefix: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Implementation manifest (defaults to `defaults.manifest` from config)
    #[arg(long, value_name = "FILE", env = "VPLCFG_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Capability filter, may be repeated
    #[arg(short, long = "filter", value_name = "PATH=VALUE")]
    pub filters: Vec<String>,

    /// Read filters from this file instead of the global and project config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print only the first matching implementation
    #[arg(long)]
    pub first: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
