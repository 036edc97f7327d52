use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tg` binary.
#[derive(Debug, Parser)]
#[command(name = "tg", version, about = "TrustGuard - trust score and fraud screening client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (suppress informational notices)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Scoring service URL, overriding service.base_url
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            base_url: self.base_url.clone(),
        }
    }
}
