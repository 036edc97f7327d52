use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl OutputFormat {
    /// Parse the `general.default_format` config value.
    #[must_use]
    pub fn from_config(value: &str) -> Option<Self> {
        Self::from_str(value, true).ok()
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    /// `None` defers to `general.default_format`.
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub verbose: bool,
    pub base_url: Option<String>,
}

impl GlobalFlags {
    /// Effective output format once configuration has been applied.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Json)
    }
}
