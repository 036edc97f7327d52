use clap::{Args, Subcommand};

use crate::cli::subcommands::TransactionCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in as an email address on this device.
    Login(LoginArgs),
    /// Sign out and forget the stored identity.
    Logout,
    /// Show who is signed in.
    Status,
    /// Trust score, flag, and warning.
    Dashboard(DashboardArgs),
    /// Signed-in identity and current standing.
    Profile,
    /// Reasons the account is considered suspicious (recalculates the score).
    Suspicious,
    /// Transaction history and transfers.
    Transactions {
        #[command(subcommand)]
        action: TransactionCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Email address to sign in as.
    pub email: String,

    /// Display name shown on the profile.
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Ask the service to recompute the score after loading it.
    #[arg(long)]
    pub recalculate: bool,
}
