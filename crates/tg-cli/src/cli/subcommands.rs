use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum TransactionCommands {
    /// List transaction history for the signed-in account.
    List,
    /// Send money to another user.
    Send(SendArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SendArgs {
    /// Recipient email address.
    #[arg(long)]
    pub to: String,

    /// Amount, at most two decimal places (e.g. 50.00).
    #[arg(long)]
    pub amount: String,
}
