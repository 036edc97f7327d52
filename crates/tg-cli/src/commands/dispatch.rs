use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => commands::session::login(&args, ctx, flags),
        Commands::Logout => commands::session::logout(ctx, flags),
        Commands::Status => commands::session::status(ctx, flags),
        Commands::Dashboard(args) => commands::dashboard::handle(&args, ctx, flags).await,
        Commands::Profile => commands::profile::handle(ctx, flags).await,
        Commands::Suspicious => commands::suspicious::handle(ctx, flags).await,
        Commands::Transactions { action } => {
            commands::transactions::handle(&action, ctx, flags).await
        }
    }
}
