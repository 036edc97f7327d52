use tg_client::HttpFraudApi;
use tg_views::{RecordingNotifier, TransactionsView};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{SendArgs, TransactionCommands};
use crate::commands::shared::{finish, open};
use crate::context::AppContext;
use crate::progress::Progress;

/// Handle `tg transactions <subcommand>`.
pub async fn handle(
    action: &TransactionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let api = ctx.api()?;
    let notifier = RecordingNotifier::new();
    let view = TransactionsView::new(&api, &notifier);

    open(&view, ctx, "Fetching transactions").await?;

    if let TransactionCommands::Send(args) = action {
        send(&view, args).await;
    }

    finish(&view.state(), &notifier, flags)
}

async fn send(view: &TransactionsView<&HttpFraudApi, &RecordingNotifier>, args: &SendArgs) {
    let progress = Progress::spinner("Sending transaction");
    let outcome = view.send(&args.to, &args.amount).await;
    progress.finish_clear();
    tracing::debug!(?outcome, to = %args.to, "send");
}
