use tg_views::{DashboardView, RecordingNotifier};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DashboardArgs;
use crate::commands::shared::{finish, open};
use crate::context::AppContext;
use crate::progress::Progress;

/// `tg dashboard [--recalculate]`
pub async fn handle(
    args: &DashboardArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let api = ctx.api()?;
    let notifier = RecordingNotifier::new();
    let view = DashboardView::new(&api, &notifier);

    open(&view, ctx, "Fetching trust score").await?;

    if args.recalculate && !notifier.has_errors() {
        let progress = Progress::spinner("Recalculating score");
        let outcome = view.recalculate().await;
        progress.finish_clear();
        tracing::debug!(?outcome, "recalculate");
    }

    finish(&view.state(), &notifier, flags)
}
