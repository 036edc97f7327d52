use tg_views::{RecordingNotifier, SuspiciousView};

use crate::cli::GlobalFlags;
use crate::commands::shared::{finish, open};
use crate::context::AppContext;

/// `tg suspicious`
///
/// Recalculates the score server-side as a side effect.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.api()?;
    let notifier = RecordingNotifier::new();
    let view = SuspiciousView::new(&api, &notifier);

    open(&view, ctx, "Checking for suspicious activity").await?;
    finish(&view.state(), &notifier, flags)
}
