use tg_views::{ProfileView, RecordingNotifier};

use crate::cli::GlobalFlags;
use crate::commands::shared::{finish, open};
use crate::context::AppContext;

/// `tg profile`
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api = ctx.api()?;
    let notifier = RecordingNotifier::new();
    let view = ProfileView::new(&api, &notifier);

    open(&view, ctx, "Fetching profile").await?;
    finish(&view.state(), &notifier, flags)
}
