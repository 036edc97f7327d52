use serde::Serialize;

use tg_views::{Activation, NoticeLevel, RecordingNavigator, RecordingNotifier, Screen, activate};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Run the guard and initial load for `screen`.
///
/// # Errors
///
/// Fails when nobody is signed in; the screen fetched nothing.
pub async fn open<S: Screen>(screen: &S, ctx: &AppContext, message: &str) -> anyhow::Result<()> {
    let navigator = RecordingNavigator::new();
    let progress = Progress::spinner(message);
    let activation = activate(screen, &ctx.session.state(), &navigator).await;
    progress.finish_clear();

    match activation {
        Activation::Loaded => Ok(()),
        Activation::Redirected => {
            anyhow::bail!("not logged in: run `tg login <email>`")
        }
    }
}

/// Print informational notices to stderr, the screen state to stdout, then
/// fail with the first error notice, if any.
///
/// The state is printed even on failure: whatever was loaded before the
/// error is still what the screen shows.
pub fn finish<T: Serialize>(
    state: &T,
    notifier: &RecordingNotifier,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let notices = notifier.take();
    if !flags.quiet {
        for notice in notices.iter().filter(|n| n.level == NoticeLevel::Info) {
            eprintln!("{}", notice.message);
        }
    }

    output(state, flags.output_format())?;

    let mut errors = notices.iter().filter(|n| n.level == NoticeLevel::Error);
    if let Some(first) = errors.next() {
        for other in errors {
            eprintln!("tg: {}", other.message);
        }
        anyhow::bail!("{}", first.message);
    }
    Ok(())
}
