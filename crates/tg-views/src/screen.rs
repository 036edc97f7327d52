//! Activation guard, in-flight tracking, and the mount loop shared by every
//! screen.

use std::cell::Cell;

use tg_core::Identity;
use tg_session::{SessionReceiver, SessionState};

use crate::navigation::{Navigator, Route};

/// A screen that loads data for the signed-in identity.
#[allow(async_fn_in_trait)]
pub trait Screen {
    /// Fetch everything the screen shows for `identity`.
    async fn load(&self, identity: &Identity);

    /// Forget identity-bound state after sign-out.
    fn reset(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Loaded,
    Redirected,
}

/// Guard then load.
///
/// An anonymous session redirects to login and issues no request.
pub async fn activate<S, N>(screen: &S, session: &SessionState, navigator: &N) -> Activation
where
    S: Screen + ?Sized,
    N: Navigator + ?Sized,
{
    match session.identity() {
        None => {
            screen.reset();
            navigator.redirect(Route::Login);
            Activation::Redirected
        }
        Some(identity) => {
            screen.load(identity).await;
            Activation::Loaded
        }
    }
}

/// Activate `screen` now and again after every session change.
///
/// Returns once the session store is dropped.
pub async fn mount<S, N>(screen: &S, mut session: SessionReceiver, navigator: &N)
where
    S: Screen + ?Sized,
    N: Navigator + ?Sized,
{
    loop {
        let state = session.borrow_and_update().clone();
        activate(screen, &state, navigator).await;
        if session.changed().await.is_err() {
            tracing::debug!("session store dropped, unmounting");
            return;
        }
    }
}

/// Counts requests in flight for one screen.
///
/// Loads may overlap; manual actions only start when nothing else is
/// running.
#[derive(Debug, Default)]
pub struct InFlight {
    count: Cell<u32>,
}

impl InFlight {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.count.get() > 0
    }

    /// Mark a request as started. Always succeeds.
    pub(crate) fn enter(&self) -> InFlightGuard<'_> {
        self.count.set(self.count.get() + 1);
        InFlightGuard { count: &self.count }
    }

    /// Start a request only if none is running.
    pub(crate) fn try_enter(&self) -> Option<InFlightGuard<'_>> {
        if self.is_active() {
            None
        } else {
            Some(self.enter())
        }
    }
}

#[must_use]
pub(crate) struct InFlightGuard<'a> {
    count: &'a Cell<u32>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.count.set(self.count.get().saturating_sub(1));
    }
}

/// What became of a manual action (refresh, recalculate, send).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// A notice was raised; prior state is kept.
    Failed,
    /// Another request was in flight; nothing was sent.
    Busy,
}
