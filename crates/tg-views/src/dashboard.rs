//! Dashboard: score snapshot and manual recalculation.

use std::cell::RefCell;

use serde::Serialize;

use tg_client::{FraudApi, TrustScoreClient};
use tg_core::{Identity, ScoreSnapshot};

use crate::notify::{Notice, Notifier};
use crate::screen::{ActionOutcome, InFlight, Screen};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub email: Option<String>,
    pub score: Option<f64>,
    pub flag: String,
    pub warning: String,
    /// The score has moved to a band the displayed flag does not describe.
    pub flag_may_be_stale: bool,
    pub loading: bool,
}

pub struct DashboardView<A, N> {
    scores: TrustScoreClient<A>,
    notifier: N,
    identity: RefCell<Option<Identity>>,
    snapshot: RefCell<Option<ScoreSnapshot>>,
    in_flight: InFlight,
}

impl<A: FraudApi, N: Notifier> DashboardView<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            scores: TrustScoreClient::new(api),
            notifier,
            identity: RefCell::new(None),
            snapshot: RefCell::new(None),
            in_flight: InFlight::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<ScoreSnapshot> {
        self.snapshot.borrow().clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_active()
    }

    #[must_use]
    pub fn state(&self) -> DashboardState {
        let snapshot = self.snapshot.borrow();
        DashboardState {
            email: self.identity.borrow().as_ref().map(|id| id.email.clone()),
            score: snapshot.as_ref().and_then(|s| s.score),
            flag: snapshot.as_ref().map(|s| s.flag.clone()).unwrap_or_default(),
            warning: snapshot
                .as_ref()
                .map(|s| s.warning.clone())
                .unwrap_or_default(),
            flag_may_be_stale: snapshot.as_ref().is_some_and(ScoreSnapshot::flag_may_be_stale),
            loading: self.is_loading(),
        }
    }

    /// Re-read the snapshot for the current identity.
    pub async fn refresh(&self) -> ActionOutcome {
        let Some(_in_flight) = self.in_flight.try_enter() else {
            return ActionOutcome::Busy;
        };
        let Some(email) = self.current_email() else {
            self.notifier.notify(Notice::error("Please log in"));
            return ActionOutcome::Failed;
        };
        self.fetch(&email).await
    }

    /// Recompute the score server-side.
    ///
    /// Only the numeric score is replaced; flag and warning keep the values
    /// of the last full fetch.
    pub async fn recalculate(&self) -> ActionOutcome {
        let Some(_in_flight) = self.in_flight.try_enter() else {
            return ActionOutcome::Busy;
        };
        let Some(email) = self.current_email() else {
            self.notifier.notify(Notice::error("Please log in"));
            return ActionOutcome::Failed;
        };
        match self.scores.recalculate(&email).await {
            Ok(score) => {
                self.snapshot
                    .borrow_mut()
                    .get_or_insert_with(ScoreSnapshot::default)
                    .score = Some(score);
                tracing::debug!(%email, score, "score recalculated");
                self.notifier.notify(Notice::info("Score recalculated"));
                ActionOutcome::Completed
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::failure(&error, "Failed to recalculate score"));
                ActionOutcome::Failed
            }
        }
    }

    fn current_email(&self) -> Option<String> {
        self.identity.borrow().as_ref().map(|id| id.email.clone())
    }

    async fn fetch(&self, email: &str) -> ActionOutcome {
        let _in_flight = self.in_flight.enter();
        match self.scores.fetch_current(email).await {
            Ok(snapshot) => {
                *self.snapshot.borrow_mut() = Some(snapshot);
                ActionOutcome::Completed
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::failure(&error, "Failed to fetch score"));
                ActionOutcome::Failed
            }
        }
    }
}

impl<A: FraudApi, N: Notifier> Screen for DashboardView<A, N> {
    async fn load(&self, identity: &Identity) {
        if self.identity.replace(Some(identity.clone())).as_ref() != Some(identity) {
            self.snapshot.replace(None);
        }
        self.fetch(&identity.email).await;
    }

    fn reset(&self) {
        self.identity.replace(None);
        self.snapshot.replace(None);
    }
}
