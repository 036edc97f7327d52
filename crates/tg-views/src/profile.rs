//! Profile: who is signed in and their current standing.

use std::cell::RefCell;

use serde::Serialize;

use tg_client::{FraudApi, TrustScoreClient};
use tg_core::{Identity, ScoreSnapshot};

use crate::notify::{Notice, Notifier};
use crate::screen::{ActionOutcome, InFlight, Screen};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileState {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub score: Option<f64>,
    pub flag: String,
    pub loading: bool,
}

pub struct ProfileView<A, N> {
    scores: TrustScoreClient<A>,
    notifier: N,
    identity: RefCell<Option<Identity>>,
    snapshot: RefCell<Option<ScoreSnapshot>>,
    in_flight: InFlight,
}

impl<A: FraudApi, N: Notifier> ProfileView<A, N> {
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
    pub fn state(&self) -> ProfileState {
        let identity = self.identity.borrow();
        let snapshot = self.snapshot.borrow();
        ProfileState {
            email: identity.as_ref().map(|id| id.email.clone()),
            display_name: identity.as_ref().and_then(|id| id.display_name.clone()),
            score: snapshot.as_ref().and_then(|s| s.score),
            flag: snapshot.as_ref().map(|s| s.flag.clone()).unwrap_or_default(),
            loading: self.in_flight.is_active(),
        }
    }

    pub async fn refresh(&self) -> ActionOutcome {
        let Some(_in_flight) = self.in_flight.try_enter() else {
            return ActionOutcome::Busy;
        };
        let email = self.identity.borrow().as_ref().map(|id| id.email.clone());
        let Some(email) = email else {
            self.notifier.notify(Notice::error("Please log in"));
            return ActionOutcome::Failed;
        };
        self.fetch(&email).await
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
                    .notify(Notice::failure(&error, "Failed to fetch profile"));
                ActionOutcome::Failed
            }
        }
    }
}

impl<A: FraudApi, N: Notifier> Screen for ProfileView<A, N> {
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
