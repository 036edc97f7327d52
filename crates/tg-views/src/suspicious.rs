//! Suspicious activity: reasons the account is flagged.
//!
//! Loading this screen recalculates the score server-side; the service only
//! produces reasons as part of a recalculation.

use std::cell::RefCell;

use serde::Serialize;

use tg_client::{ClientError, FraudApi, SuspiciousActivityClient};
use tg_core::Identity;

use crate::notify::{Notice, Notifier};
use crate::screen::{ActionOutcome, InFlight, Screen};

/// What the last reason lookup established.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reasons", rename_all = "snake_case")]
pub enum Findings {
    /// Not fetched yet, or the service rejected the last lookup.
    #[default]
    Unknown,
    /// The service reported no suspicious activity.
    Clear,
    Suspicious(Vec<String>),
}

impl Findings {
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Suspicious(reasons) => reasons,
            Self::Unknown | Self::Clear => &[],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuspiciousState {
    pub email: Option<String>,
    pub findings: Findings,
    pub loading: bool,
}

pub struct SuspiciousView<A, N> {
    reasons: SuspiciousActivityClient<A>,
    notifier: N,
    identity: RefCell<Option<Identity>>,
    findings: RefCell<Findings>,
    in_flight: InFlight,
}

impl<A: FraudApi, N: Notifier> SuspiciousView<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            reasons: SuspiciousActivityClient::new(api),
            notifier,
            identity: RefCell::new(None),
            findings: RefCell::new(Findings::Unknown),
            in_flight: InFlight::default(),
        }
    }

    #[must_use]
    pub fn findings(&self) -> Findings {
        self.findings.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> SuspiciousState {
        SuspiciousState {
            email: self.identity.borrow().as_ref().map(|id| id.email.clone()),
            findings: self.findings(),
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
        match self.reasons.list_reasons(email).await {
            Ok(reasons) if reasons.is_empty() => {
                self.findings.replace(Findings::Clear);
                ActionOutcome::Completed
            }
            Ok(reasons) => {
                self.findings.replace(Findings::Suspicious(reasons));
                ActionOutcome::Completed
            }
            Err(error) => {
                // A rejected lookup clears the list; a transport failure keeps it.
                if matches!(error, ClientError::Service { .. }) {
                    self.findings.replace(Findings::Unknown);
                }
                self.notifier.notify(Notice::failure(
                    &error,
                    "Failed to fetch suspicious activity",
                ));
                ActionOutcome::Failed
            }
        }
    }
}

impl<A: FraudApi, N: Notifier> Screen for SuspiciousView<A, N> {
    async fn load(&self, identity: &Identity) {
        if self.identity.replace(Some(identity.clone())).as_ref() != Some(identity) {
            self.findings.replace(Findings::Unknown);
        }
        self.fetch(&identity.email).await;
    }

    fn reset(&self) {
        self.identity.replace(None);
        self.findings.replace(Findings::Unknown);
    }
}
