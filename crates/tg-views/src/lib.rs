//! # tg-views
//!
//! One orchestrator per screen (dashboard, profile, suspicious activity,
//! transactions). Each one:
//!
//! 1. redirects to login and fetches nothing while the session is anonymous;
//! 2. sequences its client calls, resolving the account id before any
//!    history read;
//! 3. tracks in-flight requests and refuses a manual action while one runs;
//! 4. turns every failure into a [`Notice`], keeping what was shown before.
//!
//! All state lives in `RefCell`s on a single-threaded executor and no borrow
//! is held across an `.await`. Overlapping loads are not sequenced: whichever
//! response arrives last is what the screen shows.

pub mod dashboard;
pub mod navigation;
pub mod notify;
pub mod profile;
pub mod screen;
pub mod suspicious;
pub mod transactions;

pub use dashboard::{DashboardState, DashboardView};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use profile::{ProfileState, ProfileView};
pub use screen::{ActionOutcome, Activation, InFlight, Screen, activate, mount};
pub use suspicious::{Findings, SuspiciousState, SuspiciousView};
pub use transactions::{TransactionsState, TransactionsView};
