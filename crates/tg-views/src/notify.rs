//! Transient, non-blocking user notifications.

use std::cell::RefCell;

use serde::Serialize;

use tg_client::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// User-facing text for a failed call.
    ///
    /// The service's own message wins; otherwise `fallback` names the
    /// operation that failed.
    pub fn failure(error: &ClientError, fallback: &str) -> Self {
        let message = match error {
            ClientError::Service {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Service { message: None, .. } => fallback.to_string(),
            ClientError::Network(_) => "Network error".to_string(),
            ClientError::Resolution { .. } | ClientError::UnresolvedIdentity => {
                "Could not fetch user ID".to_string()
            }
            ClientError::Validation(error) => error.to_string(),
        };
        Self::error(message)
    }
}

/// Sink for notices. Screens never block on it.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Keeps every notice in order. Used by the CLI to print after an action and
/// by tests to assert on what the user would have seen.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .map(|notice| notice.message.clone())
            .collect()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.notices
            .borrow()
            .iter()
            .any(|notice| notice.level == NoticeLevel::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::debug!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "error notice"),
        }
        self.notices.borrow_mut().push(notice);
    }
}
