use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

/// The authenticated user as known client-side.
///
/// The email is the only key the client has before the scoring service
/// resolves it to an [`AccountId`]. It is kept exactly as entered (no case
/// folding, no trimming beyond rejecting blank input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    /// Build an identity from a login email.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the email is blank or has no `@`.
    pub fn new(email: impl Into<String>) -> Result<Self, CoreError> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self {
            email,
            display_name: None,
        })
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = (!name.trim().is_empty()).then_some(name);
        self
    }
}

/// Minimal shape check shared by login and transfer recipients.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address is blank or has no `@`.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::validation("email must not be empty"));
    }
    if !email.contains('@') {
        return Err(CoreError::validation(format!(
            "'{email}' is not an email address"
        )));
    }
    Ok(())
}

/// Opaque account identifier issued by the scoring service for an email.
///
/// The service may send it as a string or a number; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Wrap a raw identifier. Blank identifiers count as absent.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAccountId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawAccountId::deserialize(deserializer)? {
            RawAccountId::Text(text) => text,
            RawAccountId::Number(number) => number.to_string(),
        };
        Self::new(raw).ok_or_else(|| serde::de::Error::custom("account id must not be blank"))
    }
}
