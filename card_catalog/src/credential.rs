//! Holder for the single API credential used on catalog calls.

use std::fmt;
use std::sync::RwLock;

/// The one live API credential. Empty means "not configured".
///
/// Held in process memory only. Any collaborator may replace it at any time;
/// the new value applies to requests sent afterwards, not to ones in flight.
#[derive(Default)]
pub struct CredentialHolder {
    value: RwLock<String>,
}

impl CredentialHolder {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(value.into()),
        }
    }

    /// Replaces the credential unconditionally. No format check.
    pub fn set_credential(&self, value: impl Into<String>) {
        let value = value.into();
        log::info!("API credential was set");
        log::debug!("API credential length: {}", value.len());
        *self.value.write().unwrap_or_else(|e| e.into_inner()) = value;
    }

    pub fn is_configured(&self) -> bool {
        !self.value.read().unwrap_or_else(|e| e.into_inner()).is_empty()
    }

    /// Copy of the current value, taken when a request is built
    pub(crate) fn current(&self) -> String {
        self.value.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `Authorization` header value for the current credential
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.current())
    }
}

impl fmt::Debug for CredentialHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHolder")
            .field("configured", &self.is_configured())
            .finish()
    }
}
