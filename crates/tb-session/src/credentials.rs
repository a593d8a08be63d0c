//! Credential negotiation
//!
//! Answers the transport's mid-handshake credential request with the secret
//! from the endpoint descriptor. The secret is sent at most once per
//! connection attempt: a second request means the server did not accept it,
//! and is reported instead of retried.

use tb_core::traits::{Credentials, SessionHandle};
use tb_core::SessionError;

/// Per-attempt credential state
pub struct CredentialNegotiator {
    /// Secret from the endpoint descriptor
    secret: Option<String>,
    /// Whether the secret has been forwarded in this attempt
    exchanged: bool,
}

impl CredentialNegotiator {
    /// Create a negotiator for one connection attempt
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret,
            exchanged: false,
        }
    }

    /// Whether a secret has already been sent
    pub fn has_exchanged(&self) -> bool {
        self.exchanged
    }

    /// Respond to a credential request from `handle`.
    ///
    /// Every failure is returned as a [`SessionError`] for the owner; the
    /// handshake is left to fail on its own.
    pub fn respond(&mut self, handle: &mut dyn SessionHandle) -> Result<(), SessionError> {
        let Some(secret) = self.secret.as_deref() else {
            return Err(SessionError::CredentialMissing);
        };

        if self.exchanged {
            return Err(SessionError::CredentialRejected {
                detail: "server requested credentials again after they were sent".to_string(),
            });
        }

        self.exchanged = true;
        handle
            .send_credentials(&Credentials::password(secret))
            .map_err(|e| SessionError::CredentialRejected {
                detail: e.to_string(),
            })?;

        tracing::debug!("Credentials sent");
        Ok(())
    }
}
