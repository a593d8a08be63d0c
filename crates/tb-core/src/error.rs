//! Core error types for TakeBridge

use std::path::PathBuf;
use thiserror::Error;

use crate::types::DisconnectReason;

/// Errors surfaced to the owner of a remote session as lifecycle events.
///
/// These never cross the asynchronous boundary as `Err` values; the
/// lifecycle manager hands them to its observer instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The transport could not be instantiated for this activation
    #[error("Failed to create remote session: {detail}")]
    ConstructionFailure { detail: String },

    /// The handshake asked for a secret and none was supplied
    #[error("Remote desktop password required but not provided")]
    CredentialMissing,

    /// The handle refused the forwarded secret, or asked again after it was sent
    #[error("Remote desktop credentials rejected: {detail}")]
    CredentialRejected { detail: String },

    /// The transport closed the connection
    #[error("Remote desktop disconnected ({reason})")]
    TransportDisconnected { reason: DisconnectReason },

    /// Any other error reported by the transport
    #[error("Remote desktop error: {detail}")]
    UnknownTransport { detail: String },
}

/// Discriminant of [`SessionError`], handy for matching in UIs and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionErrorKind {
    ConstructionFailure,
    CredentialMissing,
    CredentialRejected,
    TransportDisconnected,
    UnknownTransport,
}

impl SessionError {
    /// Get the kind of this error
    pub fn kind(&self) -> SessionErrorKind {
        match self {
            SessionError::ConstructionFailure { .. } => SessionErrorKind::ConstructionFailure,
            SessionError::CredentialMissing => SessionErrorKind::CredentialMissing,
            SessionError::CredentialRejected { .. } => SessionErrorKind::CredentialRejected,
            SessionError::TransportDisconnected { .. } => SessionErrorKind::TransportDisconnected,
            SessionError::UnknownTransport { .. } => SessionErrorKind::UnknownTransport,
        }
    }
}

/// Errors returned by a transport implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport URL could not be used
    #[error("Invalid transport URL: {0}")]
    InvalidUrl(String),

    /// The transport could not be created
    #[error("Transport unavailable: {0}")]
    Unavailable(String),

    /// The handle rejected a credential payload
    #[error("Credentials rejected: {0}")]
    CredentialsRejected(String),

    /// The operation needs a live connection
    #[error("Not connected")]
    NotConnected,

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a display surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface is not mounted
    #[error("Display surface is not mounted")]
    NotMounted,

    /// The surface refused focus
    #[error("Display surface refused focus: {0}")]
    FocusRefused(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_kind() {
        assert_eq!(
            SessionError::CredentialMissing.kind(),
            SessionErrorKind::CredentialMissing
        );
        let err = SessionError::TransportDisconnected {
            reason: DisconnectReason::Unclean,
        };
        assert_eq!(err.kind(), SessionErrorKind::TransportDisconnected);
    }

    #[test]
    fn test_credential_missing_message_is_distinct() {
        let missing = SessionError::CredentialMissing.to_string();
        let rejected = SessionError::CredentialRejected {
            detail: "bad".into(),
        }
        .to_string();
        assert!(missing.contains("required but not provided"));
        assert_ne!(missing, rejected);
    }
}
