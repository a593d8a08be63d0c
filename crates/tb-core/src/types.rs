//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SessionError;

/// Identifies which remote desktop to connect to.
///
/// A descriptor is immutable for the lifetime of a session attempt. Handing
/// the lifecycle manager a different descriptor replaces the session.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EndpointDescriptor {
    /// Transport URL, e.g. `ws://host:port/websockify`
    pub address: String,
    /// Secret sent when the handshake asks for credentials
    pub secret: Option<String>,
}

impl EndpointDescriptor {
    /// Create a descriptor without a secret
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            secret: None,
        }
    }

    /// Attach a secret. Empty strings are treated as absent.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = if secret.is_empty() { None } else { Some(secret) };
        self
    }

    /// Whether the address is usable at all
    pub fn has_address(&self) -> bool {
        !self.address.trim().is_empty()
    }
}

impl fmt::Debug for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointDescriptor")
            .field("address", &self.address)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Host-controlled flags for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Whether the display surface is shown
    pub visible: bool,
    /// Whether local input is forwarded to the remote machine
    pub interactive: bool,
}

impl SessionOptions {
    /// Visible and interactive
    pub fn interactive() -> Self {
        Self {
            visible: true,
            interactive: true,
        }
    }

    /// Visible, but input is suppressed
    pub fn view_only() -> Self {
        Self {
            visible: true,
            interactive: false,
        }
    }

    /// Not shown; no session should exist
    pub fn hidden() -> Self {
        Self {
            visible: false,
            interactive: true,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Why a session was closed by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisconnectReason {
    /// Clean close
    Normal,
    /// The connection dropped without a clean close
    Unclean,
}

impl DisconnectReason {
    /// Map the transport's clean flag to a reason
    pub fn from_clean(clean: bool) -> Self {
        if clean {
            DisconnectReason::Normal
        } else {
            DisconnectReason::Unclean
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisconnectReason::Normal => "normal",
            DisconnectReason::Unclean => "unclean",
        }
    }
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of the remote session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No session
    Idle,
    /// A handle exists and the handshake is in flight
    Connecting,
    /// The remote desktop is connected
    Connected,
    /// The transport closed the session
    Disconnected(DisconnectReason),
    /// The activation failed
    Failed(SessionError),
}

impl SessionState {
    /// Whether a handle is live in this state
    pub fn is_live(&self) -> bool {
        matches!(self, SessionState::Connecting | SessionState::Connected)
    }

    /// Whether this is a terminal state of an activation
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Disconnected(_) | SessionState::Failed(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Connecting => write!(f, "connecting"),
            SessionState::Connected => write!(f, "connected"),
            SessionState::Disconnected(reason) => write!(f, "disconnected ({})", reason),
            SessionState::Failed(_) => write!(f, "error"),
        }
    }
}

/// Event delivered to the owner of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The remote desktop connected
    Connected,
    /// The transport closed the session
    Disconnected { reason: DisconnectReason },
    /// Something went wrong
    Error(SessionError),
}
