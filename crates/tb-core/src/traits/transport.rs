//! Remote-desktop transport traits
//!
//! The wire protocol lives in an external transport library. These traits
//! describe the capabilities the lifecycle manager needs from it, so any
//! transport exposing this contract can be substituted.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::TransportError;
use crate::traits::DisplaySurface;

/// Sending half of a handle's event subscription
pub type EventSender = mpsc::UnboundedSender<TransportEvent>;

/// Receiving half of a handle's event subscription
pub type EventReceiver = mpsc::UnboundedReceiver<TransportEvent>;

/// Events emitted by a session handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The handshake completed
    Connect,
    /// The connection closed
    Disconnect {
        /// Whether the close was clean
        clean: bool,
    },
    /// The handshake needs credentials
    CredentialsRequired {
        /// Credential types the server asked for (e.g. "password")
        types: Vec<String>,
    },
    /// Any other low-level error
    Error { detail: String },
}

/// Options fixed at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Capture keyboard input when the display is clicked
    pub focus_on_click: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            focus_on_click: true,
        }
    }
}

/// Display behaviour applied to a handle right after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    /// Suppress outbound input while keeping the video stream
    pub view_only: bool,
    /// Scale the remote display to the local viewport
    pub scale_viewport: bool,
    /// Ask the server to resize the remote session to the viewport
    pub resize_session: bool,
    /// Background colour behind the scaled display
    pub background: String,
}

impl DisplaySettings {
    /// Settings for an interactive or view-only session
    pub fn for_interactive(interactive: bool) -> Self {
        Self {
            view_only: !interactive,
            ..Self::default()
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            view_only: false,
            scale_viewport: true,
            resize_session: true,
            background: "black".to_string(),
        }
    }
}

/// Credentials answered to a `CredentialsRequired` event
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub password: String,
}

impl Credentials {
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Local input forwarded to the remote machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key press or release (X11 keysym)
    Key { keysym: u32, down: bool },
    /// Pointer position and button mask
    Pointer { x: u16, y: u16, buttons: u8 },
}

/// One live connection to a remote desktop
pub trait SessionHandle: Send {
    /// Apply display behaviour
    fn configure(&mut self, settings: &DisplaySettings) -> Result<(), TransportError>;

    /// Toggle view-only mode without reconnecting
    fn set_view_only(&mut self, view_only: bool);

    /// Answer a credential request
    fn send_credentials(&mut self, credentials: &Credentials) -> Result<(), TransportError>;

    /// Capture keyboard input
    fn focus(&mut self) -> Result<(), TransportError>;

    /// Forward local input
    fn send_input(&mut self, input: InputEvent) -> Result<(), TransportError>;

    /// Close the connection
    fn disconnect(&mut self) -> Result<(), TransportError>;
}

/// Factory for session handles
pub trait Transport: Send + Sync {
    /// Create a handle rendering into `surface` and connecting to `url`.
    ///
    /// `events` is the only subscription the handle gets. Once the receiving
    /// half is closed, sends fail and the handle must stop emitting.
    fn open(
        &self,
        surface: Arc<dyn DisplaySurface>,
        url: &str,
        options: &TransportOptions,
        events: EventSender,
    ) -> Result<Box<dyn SessionHandle>, TransportError>;
}
