//! Remote desktop settings

use serde::{Deserialize, Serialize};

use crate::types::{EndpointDescriptor, SessionOptions};

/// Persisted remote-desktop connection settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopSettings {
    /// Transport URL, e.g. `ws://host:port/websockify`
    pub url: String,

    /// Password for the remote desktop; empty means none
    pub password: String,

    /// Start sessions in view-only mode
    pub view_only: bool,

    /// Show the desktop preview
    pub show: bool,
}

impl DesktopSettings {
    /// Descriptor for the configured remote desktop
    pub fn descriptor(&self) -> EndpointDescriptor {
        EndpointDescriptor::new(self.url.trim()).with_secret(self.password.clone())
    }

    /// Session options for the configured remote desktop
    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            visible: self.show,
            interactive: !self.view_only,
        }
    }
}
