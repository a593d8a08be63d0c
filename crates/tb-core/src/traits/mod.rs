//! Capability traits for the remote-desktop collaborators

mod surface;
mod transport;

pub use surface::DisplaySurface;
pub use transport::{
    Credentials, DisplaySettings, EventReceiver, EventSender, InputEvent, SessionHandle,
    Transport, TransportEvent, TransportOptions,
};
