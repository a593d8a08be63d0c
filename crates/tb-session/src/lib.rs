//! tb-session: Remote-desktop session lifecycle for TakeBridge
//!
//! The [`SessionManager`] owns at most one live session handle at a time.
//! Hosts drive it with a target descriptor and visibility flags, and
//! receive connect, disconnect and error notifications through a
//! [`LifecycleObserver`]. Credential requests from the transport are
//! answered by the [`CredentialNegotiator`], and local input is gated by
//! the [`FocusRouter`].

mod credentials;
mod focus;
mod live;
mod manager;
mod observer;

pub use credentials::CredentialNegotiator;
pub use focus::FocusRouter;
pub use manager::SessionManager;
pub use observer::LifecycleObserver;
