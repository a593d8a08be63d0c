//! tb-core: Core abstractions and configuration for TakeBridge
//!
//! This crate provides the shared types, transport capability traits and
//! configuration structures used by the session manager, the orchestrator
//! client and the CLI.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use error::{SessionError, SessionErrorKind, TransportError};
pub use types::{
    DisconnectReason, EndpointDescriptor, LifecycleEvent, SessionOptions, SessionState,
};
