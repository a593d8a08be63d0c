//! Scoped ownership of one live session handle

use std::sync::Arc;

use tokio::sync::mpsc;

use tb_core::traits::{
    DisplaySurface, EventReceiver, SessionHandle, Transport, TransportEvent, TransportOptions,
};
use tb_core::{EndpointDescriptor, TransportError};

use crate::credentials::CredentialNegotiator;

/// A live session handle together with its event subscription.
///
/// Dropping a `LiveSession` is its teardown: the subscription is closed
/// first so nothing from this generation is seen again, then the handle is
/// disconnected. Disconnect failures are logged and swallowed. Because this
/// happens in `Drop`, it runs exactly once on every exit path.
pub(crate) struct LiveSession {
    /// Activation counter value this handle belongs to
    pub(crate) generation: u64,
    /// Target this handle was created for
    pub(crate) descriptor: EndpointDescriptor,
    /// The transport connection
    pub(crate) handle: Box<dyn SessionHandle>,
    /// Events emitted by `handle`
    events: EventReceiver,
    /// Credential state for this attempt
    pub(crate) negotiator: CredentialNegotiator,
}

impl LiveSession {
    /// Create a handle for `descriptor` and subscribe to its events
    pub(crate) fn open(
        transport: &dyn Transport,
        surface: Arc<dyn DisplaySurface>,
        descriptor: EndpointDescriptor,
        generation: u64,
    ) -> Result<Self, TransportError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let handle = transport.open(
            surface,
            &descriptor.address,
            &TransportOptions::default(),
            event_tx,
        )?;

        let negotiator = CredentialNegotiator::new(descriptor.secret.clone());
        Ok(Self {
            generation,
            descriptor,
            handle,
            events: event_rx,
            negotiator,
        })
    }

    /// Wait for the next event. `None` means the handle dropped its sender.
    pub(crate) async fn recv(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Take an already-queued event without waiting
    pub(crate) fn try_recv(&mut self) -> Result<TransportEvent, mpsc::error::TryRecvError> {
        self.events.try_recv()
    }

    /// Borrow the handle
    pub(crate) fn handle_mut(&mut self) -> &mut dyn SessionHandle {
        self.handle.as_mut()
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.events.close();
        if let Err(e) = self.handle.disconnect() {
            tracing::debug!(
                "Ignoring disconnect error during teardown of generation {}: {}",
                self.generation,
                e
            );
        }
    }
}
