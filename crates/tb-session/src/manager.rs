//! Session lifecycle manager
//!
//! State machine:
//!
//! ```text
//! Idle -> Connecting -> Connected -> Disconnected(reason)
//!            |
//!            +--------> Failed(error)
//! ```
//!
//! `deactivate` (or activating a different target) returns to `Idle` from
//! any state and releases the handle. There is no automatic reconnect; the
//! host calls `activate` again to retry.
//!
//! The manager is driven from a single task. `activate` never waits on the
//! network; outcomes arrive through [`SessionManager::pump`] or
//! [`SessionManager::drain_pending`], which hand them to the observer.

use std::sync::Arc;

use tokio::sync::mpsc::error::TryRecvError;

use tb_core::traits::{DisplaySettings, DisplaySurface, InputEvent, Transport, TransportEvent};
use tb_core::{
    DisconnectReason, EndpointDescriptor, LifecycleEvent, SessionError, SessionOptions,
    SessionState,
};

use crate::focus::FocusRouter;
use crate::live::LiveSession;
use crate::observer::LifecycleObserver;

/// Owns the single live remote-desktop session
pub struct SessionManager<T: Transport, O: LifecycleObserver> {
    /// Factory for session handles
    transport: T,
    /// Render target, valid for the manager's lifetime
    surface: Arc<dyn DisplaySurface>,
    /// Owner notifications
    observer: O,
    /// The one "current session handle" slot
    slot: Option<LiveSession>,
    /// Lifecycle state
    state: SessionState,
    /// Last options supplied by the host
    options: SessionOptions,
    /// Input capture
    focus: FocusRouter,
    /// Incremented for every handle created
    generation: u64,
}

impl<T: Transport, O: LifecycleObserver> SessionManager<T, O> {
    /// Create an idle manager
    pub fn new(transport: T, surface: Arc<dyn DisplaySurface>, observer: O) -> Self {
        Self {
            transport,
            surface,
            observer,
            slot: None,
            state: SessionState::Idle,
            options: SessionOptions::hidden(),
            focus: FocusRouter::new(),
            generation: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Options last supplied by the host
    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Whether a handle is currently live
    pub fn is_live(&self) -> bool {
        self.slot.is_some()
    }

    /// Number of handles created so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Target of the live session, if any
    pub fn descriptor(&self) -> Option<&EndpointDescriptor> {
        self.slot.as_ref().map(|live| &live.descriptor)
    }

    /// Error describing the current state, if it is a failure or disconnect
    pub fn last_error(&self) -> Option<SessionError> {
        match &self.state {
            SessionState::Failed(error) => Some(error.clone()),
            SessionState::Disconnected(reason) => {
                Some(SessionError::TransportDisconnected { reason: *reason })
            }
            _ => None,
        }
    }

    /// Whether local input is currently forwarded
    pub fn is_routing_input(&self) -> bool {
        self.slot.is_some() && self.focus.is_routing()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Make the session match `descriptor` and `options`.
    ///
    /// With an empty address or `visible == false` any live session is torn
    /// down and nothing is created. Activating the target that is already
    /// live only applies the interactive flag. Any other change tears the old
    /// handle down before the new one is constructed, so two handles never
    /// exist at once.
    pub fn activate(&mut self, descriptor: EndpointDescriptor, options: SessionOptions) {
        if !options.visible || !descriptor.has_address() {
            tracing::debug!(
                "No session wanted (visible={}, address set={})",
                options.visible,
                descriptor.has_address()
            );
            self.deactivate();
            self.apply_options(options);
            return;
        }

        if self.descriptor() == Some(&descriptor) {
            tracing::debug!(
                "Session for {} already active (generation {})",
                descriptor.address,
                self.generation
            );
            self.apply_options(options);
            return;
        }

        self.deactivate();
        self.apply_options(options);

        self.generation += 1;
        let generation = self.generation;
        tracing::info!(
            "Opening remote session to {} (generation {}, interactive={})",
            descriptor.address,
            generation,
            options.interactive
        );

        let mut live = match LiveSession::open(
            &self.transport,
            Arc::clone(&self.surface),
            descriptor,
            generation,
        ) {
            Ok(live) => live,
            Err(e) => {
                self.fail(SessionError::ConstructionFailure {
                    detail: e.to_string(),
                });
                return;
            }
        };

        let settings = DisplaySettings::for_interactive(options.interactive);
        if let Err(e) = live.handle.configure(&settings) {
            // Dropping `live` disconnects the half-built handle.
            drop(live);
            self.fail(SessionError::ConstructionFailure {
                detail: e.to_string(),
            });
            return;
        }

        self.slot = Some(live);
        self.state = SessionState::Connecting;
    }

    /// Tear down the live session, if any, and return to `Idle`.
    ///
    /// Always safe to call. Events from the torn-down handle are never
    /// delivered afterwards.
    pub fn deactivate(&mut self) {
        self.focus.release();
        if let Some(live) = self.slot.take() {
            tracing::info!(
                "Closing remote session to {} (generation {})",
                live.descriptor.address,
                live.generation
            );
            drop(live);
        }
        self.state = SessionState::Idle;
    }

    /// Switch between interactive and view-only without reconnecting
    pub fn set_interactive(&mut self, interactive: bool) {
        self.apply_options(SessionOptions {
            interactive,
            ..self.options
        });
    }

    /// Pointer pressed on the display surface
    pub fn pointer_down(&mut self) -> bool {
        let handle = self.slot.as_mut().map(|live| live.handle_mut());
        self.focus.pointer_down(self.surface.as_ref(), handle)
    }

    /// Forward local input to the remote machine. Returns whether it was sent.
    pub fn send_input(&mut self, input: InputEvent) -> bool {
        let handle = self.slot.as_mut().map(|live| live.handle_mut());
        self.focus.route_input(handle, input)
    }

    /// Process the next event from the live handle.
    ///
    /// Waits forever while no session is live, so it can sit in a
    /// `tokio::select!` next to the host's own inputs.
    pub async fn pump(&mut self) {
        let event = match self.slot.as_mut() {
            Some(live) => live.recv().await,
            None => std::future::pending().await,
        };

        match event {
            Some(event) => self.handle_event(event),
            None => self.handle_lost(),
        }
    }

    /// Process every event already queued by the live handle.
    ///
    /// Returns the number of events processed.
    pub fn drain_pending(&mut self) -> usize {
        let mut processed = 0;
        loop {
            let next = match self.slot.as_mut() {
                Some(live) => live.try_recv(),
                None => break,
            };

            match next {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.handle_lost(),
            }
            processed += 1;
        }
        processed
    }

    fn apply_options(&mut self, options: SessionOptions) {
        if let Some(live) = self.slot.as_mut() {
            if options.interactive != self.options.interactive {
                tracing::debug!(
                    "Setting view-only={} on generation {}",
                    !options.interactive,
                    live.generation
                );
                live.handle.set_view_only(!options.interactive);
            }
        }
        self.options = options;
        self.focus.update(options);
    }

    fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connect => {
                if self.state != SessionState::Connecting {
                    tracing::warn!("Ignoring connect event in state {}", self.state);
                    return;
                }
                tracing::info!(
                    "Remote session connected (generation {}, view-only={})",
                    self.generation,
                    !self.options.interactive
                );
                self.state = SessionState::Connected;
                self.observer.notify(LifecycleEvent::Connected);
            }

            TransportEvent::Disconnect { clean } => {
                self.finish(DisconnectReason::from_clean(clean));
            }

            TransportEvent::CredentialsRequired { types } => {
                tracing::debug!("Credentials required: {:?}", types);
                let Some(live) = self.slot.as_mut() else {
                    return;
                };
                if let Err(error) = live.negotiator.respond(live.handle.as_mut()) {
                    tracing::warn!("{}", error);
                    self.observer.notify(LifecycleEvent::Error(error));
                }
            }

            TransportEvent::Error { detail } => {
                let error = SessionError::UnknownTransport { detail };
                tracing::warn!("{}", error);
                self.observer.notify(LifecycleEvent::Error(error));
            }
        }
    }

    /// The handle dropped its event sender without reporting a disconnect
    fn handle_lost(&mut self) {
        tracing::warn!(
            "Session handle for generation {} went away without a disconnect event",
            self.generation
        );
        self.finish(DisconnectReason::Unclean);
    }

    fn finish(&mut self, reason: DisconnectReason) {
        tracing::warn!(
            "Remote session disconnected: {} (generation {})",
            reason,
            self.generation
        );
        self.focus.release();
        if let Some(live) = self.slot.take() {
            drop(live);
        }
        self.state = SessionState::Disconnected(reason);
        self.observer.notify(LifecycleEvent::Disconnected { reason });
    }

    fn fail(&mut self, error: SessionError) {
        tracing::error!("{}", error);
        self.state = SessionState::Failed(error.clone());
        self.observer.notify(LifecycleEvent::Error(error));
    }
}

impl<T: Transport, O: LifecycleObserver> Drop for SessionManager<T, O> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
