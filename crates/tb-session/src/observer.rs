//! Owner notification

use tokio::sync::mpsc;

use tb_core::{DisconnectReason, LifecycleEvent, SessionError};

/// Receives lifecycle notifications from a [`SessionManager`](crate::SessionManager).
///
/// Callbacks run on the thread that drives the manager and must not call
/// back into it.
pub trait LifecycleObserver: Send {
    /// The remote desktop connected
    fn on_connect(&mut self) {}

    /// The transport closed the session
    fn on_disconnect(&mut self, _reason: DisconnectReason) {}

    /// An error was raised for the current session
    fn on_error(&mut self, _error: &SessionError) {}

    /// Dispatch an event to the matching callback
    fn notify(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Connected => self.on_connect(),
            LifecycleEvent::Disconnected { reason } => self.on_disconnect(reason),
            LifecycleEvent::Error(error) => self.on_error(&error),
        }
    }
}

/// Channel-based owners receive every event as a [`LifecycleEvent`]
impl LifecycleObserver for mpsc::UnboundedSender<LifecycleEvent> {
    fn notify(&mut self, event: LifecycleEvent) {
        if self.send(event).is_err() {
            tracing::debug!("Lifecycle event receiver dropped");
        }
    }

    fn on_connect(&mut self) {
        self.notify(LifecycleEvent::Connected);
    }

    fn on_disconnect(&mut self, reason: DisconnectReason) {
        self.notify(LifecycleEvent::Disconnected { reason });
    }

    fn on_error(&mut self, error: &SessionError) {
        self.notify(LifecycleEvent::Error(error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        connects: usize,
        disconnects: Vec<DisconnectReason>,
        errors: usize,
    }

    impl LifecycleObserver for Counter {
        fn on_connect(&mut self) {
            self.connects += 1;
        }

        fn on_disconnect(&mut self, reason: DisconnectReason) {
            self.disconnects.push(reason);
        }

        fn on_error(&mut self, _error: &SessionError) {
            self.errors += 1;
        }
    }

    #[test]
    fn test_notify_dispatches_to_callbacks() {
        let mut counter = Counter::default();
        counter.notify(LifecycleEvent::Connected);
        counter.notify(LifecycleEvent::Disconnected {
            reason: DisconnectReason::Unclean,
        });
        counter.notify(LifecycleEvent::Error(SessionError::CredentialMissing));

        assert_eq!(counter.connects, 1);
        assert_eq!(counter.disconnects, vec![DisconnectReason::Unclean]);
        assert_eq!(counter.errors, 1);
    }

    #[test]
    fn test_channel_observer_forwards_events() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.on_connect();
        tx.on_error(&SessionError::CredentialMissing);

        assert_eq!(rx.try_recv().unwrap(), LifecycleEvent::Connected);
        assert_eq!(
            rx.try_recv().unwrap(),
            LifecycleEvent::Error(SessionError::CredentialMissing)
        );
    }

    #[test]
    fn test_channel_observer_tolerates_dropped_receiver() {
        let (mut tx, rx) = mpsc::unbounded_channel::<LifecycleEvent>();
        drop(rx);
        tx.on_connect();
    }
}
