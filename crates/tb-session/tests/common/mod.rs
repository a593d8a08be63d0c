//! Recording transport used by the lifecycle tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use tb_core::error::SurfaceError;
use tb_core::traits::{
    Credentials, DisplaySettings, DisplaySurface, EventSender, InputEvent, SessionHandle,
    Transport, TransportEvent, TransportOptions,
};
use tb_core::{LifecycleEvent, TransportError};
use tb_session::SessionManager;

/// Everything the mock transport has observed, shared with the test
#[derive(Default)]
pub struct Record {
    /// Ordered log of "open:<url>", "configure:<n>", "disconnect:<n>", ...
    pub log: Vec<String>,
    /// Event senders, indexed by handle number - 1
    pub senders: Vec<EventSender>,
    /// Passwords forwarded through `send_credentials`
    pub credentials: Vec<String>,
    /// View-only values, in the order they were set
    pub view_only: Vec<bool>,
    /// Inputs forwarded to any handle
    pub inputs: Vec<InputEvent>,
    /// Number of `focus` calls on any handle
    pub handle_focus: usize,
    pub fail_open: bool,
    pub fail_configure: bool,
    pub reject_credentials: bool,
    pub fail_disconnect: bool,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    record: Arc<Mutex<Record>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Record) -> R) -> R {
        let mut record = self.record.lock().unwrap();
        f(&mut record)
    }

    pub fn log(&self) -> Vec<String> {
        self.with(|r| r.log.clone())
    }

    pub fn opened(&self) -> usize {
        self.with(|r| r.senders.len())
    }

    pub fn credentials(&self) -> Vec<String> {
        self.with(|r| r.credentials.clone())
    }

    /// Emit an event from handle `n` (1-based). Returns whether anyone was listening.
    pub fn emit(&self, n: usize, event: TransportEvent) -> bool {
        let sender = self.with(|r| r.senders[n - 1].clone());
        sender.send(event).is_ok()
    }
}

impl Transport for MockTransport {
    fn open(
        &self,
        _surface: Arc<dyn DisplaySurface>,
        url: &str,
        options: &TransportOptions,
        events: EventSender,
    ) -> Result<Box<dyn SessionHandle>, TransportError> {
        assert!(options.focus_on_click);
        let mut record = self.record.lock().unwrap();
        if record.fail_open {
            record.log.push(format!("open-failed:{}", url));
            return Err(TransportError::Unavailable("module not found".into()));
        }
        record.senders.push(events);
        let id = record.senders.len();
        record.log.push(format!("open:{}", url));
        Ok(Box::new(MockHandle {
            id,
            record: Arc::clone(&self.record),
        }))
    }
}

struct MockHandle {
    id: usize,
    record: Arc<Mutex<Record>>,
}

impl SessionHandle for MockHandle {
    fn configure(&mut self, settings: &DisplaySettings) -> Result<(), TransportError> {
        let mut record = self.record.lock().unwrap();
        assert!(settings.scale_viewport);
        assert!(settings.resize_session);
        record.view_only.push(settings.view_only);
        record.log.push(format!("configure:{}", self.id));
        if record.fail_configure {
            return Err(TransportError::Other("canvas unavailable".into()));
        }
        Ok(())
    }

    fn set_view_only(&mut self, view_only: bool) {
        let mut record = self.record.lock().unwrap();
        record.view_only.push(view_only);
        record.log.push(format!("view-only:{}:{}", self.id, view_only));
    }

    fn send_credentials(&mut self, credentials: &Credentials) -> Result<(), TransportError> {
        let mut record = self.record.lock().unwrap();
        if record.reject_credentials {
            return Err(TransportError::CredentialsRejected("malformed".into()));
        }
        record.credentials.push(credentials.password.clone());
        Ok(())
    }

    fn focus(&mut self) -> Result<(), TransportError> {
        self.record.lock().unwrap().handle_focus += 1;
        Ok(())
    }

    fn send_input(&mut self, input: InputEvent) -> Result<(), TransportError> {
        self.record.lock().unwrap().inputs.push(input);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        let mut record = self.record.lock().unwrap();
        record.log.push(format!("disconnect:{}", self.id));
        if record.fail_disconnect {
            return Err(TransportError::NotConnected);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TestSurface {
    pub focused: AtomicUsize,
}

impl TestSurface {
    pub fn focus_count(&self) -> usize {
        self.focused.load(Ordering::SeqCst)
    }
}

impl DisplaySurface for TestSurface {
    fn name(&self) -> &str {
        "test-surface"
    }

    fn focus(&self) -> Result<(), SurfaceError> {
        self.focused.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub type TestManager = SessionManager<MockTransport, mpsc::UnboundedSender<LifecycleEvent>>;

pub struct Harness {
    pub manager: TestManager,
    pub transport: MockTransport,
    pub surface: Arc<TestSurface>,
    pub events: mpsc::UnboundedReceiver<LifecycleEvent>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(MockTransport::new())
    }

    pub fn with_transport(transport: MockTransport) -> Self {
        let surface = Arc::new(TestSurface::default());
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = SessionManager::new(transport.clone(), surface.clone(), tx);
        Self {
            manager,
            transport,
            surface,
            events: rx,
        }
    }

    /// Lifecycle events delivered so far
    pub fn delivered(&mut self) -> Vec<LifecycleEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }
}
