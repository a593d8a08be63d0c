//! Focus and input routing
//!
//! Input reaches the remote machine only while the display is visible,
//! interactive, and has been focused by a pointer press. Switching to
//! view-only stops routing but leaves the connection alone.

use tb_core::traits::{DisplaySurface, InputEvent, SessionHandle};
use tb_core::SessionOptions;

/// Tracks whether local input is captured by the live session
#[derive(Debug, Default)]
pub struct FocusRouter {
    visible: bool,
    interactive: bool,
    captured: bool,
}

impl FocusRouter {
    /// Create a router with nothing visible
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply new host options. Hiding the display releases capture.
    pub fn update(&mut self, options: SessionOptions) {
        self.visible = options.visible;
        self.interactive = options.interactive;
        if !self.visible {
            self.release();
        }
    }

    /// Whether input is currently captured
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether input would currently be forwarded
    pub fn is_routing(&self) -> bool {
        self.visible && self.interactive && self.captured
    }

    /// Drop input capture
    pub fn release(&mut self) {
        if self.captured {
            tracing::debug!("Releasing input capture");
        }
        self.captured = false;
    }

    /// Handle a pointer press on the display surface.
    ///
    /// Focus goes to both the surface and the handle. Either may refuse, and
    /// the handle may not exist yet; none of that is an error.
    pub fn pointer_down(
        &mut self,
        surface: &dyn DisplaySurface,
        handle: Option<&mut dyn SessionHandle>,
    ) -> bool {
        if !self.visible {
            return false;
        }

        if let Err(e) = surface.focus() {
            tracing::debug!("Surface {} did not take focus: {}", surface.name(), e);
        }

        if let Some(handle) = handle {
            if let Err(e) = handle.focus() {
                tracing::debug!("Session handle did not take focus: {}", e);
            }
        }

        self.captured = true;
        true
    }

    /// Forward `input` to the handle if routing is active
    pub fn route_input(&self, handle: Option<&mut dyn SessionHandle>, input: InputEvent) -> bool {
        if !self.is_routing() {
            return false;
        }

        let Some(handle) = handle else {
            return false;
        };

        match handle.send_input(input) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to forward input: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tb_core::error::SurfaceError;

    #[derive(Default)]
    struct Surface {
        focused: AtomicUsize,
        refuse: bool,
    }

    impl DisplaySurface for Surface {
        fn name(&self) -> &str {
            "test"
        }

        fn focus(&self) -> Result<(), SurfaceError> {
            if self.refuse {
                return Err(SurfaceError::NotMounted);
            }
            self.focused.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_pointer_down_ignored_when_hidden() {
        let surface = Surface::default();
        let mut router = FocusRouter::new();
        router.update(SessionOptions::hidden());

        assert!(!router.pointer_down(&surface, None));
        assert_eq!(surface.focused.load(Ordering::SeqCst), 0);
        assert!(!router.is_captured());
    }

    #[test]
    fn test_pointer_down_without_handle_still_captures() {
        let surface = Surface::default();
        let mut router = FocusRouter::new();
        router.update(SessionOptions::interactive());

        assert!(router.pointer_down(&surface, None));
        assert!(router.pointer_down(&surface, None));
        assert_eq!(surface.focused.load(Ordering::SeqCst), 2);
        assert!(router.is_routing());
    }

    #[test]
    fn test_surface_refusal_is_tolerated() {
        let surface = Surface {
            refuse: true,
            ..Default::default()
        };
        let mut router = FocusRouter::new();
        router.update(SessionOptions::interactive());

        assert!(router.pointer_down(&surface, None));
    }

    #[test]
    fn test_view_only_stops_routing_but_keeps_capture() {
        let surface = Surface::default();
        let mut router = FocusRouter::new();
        router.update(SessionOptions::interactive());
        router.pointer_down(&surface, None);

        router.update(SessionOptions::view_only());
        assert!(router.is_captured());
        assert!(!router.is_routing());
        assert!(!router.route_input(None, InputEvent::Key { keysym: 0x61, down: true }));
    }

    #[test]
    fn test_hiding_releases_capture() {
        let surface = Surface::default();
        let mut router = FocusRouter::new();
        router.update(SessionOptions::interactive());
        router.pointer_down(&surface, None);

        router.update(SessionOptions::hidden());
        assert!(!router.is_captured());
    }
}
