//! Render target trait

use crate::error::SurfaceError;

/// A mounted region the remote display is drawn into.
///
/// The surface must exist before a session is activated and stay valid
/// until it is deactivated.
pub trait DisplaySurface: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Give keyboard focus to the surface
    fn focus(&self) -> Result<(), SurfaceError>;
}
