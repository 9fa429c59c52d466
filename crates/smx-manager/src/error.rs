// ABOUTME: Error taxonomy for manager operations.
// ABOUTME: Per-pane runtime failures are pane state, not errors; these are caller mistakes and I/O.

use thiserror::Error;

use smx_core::PaneId;
use smx_layout::LayoutError;
use smx_session::SpawnError;

pub type Result<T> = std::result::Result<T, PaneError>;

/// Errors raised by [`crate::PaneManager`] operations.
#[derive(Debug, Error)]
pub enum PaneError {
    /// No pane with that id is registered.
    #[error("pane not found: {0}")]
    NotFound(PaneId),

    /// Input routing was requested but no pane is focused.
    #[error("no pane is focused")]
    NoFocusedPane,

    /// Spawning the pane's process failed; other panes are unaffected.
    #[error(transparent)]
    Spawn(#[from] SpawnError),

    /// The requested layout or terminal size is invalid; state unchanged.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// I/O against a live session failed.
    #[error("pane I/O error: {0}")]
    Io(#[from] std::io::Error),
}
