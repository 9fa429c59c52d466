// ABOUTME: Events emitted by pane sessions.
// ABOUTME: Exit and crash notifications surfaced as data, never as control-path errors.

use smx_core::PaneId;

/// Notifications published by a session's monitor thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    /// The process exited with the given code.
    Exited { pane_id: PaneId, code: i32 },

    /// The process could not be monitored to completion.
    Crashed { pane_id: PaneId, error: String },
}
