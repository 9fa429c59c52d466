// ABOUTME: PTY handling for splitmux panes.
// ABOUTME: Spawns processes on pseudo-terminals and isolates their failures.

mod error;
mod event;
mod session;

pub use error::SpawnError;
pub use event::PaneEvent;
pub use session::{PaneSession, PaneState, DEFAULT_GRACEFUL_TIMEOUT};
