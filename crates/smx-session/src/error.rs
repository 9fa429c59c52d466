// ABOUTME: Spawn error type for PTY session creation.
// ABOUTME: Failures here are local to one pane and never fatal to siblings.

use thiserror::Error;

/// Errors from creating a PTY-backed session.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The OS refused to allocate a pseudo-terminal.
    #[error("failed to open PTY: {0}")]
    PtyOpen(String),

    /// The process could not be launched (e.g. executable not found).
    #[error("failed to spawn process: {0}")]
    Spawn(String),

    /// The PTY reader or writer could not be acquired.
    #[error("failed to acquire PTY I/O channels: {0}")]
    PtyIo(String),
}
