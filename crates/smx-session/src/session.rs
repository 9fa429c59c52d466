// ABOUTME: A single process bound to a PTY, with buffered I/O and exit monitoring.
// ABOUTME: Reader, writer, and monitor run on dedicated threads so panes never block each other.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use portable_pty::{native_pty_system, ChildKiller, CommandBuilder, MasterPty, PtySize};
use tokio::sync::{mpsc, watch};

use smx_core::{PaneId, PaneSize, SpawnConfig};

use crate::error::SpawnError;
use crate::event::PaneEvent;

/// How long `terminate` waits for a graceful exit before killing.
pub const DEFAULT_GRACEFUL_TIMEOUT: Duration = Duration::from_secs(2);

const READ_BUF_SIZE: usize = 4096;
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Current state of a pane's process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneState {
    /// Process is running.
    Running,

    /// Process exited with the given code.
    Exited { code: i32 },

    /// The process could not be monitored to completion.
    Crashed { error: String },
}

impl PaneState {
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// One process attached to its own pseudo-terminal.
///
/// Output accumulates in an unbounded per-pane buffer while the process
/// runs; `poll_output` drains it without ever blocking. A session whose
/// process has exited accepts `write` and `resize` as successful no-ops so
/// a dead pane cannot cascade errors into its siblings.
pub struct PaneSession {
    id: PaneId,
    size: PaneSize,
    /// Dropped on terminate; closing the master hangs up the child's terminal.
    master: Option<Box<dyn MasterPty + Send>>,
    killer: Box<dyn ChildKiller + Send + Sync>,
    input_tx: Option<mpsc::UnboundedSender<Vec<u8>>>,
    output_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    state_rx: watch::Receiver<PaneState>,
    graceful_timeout: Duration,
}

impl PaneSession {
    /// Allocate a PTY, launch the configured process on it, and start the
    /// I/O and monitor threads.
    ///
    /// A failure here never affects other sessions.
    pub fn spawn(
        id: PaneId,
        config: &SpawnConfig,
        graceful_timeout: Duration,
        event_tx: mpsc::UnboundedSender<PaneEvent>,
    ) -> Result<Self, SpawnError> {
        let size = config.size.unwrap_or(PaneSize::new(24, 80));

        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: size.rows,
                cols: size.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| SpawnError::PtyOpen(e.to_string()))?;

        let mut cmd = match &config.command {
            Some(program) => CommandBuilder::new(program),
            None => CommandBuilder::new(default_shell()),
        };
        for arg in &config.args {
            cmd.arg(arg);
        }
        if let Some(cwd) = &config.cwd {
            cmd.cwd(cwd);
        }
        for (key, value) in &config.env {
            cmd.env(key, value);
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| SpawnError::Spawn(e.to_string()))?;
        // The slave side lives on inside the child; our copy is done.
        drop(pair.slave);

        let killer = child.clone_killer();

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| SpawnError::PtyIo(e.to_string()))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|e| SpawnError::PtyIo(e.to_string()))?;

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PaneState::Running);

        spawn_reader_thread(id, reader, output_tx);
        spawn_writer_thread(id, writer, input_rx);
        spawn_monitor_thread(id, child, state_tx, event_tx);

        Ok(Self {
            id,
            size,
            master: Some(pair.master),
            killer,
            input_tx: Some(input_tx),
            output_rx,
            state_rx,
            graceful_timeout,
        })
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    /// Last size requested for the PTY.
    pub fn size(&self) -> PaneSize {
        self.size
    }

    pub fn state(&self) -> PaneState {
        self.state_rx.borrow().clone()
    }

    pub fn is_alive(&self) -> bool {
        self.state().is_alive()
    }

    /// Exit code, once the process has exited.
    pub fn exit_code(&self) -> Option<i32> {
        match self.state() {
            PaneState::Exited { code } => Some(code),
            _ => None,
        }
    }

    /// Queue raw input for the process.
    ///
    /// Never blocks. Writing to an exited or terminated session is a
    /// successful no-op.
    pub fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        if !self.is_alive() {
            return Ok(());
        }
        let Some(tx) = &self.input_tx else {
            return Ok(());
        };
        tx.send(bytes.to_vec()).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pane input channel closed")
        })
    }

    /// Update the PTY window size.
    ///
    /// Resizing an exited or terminated session is a successful no-op, and
    /// an unchanged size skips the OS call entirely.
    pub fn resize(&mut self, size: PaneSize) -> std::io::Result<()> {
        if !self.is_alive() {
            return Ok(());
        }
        if size == self.size {
            return Ok(());
        }
        let Some(master) = &self.master else {
            return Ok(());
        };
        master
            .resize(PtySize {
                rows: size.rows,
                cols: size.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(std::io::Error::other)?;
        self.size = size;
        Ok(())
    }

    /// Drain whatever output has accumulated since the last call.
    ///
    /// Returns an empty vec when nothing is pending; never blocks. Final
    /// bytes remain drainable after the process exits.
    pub fn poll_output(&mut self) -> Vec<Vec<u8>> {
        let mut chunks = Vec::new();
        while let Ok(chunk) = self.output_rx.try_recv() {
            chunks.push(chunk);
        }
        chunks
    }

    /// Request graceful termination, killing the process if it has not
    /// exited within the session's grace period (2s by default).
    ///
    /// Idempotent; blocks at most for the grace period.
    pub fn terminate(&mut self) {
        // Hang up the terminal: closing the writer and the master delivers
        // EOF/SIGHUP to the child.
        self.input_tx.take();
        self.master.take();

        let deadline = Instant::now() + self.graceful_timeout;
        while self.is_alive() {
            if Instant::now() >= deadline {
                tracing::warn!("pane {} did not exit within grace period, killing", self.id);
                if let Err(e) = self.killer.kill() {
                    tracing::debug!("pane {} kill failed: {}", self.id, e);
                }
                return;
            }
            std::thread::sleep(EXIT_POLL_INTERVAL);
        }
    }
}

impl Drop for PaneSession {
    fn drop(&mut self) {
        // Safety net for panes dropped without terminate: reap immediately
        // rather than waiting out the grace period.
        if self.is_alive() {
            let _ = self.killer.kill();
        }
    }
}

impl std::fmt::Debug for PaneSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaneSession")
            .field("id", &self.id)
            .field("size", &self.size)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// The user's default shell.
fn default_shell() -> String {
    if cfg!(windows) {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
}

fn spawn_reader_thread(
    id: PaneId,
    mut reader: Box<dyn Read + Send>,
    output_tx: mpsc::UnboundedSender<Vec<u8>>,
) {
    std::thread::spawn(move || {
        let mut buf = [0u8; READ_BUF_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if output_tx.send(buf[..n].to_vec()).is_err() {
                        // Session dropped; nobody will drain this output.
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!("pane {} PTY read error: {}", id, e);
                    break;
                }
            }
        }
        tracing::debug!("pane {} reader thread finished", id);
    });
}

fn spawn_writer_thread(
    id: PaneId,
    mut writer: Box<dyn Write + Send>,
    mut input_rx: mpsc::UnboundedReceiver<Vec<u8>>,
) {
    std::thread::spawn(move || {
        while let Some(data) = input_rx.blocking_recv() {
            if let Err(e) = writer.write_all(&data).and_then(|()| writer.flush()) {
                tracing::debug!("pane {} PTY write error: {}", id, e);
                break;
            }
        }
        tracing::debug!("pane {} writer thread finished", id);
    });
}

fn spawn_monitor_thread(
    id: PaneId,
    mut child: Box<dyn portable_pty::Child + Send + Sync>,
    state_tx: watch::Sender<PaneState>,
    event_tx: mpsc::UnboundedSender<PaneEvent>,
) {
    std::thread::spawn(move || {
        match child.wait() {
            Ok(status) => {
                let code = status.exit_code() as i32;
                let _ = state_tx.send(PaneState::Exited { code });
                let _ = event_tx.send(PaneEvent::Exited { pane_id: id, code });
                tracing::debug!("pane {} exited with code {}", id, code);
            }
            Err(e) => {
                let error = e.to_string();
                let _ = state_tx.send(PaneState::Crashed {
                    error: error.clone(),
                });
                let _ = event_tx.send(PaneEvent::Crashed { pane_id: id, error });
                tracing::debug!("pane {} monitor failed: {}", id, e);
            }
        }
    });
}
