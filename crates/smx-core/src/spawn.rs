// ABOUTME: Spawn configuration for pane processes.
// ABOUTME: Builder-style settings for command, args, cwd, env, and initial size.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::geometry::PaneSize;

/// Configuration for spawning a new pane process.
#[derive(Debug, Clone, Default)]
pub struct SpawnConfig {
    /// Command to run. `None` means the default shell.
    pub command: Option<String>,

    /// Arguments passed to the command.
    pub args: Vec<String>,

    /// Initial PTY size. `None` lets the manager pick one from the
    /// current terminal geometry.
    pub size: Option<PaneSize>,

    /// Working directory for the process.
    pub cwd: Option<PathBuf>,

    /// Additional environment variables.
    pub env: HashMap<String, String>,
}

impl SpawnConfig {
    /// Config that runs the default shell.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn command(mut self, cmd: impl Into<String>) -> Self {
        self.command = Some(cmd.into());
        self
    }

    #[must_use]
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn size(mut self, size: PaneSize) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains() {
        let config = SpawnConfig::new()
            .command("htop")
            .args(vec!["-d".to_string(), "10".to_string()])
            .size(PaneSize::new(24, 80))
            .cwd("/tmp")
            .env("TERM", "xterm-256color");

        assert_eq!(config.command.as_deref(), Some("htop"));
        assert_eq!(config.args.len(), 2);
        assert_eq!(config.size, Some(PaneSize::new(24, 80)));
        assert_eq!(config.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(config.env.get("TERM").map(String::as_str), Some("xterm-256color"));
    }

    #[test]
    fn default_runs_shell() {
        let config = SpawnConfig::new();
        assert!(config.command.is_none());
        assert!(config.size.is_none());
    }
}
