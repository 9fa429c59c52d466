// ABOUTME: Shared types and configuration for splitmux.
// ABOUTME: Defines pane identifiers, cell geometry, spawn configs, and config file handling.

pub mod config;
pub mod geometry;
pub mod spawn;

pub use config::{Config, ConfigError};
pub use geometry::{PaneId, PaneSize, Rect};
pub use spawn::SpawnConfig;
