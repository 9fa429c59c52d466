// ABOUTME: Top-level pane manager for splitmux.
// ABOUTME: Composes the registry and layout tree into the public facade.

mod error;
mod manager;
mod registry;

pub use error::{PaneError, Result};
pub use manager::PaneManager;
pub use registry::PaneRegistry;

// Re-export the API surface hosts need alongside the manager.
pub use smx_core::{Config, PaneId, PaneSize, Rect, SpawnConfig};
pub use smx_layout::{AutoArranger, LayoutError, LayoutKind, LayoutNode, Orientation};
pub use smx_session::{PaneEvent, PaneSession, PaneState, SpawnError};
