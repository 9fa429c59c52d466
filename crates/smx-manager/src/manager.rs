// ABOUTME: Central facade composing the pane registry and layout tree.
// ABOUTME: Coordinates spawn, arrangement, input routing, and resize propagation.

use std::collections::{HashMap, HashSet};

use tokio::sync::mpsc;

use smx_core::{Config, PaneId, PaneSize, Rect, SpawnConfig};
use smx_layout::{AutoArranger, LayoutError, LayoutKind, LayoutNode};
use smx_session::{PaneEvent, PaneSession, PaneState};

use crate::error::{PaneError, Result};
use crate::registry::PaneRegistry;

/// Owns every pane and the layout tree binding them to screen regions.
///
/// All mutation happens through this single control path; reads of
/// [`areas`](PaneManager::areas) during a render pass are safe alongside
/// concurrently accumulating pane output.
pub struct PaneManager {
    config: Config,
    registry: PaneRegistry,
    /// Current layout tree; `None` until panes are arranged.
    layout: Option<LayoutNode>,
    /// Root rectangle pushed in by the host.
    terminal_size: Option<Rect>,
    /// Geometry computed from the layout for the current root.
    cached_areas: HashMap<PaneId, Rect>,
    /// Spawn order, used by the auto arranger.
    pane_order: Vec<PaneId>,
    focused: Option<PaneId>,
    event_tx: mpsc::UnboundedSender<PaneEvent>,
    event_rx: mpsc::UnboundedReceiver<PaneEvent>,
}

impl PaneManager {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            config,
            registry: PaneRegistry::new(),
            layout: None,
            terminal_size: None,
            cached_areas: HashMap::new(),
            pane_order: Vec::new(),
            focused: None,
            event_tx,
            event_rx,
        }
    }

    /// Spawn a new pane process.
    ///
    /// When the config carries no size, one is estimated from the current
    /// terminal geometry. The pane is registered but not placed in the
    /// layout until the next [`auto_arrange`](Self::auto_arrange) or
    /// [`set_layout`](Self::set_layout) call. A spawn failure leaves the
    /// registry and layout exactly as they were.
    pub fn spawn(&mut self, config: SpawnConfig) -> Result<PaneId> {
        let mut config = config;
        if config.size.is_none() {
            config.size = Some(self.estimate_spawn_size());
        }
        if config.command.is_none() {
            config.command = self.config.default_shell.clone();
        }

        let id = self.registry.next_id();
        let session = PaneSession::spawn(
            id,
            &config,
            self.config.graceful_timeout(),
            self.event_tx.clone(),
        )?;
        self.registry.insert(session);
        self.pane_order.push(id);

        if self.focused.is_none() {
            self.focused = Some(id);
        }

        tracing::debug!("spawned pane {}", id);
        Ok(id)
    }

    /// Rebuild the layout from the registered panes, in spawn order.
    pub fn auto_arrange(&mut self, kind: LayoutKind) -> Result<()> {
        let tree = match kind {
            LayoutKind::MainSub => {
                let main_len = self.pane_order.len().div_ceil(2);
                AutoArranger::main_sub(
                    &self.pane_order[..main_len],
                    &self.pane_order[main_len..],
                    self.config.main_sub_ratio,
                )
            }
            _ => AutoArranger::arrange(kind, &self.pane_order),
        };

        match tree {
            Some(tree) => self.apply_layout(tree),
            None => {
                self.layout = None;
                self.cached_areas.clear();
                Ok(())
            }
        }
    }

    /// Install an explicit layout tree.
    ///
    /// Every leaf must reference a distinct registered pane; otherwise the
    /// call fails with [`LayoutError::UnknownPane`] or
    /// [`LayoutError::DuplicatePane`] and the previous layout stays in
    /// place.
    pub fn set_layout(&mut self, tree: LayoutNode) -> Result<()> {
        let mut seen = HashSet::new();
        for id in tree.pane_ids() {
            if !self.registry.contains(id) {
                return Err(LayoutError::UnknownPane(id).into());
            }
            if !seen.insert(id) {
                return Err(LayoutError::DuplicatePane(id).into());
            }
        }
        self.apply_layout(tree)
    }

    /// Push new terminal dimensions into the manager.
    ///
    /// This is the single path keeping layout geometry and PTY sizes
    /// consistent. All-or-nothing: the new geometry is validated before
    /// any session is resized, and an unchanged size returns without
    /// reissuing resizes.
    pub fn set_terminal_size(&mut self, root: Rect) -> Result<()> {
        if self.terminal_size == Some(root) {
            return Ok(());
        }
        if let Some(tree) = &self.layout {
            let areas = tree.compute(root)?;
            self.terminal_size = Some(root);
            self.cached_areas = areas;
            self.resize_sessions();
        } else {
            self.terminal_size = Some(root);
            self.cached_areas.clear();
        }
        Ok(())
    }

    /// Current render geometry: one rectangle per placed pane.
    pub fn areas(&self) -> &HashMap<PaneId, Rect> {
        &self.cached_areas
    }

    /// Route raw input to a pane. Input to an exited pane is a no-op.
    pub fn send_input(&self, id: PaneId, bytes: &[u8]) -> Result<()> {
        let session = self.registry.get(id).ok_or(PaneError::NotFound(id))?;
        session.write(bytes)?;
        Ok(())
    }

    /// Route raw input to the focused pane.
    pub fn focused_send_input(&self, bytes: &[u8]) -> Result<()> {
        let id = self.focused.ok_or(PaneError::NoFocusedPane)?;
        self.send_input(id, bytes)
    }

    /// Drain a pane's buffered output chunks. Never blocks.
    pub fn poll_output(&mut self, id: PaneId) -> Result<Vec<Vec<u8>>> {
        let session = self.registry.get_mut(id).ok_or(PaneError::NotFound(id))?;
        Ok(session.poll_output())
    }

    /// Drain pending exit/crash notifications. Never blocks.
    pub fn poll_events(&mut self) -> Vec<PaneEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Remove a pane from both the registry and the layout.
    ///
    /// The vacated leaf's sibling takes over its rectangle, so the
    /// remaining tree still tiles the root. The terminated session is
    /// returned for final-state inspection.
    pub fn remove(&mut self, id: PaneId) -> Option<PaneSession> {
        let session = self.registry.remove(id)?;
        self.pane_order.retain(|&p| p != id);

        if let Some(tree) = self.layout.take() {
            self.layout = tree.remove(id);
        }
        if self.focused == Some(id) {
            self.focused = self.pane_order.first().copied();
        }

        self.refresh_areas();
        tracing::debug!("removed pane {}", id);
        Some(session)
    }

    pub fn focused(&self) -> Option<PaneId> {
        self.focused
    }

    pub fn set_focus(&mut self, id: PaneId) {
        if self.registry.contains(id) {
            self.focused = Some(id);
        }
    }

    /// Cycle focus to the next pane in spawn order.
    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    /// Cycle focus to the previous pane in spawn order.
    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, step: isize) {
        if self.pane_order.is_empty() {
            return;
        }
        let len = self.pane_order.len() as isize;
        let pos = self
            .focused
            .and_then(|id| self.pane_order.iter().position(|&p| p == id))
            .unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(len) as usize;
        self.focused = Some(self.pane_order[next]);
    }

    /// Which pane's rectangle contains the cell at (x, y), if any.
    pub fn pane_at_position(&self, x: u16, y: u16) -> Option<PaneId> {
        self.cached_areas
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| *id)
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.registry.ids()
    }

    pub fn pane_count(&self) -> usize {
        self.registry.len()
    }

    pub fn state(&self, id: PaneId) -> Option<PaneState> {
        self.registry.get(id).map(PaneSession::state)
    }

    /// Terminate and reap every remaining session.
    pub fn shutdown(&mut self) {
        for id in self.registry.ids() {
            self.registry.remove(id);
        }
        self.pane_order.clear();
        self.layout = None;
        self.cached_areas.clear();
        self.focused = None;
    }

    /// Commit a validated tree, recomputing geometry when the root is known.
    fn apply_layout(&mut self, tree: LayoutNode) -> Result<()> {
        if let Some(root) = self.terminal_size {
            let areas = tree.compute(root)?;
            self.layout = Some(tree);
            self.cached_areas = areas;
            self.resize_sessions();
        } else {
            self.layout = Some(tree);
            self.cached_areas.clear();
        }
        Ok(())
    }

    /// Recompute cached geometry after a structural change.
    fn refresh_areas(&mut self) {
        match (&self.layout, self.terminal_size) {
            (Some(tree), Some(root)) => match tree.compute(root) {
                Ok(areas) => {
                    self.cached_areas = areas;
                    self.resize_sessions();
                }
                Err(e) => {
                    tracing::error!("layout no longer fits root: {}", e);
                    self.cached_areas.clear();
                }
            },
            _ => self.cached_areas.clear(),
        }
    }

    /// Push each placed pane's rectangle into its PTY. A resize failure
    /// degrades that pane only.
    fn resize_sessions(&mut self) {
        for (id, rect) in &self.cached_areas {
            if let Some(session) = self.registry.get_mut(*id) {
                if let Err(e) = session.resize(PaneSize::from(*rect)) {
                    tracing::warn!("pane {} resize failed: {}", id, e);
                }
            }
        }
    }

    /// Size a new pane would get under the auto arrangement, once placed.
    fn estimate_spawn_size(&self) -> PaneSize {
        let Some(root) = self.terminal_size else {
            return self.config.default_size;
        };
        let count = self.pane_order.len() as u64 + 1;
        let hypothetical: Vec<PaneId> = (0..count).map(PaneId).collect();
        let Some(tree) = AutoArranger::arrange(LayoutKind::Auto, &hypothetical) else {
            return self.config.default_size;
        };
        tree.compute(root)
            .ok()
            .and_then(|areas| areas.get(&PaneId(count - 1)).copied())
            .map_or(self.config.default_size, PaneSize::from)
    }
}

impl Default for PaneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PaneManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
