// ABOUTME: Sole owner of pane session lifetimes.
// ABOUTME: Maps pane ids to sessions and hands out ids that are never reused.

use std::collections::HashMap;

use smx_core::PaneId;
use smx_session::PaneSession;

/// Owns every [`PaneSession`] and assigns their identifiers.
///
/// Mutated only from the manager's single control path.
pub struct PaneRegistry {
    sessions: HashMap<PaneId, PaneSession>,
    next_id: u64,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Hand out a fresh identifier. Ids are monotonic and never reused
    /// within this registry's lifetime, even after removal.
    pub fn next_id(&mut self) -> PaneId {
        let id = PaneId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take ownership of a session, keyed by the id it was spawned with.
    pub fn insert(&mut self, session: PaneSession) -> PaneId {
        let id = session.id();
        self.sessions.insert(id, session);
        id
    }

    /// Detach a session, terminating its process if still running.
    ///
    /// Returns ownership so the caller can inspect the final state.
    pub fn remove(&mut self, id: PaneId) -> Option<PaneSession> {
        let mut session = self.sessions.remove(&id)?;
        session.terminate();
        Some(session)
    }

    pub fn get(&self, id: PaneId) -> Option<&PaneSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: PaneId) -> Option<&mut PaneSession> {
        self.sessions.get_mut(&id)
    }

    pub fn contains(&self, id: PaneId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// All registered ids, sorted.
    pub fn ids(&self) -> Vec<PaneId> {
        let mut ids: Vec<PaneId> = self.sessions.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for PaneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smx_core::SpawnConfig;
    use smx_session::DEFAULT_GRACEFUL_TIMEOUT;
    use tokio::sync::mpsc;

    fn spawn_session(registry: &mut PaneRegistry) -> PaneId {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let id = registry.next_id();
        let session = PaneSession::spawn(
            id,
            &SpawnConfig::new().command("/bin/sh"),
            DEFAULT_GRACEFUL_TIMEOUT,
            event_tx,
        )
        .expect("spawn shell");
        registry.insert(session)
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let mut registry = PaneRegistry::new();
        let first = spawn_session(&mut registry);
        let second = spawn_session(&mut registry);
        assert!(second > first);

        registry.remove(second);
        let third = spawn_session(&mut registry);
        assert!(third > second, "removed id must not be reused");
    }

    #[test]
    fn remove_terminates_and_returns_the_session() {
        let mut registry = PaneRegistry::new();
        let id = spawn_session(&mut registry);

        let session = registry.remove(id).expect("session returned");
        assert!(!registry.contains(id));
        assert!(registry.is_empty());
        // terminate() has run; the process is gone or going.
        drop(session);
    }

    #[test]
    fn remove_unknown_id_is_none() {
        let mut registry = PaneRegistry::new();
        assert!(registry.remove(PaneId(42)).is_none());
    }

    #[test]
    fn ids_are_sorted() {
        let mut registry = PaneRegistry::new();
        let a = spawn_session(&mut registry);
        let b = spawn_session(&mut registry);
        let c = spawn_session(&mut registry);
        assert_eq!(registry.ids(), vec![a, b, c]);
        assert_eq!(registry.len(), 3);
    }
}
