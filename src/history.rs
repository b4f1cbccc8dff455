//! Snapshot-based undo/redo over the combined (nodes, edges) state.
//!
//! The history is a linear sequence of fully independent snapshots plus a
//! cursor. Recording truncates any redo branch beyond the cursor and skips
//! states structurally equal to the one under the cursor. Everything handed
//! in or out is deep-copied — snapshots never share mutable substructure
//! with the live model or with each other.

use log::{debug, trace};

use crate::model::{ComponentNode, Connection};

/// One fully independent copy of the diagram's node/edge state.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub nodes: Vec<ComponentNode>,
    pub edges: Vec<Connection>,
}

impl Snapshot {
    /// Deep-copy the given live state into a snapshot. `Vec<ComponentNode>`
    /// and `Vec<Connection>` own all their data, so `to_vec` is a full
    /// structural clone.
    pub fn capture(nodes: &[ComponentNode], edges: &[Connection]) -> Self {
        Self {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        }
    }
}

/// Linear undo/redo history. Always holds at least the initial snapshot.
#[allow(clippy::len_without_is_empty)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Seed the history with the initial state as snapshot 0. The initial
    /// snapshot is never removed.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Record a settled state.
    ///
    /// The state is deep-copied and compared structurally to the snapshot
    /// under the cursor; if identical the call is a no-op. Otherwise any
    /// snapshots beyond the cursor (the redo branch) are discarded, the new
    /// snapshot is appended, and the cursor advances to it.
    ///
    /// Returns `true` if a snapshot was appended.
    pub fn record(&mut self, nodes: &[ComponentNode], edges: &[Connection]) -> bool {
        let snapshot = Snapshot::capture(nodes, edges);
        if self.snapshots[self.cursor] == snapshot {
            trace!("history: unchanged state, not recording");
            return false;
        }
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;
        debug!("history: recorded snapshot {} of {}", self.cursor, self.snapshots.len());
        true
    }

    /// Step back one snapshot and return a deep copy of it for the caller to
    /// install as live state. `None` when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        debug!("history: undo to snapshot {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward one snapshot and return a deep copy of it. `None` when
    /// already at the newest snapshot.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        debug!("history: redo to snapshot {}", self.cursor);
        Some(self.snapshots[self.cursor].clone())
    }

    /// Deep copy of the snapshot under the cursor.
    pub fn current(&self) -> Snapshot {
        self.snapshots[self.cursor].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentKind, ComponentNode, Connection, EdgeStyle, Endpoint};

    fn node(id: &str, x: f32) -> ComponentNode {
        ComponentNode::new(id, ComponentKind::Logic, x, 0.0, "Gate")
    }

    fn edge(id: &str) -> Connection {
        Connection {
            id: id.to_string(),
            source: Endpoint::new("1", "output-default"),
            target: Endpoint::new("2", "input-1"),
            label: "1".to_string(),
            style: EdgeStyle::default(),
        }
    }

    fn seeded() -> History {
        History::new(Snapshot::capture(&[node("1", 0.0)], &[]))
    }

    // ========================================================================
    // Seeding and availability flags
    // ========================================================================

    #[test]
    fn test_seeded_history_has_one_snapshot() {
        let history = seeded();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = seeded();
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = seeded();
        assert!(history.redo().is_none());
    }

    // ========================================================================
    // Recording
    // ========================================================================

    #[test]
    fn test_record_appends_and_advances() {
        let mut history = seeded();
        assert!(history.record(&[node("1", 50.0)], &[]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_skips_identical_state() {
        let mut history = seeded();
        assert!(!history.record(&[node("1", 0.0)], &[]));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_record_truncates_redo_branch() {
        let mut history = seeded();
        history.record(&[node("1", 50.0)], &[]);
        history.record(&[node("1", 100.0)], &[]);
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), 0);

        // Recording from cursor 0 discards the two stale snapshots
        let divergent = [node("1", 0.0), node("2", 10.0)];
        assert!(history.record(&divergent, &[]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current().nodes, divergent.to_vec());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_after_partial_undo() {
        // Undo to cursor k, then record: length k+2, index k+1 equals the
        // recorded state.
        let mut history = seeded();
        history.record(&[node("1", 50.0)], &[]);
        history.record(&[node("1", 100.0)], &[]);
        history.record(&[node("1", 150.0)], &[]);
        history.undo();
        history.undo();
        let k = history.cursor();
        assert_eq!(k, 1);

        let state = [node("1", 200.0)];
        history.record(&state, &[]);

        assert_eq!(history.len(), k + 2);
        assert_eq!(history.cursor(), k + 1);
        assert_eq!(history.current().nodes, state.to_vec());
    }

    // ========================================================================
    // Undo / redo round trip
    // ========================================================================

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = seeded();
        let states: Vec<Vec<ComponentNode>> = (1..=5).map(|i| vec![node("1", i as f32 * 10.0)]).collect();
        for s in &states {
            history.record(s, &[]);
        }

        for _ in 0..5 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.cursor(), 0);

        let mut last = None;
        for _ in 0..5 {
            last = history.redo();
        }
        assert_eq!(last.unwrap().nodes, states[4]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_edges_participate_in_snapshots() {
        let mut history = seeded();
        history.record(&[node("1", 0.0)], &[edge("a")]);

        let undone = history.undo().unwrap();
        assert!(undone.edges.is_empty());

        let redone = history.redo().unwrap();
        assert_eq!(redone.edges, vec![edge("a")]);
    }

    // ========================================================================
    // No snapshot aliasing
    // ========================================================================

    #[test]
    fn test_returned_snapshots_do_not_alias_stored_state() {
        let mut history = seeded();
        history.record(&[node("1", 50.0)], &[]);

        let mut undone = history.undo().unwrap();
        undone.nodes[0].label = "mutated".to_string();
        undone.nodes[0].x = 999.0;

        // Redoing and undoing again must return the pristine states
        let redone = history.redo().unwrap();
        assert_eq!(redone.nodes[0].x, 50.0);
        let undone_again = history.undo().unwrap();
        assert_eq!(undone_again.nodes[0].label, "Gate");
        assert_eq!(undone_again.nodes[0].x, 0.0);
    }

    #[test]
    fn test_recorded_state_does_not_alias_caller_buffers() {
        let mut history = seeded();
        let mut live = vec![node("1", 50.0)];
        history.record(&live, &[]);

        live[0].x = 777.0;
        live[0].label = "mutated".to_string();

        assert_eq!(history.current().nodes[0].x, 50.0);
        assert_eq!(history.current().nodes[0].label, "Gate");
    }
}
