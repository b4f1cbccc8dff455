//! High-level controller: the core-facing interface consumed by the edit
//! surface.
//!
//! The [`EditorController`] owns the live diagram, the history engine and the
//! single interaction-session slot. Clone it to share it across callbacks;
//! all clones see the same state.
//!
//! # Recording policy
//!
//! Discrete intents (add, delete, connect, label/port edits, direct resize)
//! schedule a history record immediately after mutating live state. The
//! record itself is deferred to the next [`tick`](EditorController::tick) so
//! that it captures the fully settled post-mutation state once the event
//! turn has finished. Continuous interactions (drag, resize, port drag)
//! mutate live state on every pointer move but schedule a record only when
//! the pointer is released.
//!
//! # Example
//!
//! ```ignore
//! use circuit_grid_editor::{builtin_templates, EditorController};
//!
//! let ctrl = EditorController::new();
//! let palette = builtin_templates();
//!
//! let psu = ctrl.add_component(&palette[0], 100.0, 100.0);
//! let gate = ctrl.add_component(&palette[1], 400.0, 100.0);
//! ctrl.tick();
//!
//! ctrl.connect(&psu, "output-default", &gate, "input-1");
//! ctrl.tick();
//!
//! assert!(ctrl.undo());
//! assert!(ctrl.edges().is_empty());
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use crate::connect;
use crate::history::{History, Snapshot};
use crate::keyboard::{shortcut_for, HistoryShortcut, KeyEvent};
use crate::library::{instantiate, ComponentTemplate};
use crate::model::{ComponentNode, Connection, Diagram, PortRole, PortSet};
use crate::ports::PortLayout;
use crate::session::{NodeDragSession, PortDragSession, ResizeSession, Session};

/// Controller owning the diagram, history and interaction state.
#[derive(Clone)]
pub struct EditorController {
    diagram: Rc<RefCell<Diagram>>,
    history: Rc<RefCell<History>>,
    pending_record: Rc<Cell<bool>>,
    session: Rc<RefCell<Option<Session>>>,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorController {
    /// Create a controller over an empty diagram. The empty state is seeded
    /// as the initial history snapshot.
    pub fn new() -> Self {
        Self::with_diagram(Diagram::new())
    }

    /// Create a controller over an existing diagram, seeding the history
    /// with its current state.
    pub fn with_diagram(diagram: Diagram) -> Self {
        let initial = Snapshot::capture(diagram.nodes(), diagram.edges());
        Self {
            diagram: Rc::new(RefCell::new(diagram)),
            history: Rc::new(RefCell::new(History::new(initial))),
            pending_record: Rc::new(Cell::new(false)),
            session: Rc::new(RefCell::new(None)),
        }
    }

    /// Shared handle to the live diagram.
    pub fn diagram(&self) -> Rc<RefCell<Diagram>> {
        self.diagram.clone()
    }

    // === Query surface ===

    /// Deep copy of the current nodes.
    pub fn nodes(&self) -> Vec<ComponentNode> {
        self.diagram.borrow().nodes().to_vec()
    }

    /// Deep copy of the current edges.
    pub fn edges(&self) -> Vec<Connection> {
        self.diagram.borrow().edges().to_vec()
    }

    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    /// Number of snapshots currently held.
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    // === Discrete intents ===

    /// Instantiate a template at the given board position. Returns the new
    /// node's id.
    pub fn add_component(&self, template: &ComponentTemplate, x: f32, y: f32) -> String {
        let mut diagram = self.diagram.borrow_mut();
        let id = diagram.allocate_node_id();
        let node = instantiate(template, id.clone(), x, y);
        debug!("add component {} ({}) at ({}, {})", id, template.label, node.x, node.y);
        diagram.add_node(node);
        drop(diagram);
        self.schedule_record();
        id
    }

    /// Connect two port handles. Returns the deterministic edge id, or
    /// `None` (a silent no-op) if the connection is rejected.
    ///
    /// Idempotent: connecting an already-wired pair returns the existing
    /// edge's id without touching the diagram or the history.
    pub fn connect(
        &self,
        source_node: &str,
        source_port: &str,
        target_node: &str,
        target_port: &str,
    ) -> Option<String> {
        let mut diagram = self.diagram.borrow_mut();
        let edge = connect::try_connect(&diagram, source_node, source_port, target_node, target_port)?;
        let id = edge.id.clone();
        if diagram.add_edge(edge) {
            debug!("connected {}", id);
            drop(diagram);
            self.schedule_record();
        }
        Some(id)
    }

    /// Re-terminate an existing edge onto new endpoints. The id scheme is
    /// re-applied, so the returned id differs from `edge_id` unless the
    /// endpoints are unchanged.
    ///
    /// Rejected (a silent no-op) when the re-derived id already belongs to
    /// another edge: the target wire exists, so the move would collapse two
    /// edges into one id.
    pub fn reconnect(
        &self,
        edge_id: &str,
        source_node: &str,
        source_port: &str,
        target_node: &str,
        target_port: &str,
    ) -> Option<String> {
        let mut diagram = self.diagram.borrow_mut();
        let edge = connect::re_terminate(&diagram, edge_id, source_node, source_port, target_node, target_port)?;
        let id = edge.id.clone();
        if !diagram.replace_edge(edge_id, edge) {
            debug!("rejected re-termination of {}: edge {} already exists", edge_id, id);
            return None;
        }
        debug!("re-terminated {} as {}", edge_id, id);
        drop(diagram);
        self.schedule_record();
        Some(id)
    }

    /// Delete a component and every edge incident to it.
    pub fn remove_component(&self, node_id: &str) -> bool {
        let removed = self.diagram.borrow_mut().remove_node(node_id);
        if removed {
            debug!("removed component {}", node_id);
            self.schedule_record();
        }
        removed
    }

    /// Delete an edge.
    pub fn remove_edge(&self, edge_id: &str) -> bool {
        let removed = self.diagram.borrow_mut().remove_edge(edge_id);
        if removed {
            debug!("removed edge {}", edge_id);
            self.schedule_record();
        }
        removed
    }

    /// Rename a component.
    pub fn edit_label(&self, node_id: &str, label: &str) -> bool {
        let changed = self.diagram.borrow_mut().update_node_label(node_id, label);
        if changed {
            self.schedule_record();
        }
        changed
    }

    /// Save a component's edited port set.
    ///
    /// Each port is re-keyed into its role sequence, then every sequence is
    /// re-spaced with the save-time fixed-pitch policy — including ports the
    /// user dragged by hand.
    pub fn edit_ports(&self, node_id: &str, mut ports: PortSet) -> bool {
        PortLayout::distribute_saved(&mut ports.inputs);
        PortLayout::distribute_saved(&mut ports.outputs);
        PortLayout::distribute_saved(&mut ports.power);
        let changed = self.diagram.borrow_mut().update_node_ports(node_id, ports);
        if changed {
            self.schedule_record();
        }
        changed
    }

    /// Append a new port to a component's role sequence, with a generated
    /// unique id and the role's default label. Legacy components get their
    /// fallback ports materialized first. Returns the new port's id.
    pub fn add_port(&self, node_id: &str, role: PortRole) -> Option<String> {
        let mut diagram = self.diagram.borrow_mut();
        diagram.node(node_id)?;
        // Template-instantiated ports are numbered per role, so the shared
        // counter may land on a taken id; skip past those.
        let port_id = loop {
            let candidate = diagram.allocate_port_id(role);
            let taken = diagram
                .node(node_id)
                .map(|n| n.effective_ports().find(&candidate).is_some())
                .unwrap_or(false);
            if !taken {
                break candidate;
            }
        };
        let node = diagram.node_mut(node_id)?;
        if node.ports.is_none() {
            let materialized = node.effective_ports();
            node.ports = Some(materialized);
        }
        if let Some(ports) = node.ports.as_mut() {
            PortLayout::add_port(ports, role, port_id.clone());
        }
        debug!("added port {} to component {}", port_id, node_id);
        drop(diagram);
        self.schedule_record();
        Some(port_id)
    }

    /// Remove a port from whichever sequence contains it.
    pub fn remove_port(&self, node_id: &str, port_id: &str) -> bool {
        let mut diagram = self.diagram.borrow_mut();
        let Some(node) = diagram.node_mut(node_id) else {
            return false;
        };
        let removed = match node.ports.as_mut() {
            Some(ports) => PortLayout::remove_port(ports, port_id),
            None => false,
        };
        drop(diagram);
        if removed {
            self.schedule_record();
        }
        removed
    }

    /// Set a component's height directly (row-quantized, 3-row floor).
    pub fn resize_component(&self, node_id: &str, height_px: f32) -> bool {
        let changed = self.diagram.borrow_mut().update_node_height(node_id, height_px);
        if changed {
            self.schedule_record();
        }
        changed
    }

    /// Reposition a port from a live pointer y offset within the component's
    /// bounding box (snapped to the 40 px pitch). Does not record history;
    /// the settled position is recorded when the interaction ends.
    pub fn move_port(&self, node_id: &str, port_id: &str, pointer_y: f32) -> bool {
        let mut diagram = self.diagram.borrow_mut();
        let Some(node) = diagram.node_mut(node_id) else {
            return false;
        };
        let position = PortLayout::drag_position(pointer_y, node.height_px());
        match node.ports.as_mut() {
            Some(ports) => PortLayout::set_port_position(ports, port_id, position),
            None => {
                // Legacy components materialize their fallback ports on the
                // first edit that actually resolves; a missed lookup leaves
                // the stored state untouched.
                let mut materialized = node.effective_ports();
                if !PortLayout::set_port_position(&mut materialized, port_id, position) {
                    return false;
                }
                node.ports = Some(materialized);
                true
            }
        }
    }

    // === Interaction sessions ===

    /// Begin dragging a component. Fails if another interaction is live or
    /// the node does not exist.
    pub fn begin_node_drag(&self, node_id: &str, pointer_x: f32, pointer_y: f32) -> bool {
        let mut session = self.session.borrow_mut();
        if session.is_some() {
            return false;
        }
        let diagram = self.diagram.borrow();
        let Some(node) = diagram.node(node_id) else {
            return false;
        };
        *session = Some(Session::NodeDrag(NodeDragSession::start(node, pointer_x, pointer_y)));
        true
    }

    /// Begin resizing a component from its bottom edge.
    pub fn begin_resize(&self, node_id: &str, pointer_y: f32) -> bool {
        let mut session = self.session.borrow_mut();
        if session.is_some() {
            return false;
        }
        let diagram = self.diagram.borrow();
        let Some(node) = diagram.node(node_id) else {
            return false;
        };
        *session = Some(Session::Resize(ResizeSession::start(node, pointer_y)));
        true
    }

    /// Begin dragging a port along its component's edge.
    pub fn begin_port_drag(&self, node_id: &str, port_id: &str) -> bool {
        let mut session = self.session.borrow_mut();
        if session.is_some() {
            return false;
        }
        if self.diagram.borrow().node(node_id).is_none() {
            return false;
        }
        *session = Some(Session::PortDrag(PortDragSession::start(node_id, port_id)));
        true
    }

    /// Feed a pointer movement into the live interaction. Mutates live state
    /// but never records history.
    pub fn pointer_moved(&self, pointer_x: f32, pointer_y: f32) {
        let session = self.session.borrow().clone();
        match session {
            Some(Session::NodeDrag(drag)) => {
                let (x, y) = drag.position_at(pointer_x, pointer_y);
                self.diagram.borrow_mut().update_node_position(drag.node_id(), x, y);
            }
            Some(Session::Resize(resize)) => {
                let height = resize.height_at(pointer_y);
                self.diagram.borrow_mut().update_node_height(resize.node_id(), height);
            }
            Some(Session::PortDrag(drag)) => {
                let node_top = self
                    .diagram
                    .borrow()
                    .node(drag.node_id())
                    .map(|n| n.y);
                if let Some(top) = node_top {
                    self.move_port(drag.node_id(), drag.port_id(), pointer_y - top);
                }
            }
            None => {}
        }
    }

    /// End the live interaction and schedule a record of the settled state.
    /// No-op when no interaction is live.
    pub fn pointer_released(&self) {
        if self.session.borrow_mut().take().is_some() {
            self.schedule_record();
        }
    }

    /// Whether an interaction session is live.
    pub fn interaction_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    // === History ===

    fn schedule_record(&self) {
        self.pending_record.set(true);
    }

    /// Run deferred work for this event-loop turn: if a record is pending,
    /// capture the live state into the history.
    pub fn tick(&self) {
        if self.pending_record.replace(false) {
            let diagram = self.diagram.borrow();
            self.history.borrow_mut().record(diagram.nodes(), diagram.edges());
        }
    }

    /// Step back one snapshot, installing it as live state. Returns `false`
    /// when already at the oldest state.
    pub fn undo(&self) -> bool {
        // A scheduled record settles before the cursor moves, matching the
        // host event loop's ordering of deferred work.
        self.tick();
        let snapshot = self.history.borrow_mut().undo();
        match snapshot {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns `false` when already at the
    /// newest state.
    pub fn redo(&self) -> bool {
        self.tick();
        let snapshot = self.history.borrow_mut().redo();
        match snapshot {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }

    fn install(&self, snapshot: Snapshot) {
        self.diagram.borrow_mut().restore(snapshot.nodes, snapshot.edges);
    }

    /// Handle a host key event. Returns `true` when the combination is a
    /// history shortcut and the host must prevent its default handling,
    /// whether or not a step was actually available.
    pub fn handle_key(&self, event: KeyEvent) -> bool {
        match shortcut_for(event) {
            Some(HistoryShortcut::Undo) => {
                self.undo();
                true
            }
            Some(HistoryShortcut::Redo) => {
                self.redo();
                true
            }
            None => false,
        }
    }
}
