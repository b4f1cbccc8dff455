//! The diagram data model: components, ports and connections.
//!
//! [`Diagram`] is a plain data container with invariant-preserving mutators.
//! All contained data is owned (`String`/`Vec`), so `Diagram::clone()` is a
//! full structural deep copy with no shared substructure — the history engine
//! relies on this to keep snapshots independent of the live model.

use std::fmt;

use crate::grid;

/// Component category. Determines the default port arity when a node carries
/// no explicit port set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    Input,
    Output,
    Power,
    Logic,
}

impl ComponentKind {
    /// Default `(inputs, outputs)` arity for this kind.
    pub fn default_arity(self) -> (usize, usize) {
        match self {
            ComponentKind::Input => (0, 1),
            ComponentKind::Output => (1, 0),
            ComponentKind::Power => (0, 1),
            ComponentKind::Logic => (2, 1),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Input => "input",
            ComponentKind::Output => "output",
            ComponentKind::Power => "power",
            ComponentKind::Logic => "logic",
        };
        f.write_str(s)
    }
}

/// Which of the three port sequences a port belongs to.
///
/// A port keeps its role for its whole lifetime; moving a port between roles
/// is not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortRole {
    Input,
    Output,
    Power,
}

impl PortRole {
    /// The handle-id prefix for this role (`input-…`, `output-…`, `power-…`).
    pub fn prefix(self) -> &'static str {
        match self {
            PortRole::Input => "input",
            PortRole::Output => "output",
            PortRole::Power => "power",
        }
    }
}

/// A directional connection point on a component.
#[derive(Clone, Debug, PartialEq)]
pub struct Port {
    /// Unique within the owning component.
    pub id: String,
    pub role: PortRole,
    /// Short display string.
    pub label: String,
    /// Percentage offset in `[0, 100]` along the component's vertical edge.
    pub position: f32,
}

impl Port {
    pub fn new(id: impl Into<String>, role: PortRole, label: impl Into<String>, position: f32) -> Self {
        Self {
            id: id.into(),
            role,
            label: label.into(),
            position: position.clamp(0.0, 100.0),
        }
    }
}

/// The three ordered role sequences of a component.
///
/// Membership is mutually exclusive by role: a port id appears in exactly one
/// of the sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortSet {
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub power: Vec<Port>,
}

impl PortSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sequence owning `role`.
    pub fn sequence(&self, role: PortRole) -> &Vec<Port> {
        match role {
            PortRole::Input => &self.inputs,
            PortRole::Output => &self.outputs,
            PortRole::Power => &self.power,
        }
    }

    pub fn sequence_mut(&mut self, role: PortRole) -> &mut Vec<Port> {
        match role {
            PortRole::Input => &mut self.inputs,
            PortRole::Output => &mut self.outputs,
            PortRole::Power => &mut self.power,
        }
    }

    /// Find a port in whichever sequence contains it.
    pub fn find(&self, port_id: &str) -> Option<&Port> {
        self.iter().find(|p| p.id == port_id)
    }

    pub fn find_mut(&mut self, port_id: &str) -> Option<&mut Port> {
        self.inputs
            .iter_mut()
            .chain(self.outputs.iter_mut())
            .chain(self.power.iter_mut())
            .find(|p| p.id == port_id)
    }

    /// Iterate all ports, inputs first, then outputs, then power.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.inputs.iter().chain(self.outputs.iter()).chain(self.power.iter())
    }

    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len() + self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A placed circuit element.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentNode {
    /// Unique string id, stable for the component's lifetime.
    pub id: String,
    pub kind: ComponentKind,
    /// Top-left corner in pixels, snapped to the 5 px grid.
    pub x: f32,
    pub y: f32,
    /// User-editable display string.
    pub label: String,
    /// Explicit port layout. `None` on legacy components; queries then fall
    /// back to the arity derived from `kind`.
    pub ports: Option<PortSet>,
    /// Height override in pixels, quantized to the 20 px row height.
    /// `None` means the default height (6 rows).
    pub height: Option<f32>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, kind: ComponentKind, x: f32, y: f32, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            x: grid::snap(x),
            y: grid::snap(y),
            label: label.into(),
            ports: None,
            height: None,
        }
    }

    /// Rendered height in pixels.
    pub fn height_px(&self) -> f32 {
        self.height.unwrap_or(grid::DEFAULT_NODE_HEIGHT_PX)
    }

    /// The effective port layout: the explicit one if present, otherwise
    /// arity-derived defaults (`input-0`…, `output-0`… handles, evenly
    /// spaced, labelled with the role's default scheme).
    pub fn effective_ports(&self) -> PortSet {
        if let Some(ports) = &self.ports {
            return ports.clone();
        }
        let (n_in, n_out) = self.kind.default_arity();
        let mut set = PortSet::new();
        for i in 0..n_in {
            let position = (i as f32 + 1.0) * 100.0 / (n_in as f32 + 1.0);
            set.inputs.push(Port::new(
                format!("input-{i}"),
                PortRole::Input,
                crate::ports::default_port_label(PortRole::Input, i),
                position,
            ));
        }
        for i in 0..n_out {
            let position = (i as f32 + 1.0) * 100.0 / (n_out as f32 + 1.0);
            set.outputs.push(Port::new(
                format!("output-{i}"),
                PortRole::Output,
                crate::ports::default_port_label(PortRole::Output, i),
                position,
            ));
        }
        set
    }
}

/// A `(node id, port id)` pair naming one end of a connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoint {
    pub node: String,
    pub port: String,
}

impl Endpoint {
    pub fn new(node: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            port: port.into(),
        }
    }
}

/// Presentation data attached to a connection at creation time.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
    /// Stroke color as a CSS hex string.
    pub stroke: String,
    pub stroke_width: f32,
    pub animated: bool,
    /// Closed arrowhead at the target end.
    pub arrow_closed: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            stroke: "#2c3e50".to_string(),
            stroke_width: 2.0,
            animated: true,
            arrow_closed: true,
        }
    }
}

/// A directed wire from an output-class port to an input-class port.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    /// Deterministically derived from the four endpoint identifiers.
    pub id: String,
    pub source: Endpoint,
    pub target: Endpoint,
    /// Grid row of the source node, captured at connect time. Not refreshed
    /// when the source node moves afterwards.
    pub label: String,
    pub style: EdgeStyle,
}

/// The complete node/edge graph plus id allocation state.
///
/// Mutators keep the collections consistent (no dangling edges, set semantics
/// on edge ids) but perform no validation of *intent* — that is the
/// connection rule engine's job.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    nodes: Vec<ComponentNode>,
    edges: Vec<Connection>,
    next_node_id: u32,
    next_port_id: u32,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Connection> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Allocate the next node id ("1", "2", …).
    pub fn allocate_node_id(&mut self) -> String {
        self.next_node_id += 1;
        self.next_node_id.to_string()
    }

    /// Allocate a port id with the role's prefix (`input-7`, `power-3`, …).
    pub fn allocate_port_id(&mut self, role: PortRole) -> String {
        self.next_port_id += 1;
        format!("{}-{}", role.prefix(), self.next_port_id)
    }

    /// Add a node. Replaces any existing node with the same id.
    pub fn add_node(&mut self, node: ComponentNode) {
        // Keep the id counter ahead of externally numbered nodes so
        // allocate_node_id never collides with seeded ids.
        if let Ok(n) = node.id.parse::<u32>() {
            self.next_node_id = self.next_node_id.max(n);
        }
        self.nodes.retain(|n| n.id != node.id);
        self.nodes.push(node);
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Returns `false` (no-op) if the node does not exist.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let len_before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == len_before {
            return false;
        }
        self.edges.retain(|e| e.source.node != id && e.target.node != id);
        true
    }

    /// No-op if the node does not exist.
    pub fn update_node_label(&mut self, id: &str, label: impl Into<String>) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Move a node; the position is snapped to the 5 px grid.
    pub fn update_node_position(&mut self, id: &str, x: f32, y: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.x = grid::snap(x);
                node.y = grid::snap(y);
                true
            }
            None => false,
        }
    }

    /// Replace a node's explicit port layout.
    ///
    /// Each port is re-keyed into the sequence matching its declared role,
    /// regardless of which sequence the caller placed it in, so role
    /// membership stays mutually exclusive.
    pub fn update_node_ports(&mut self, id: &str, ports: PortSet) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                let mut rekeyed = PortSet::new();
                for port in ports.inputs.into_iter().chain(ports.outputs).chain(ports.power) {
                    rekeyed.sequence_mut(port.role).push(port);
                }
                node.ports = Some(rekeyed);
                true
            }
            None => false,
        }
    }

    /// Set a node's height override, quantized to rows with the 3-row floor.
    pub fn update_node_height(&mut self, id: &str, height_px: f32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.height = Some(grid::snap_height(height_px));
                true
            }
            None => false,
        }
    }

    /// Add an edge with set semantics on the edge id: re-adding an edge whose
    /// id already exists is a no-op. Returns `true` if the edge was inserted.
    pub fn add_edge(&mut self, edge: Connection) -> bool {
        if self.edges.iter().any(|e| e.id == edge.id) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let len_before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != len_before
    }

    /// Replace an edge in place, keyed by its old id.
    ///
    /// Refused when the replacement's id already belongs to a different
    /// edge, keeping ids unique like [`add_edge`](Self::add_edge) does.
    pub fn replace_edge(&mut self, old_id: &str, edge: Connection) -> bool {
        if edge.id != old_id && self.edges.iter().any(|e| e.id == edge.id) {
            return false;
        }
        match self.edges.iter_mut().find(|e| e.id == old_id) {
            Some(slot) => {
                *slot = edge;
                true
            }
            None => false,
        }
    }

    /// Replace the graph contents wholesale, e.g. when installing a restored
    /// state. The id allocation counters are kept (and bumped past any
    /// numeric node id in the new contents) so restored states never recycle
    /// ids.
    pub fn restore(&mut self, nodes: Vec<ComponentNode>, edges: Vec<Connection>) {
        for node in &nodes {
            if let Ok(n) = node.id.parse::<u32>() {
                self.next_node_id = self.next_node_id.max(n);
            }
        }
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Ids of every edge incident to `node_id`.
    pub fn edges_connected_to_node(&self, node_id: &str) -> Vec<String> {
        self.edges
            .iter()
            .filter(|e| e.source.node == node_id || e.target.node == node_id)
            .map(|e| e.id.clone())
            .collect()
    }
}
