//! Auto-sync from the diagram to Slint models.
//!
//! The edit surface renders nodes and edges from `VecModel` rows. A
//! [`SurfaceBinding`] is bound once to those models with constructor
//! closures mapping core types to the surface's row structs; afterwards a
//! single [`refresh`](SurfaceBinding::refresh) call after each mutation
//! updates rows in place, appends new ones and truncates stale ones, so
//! Slint only re-renders what changed.
//!
//! ```ignore
//! let nodes_model = Rc::new(VecModel::<NodeItem>::default());
//! let edges_model = Rc::new(VecModel::<EdgeItem>::default());
//!
//! let mut binding = SurfaceBinding::new();
//! binding.bind_nodes(nodes_model.clone(), |node| NodeItem {
//!     id: SharedString::from(node.id.as_str()),
//!     x: node.x,
//!     y: node.y,
//!     label: SharedString::from(node.label.as_str()),
//!     height: node.height_px(),
//! });
//! binding.bind_edges(edges_model.clone(), |edge| EdgeItem {
//!     id: SharedString::from(edge.id.as_str()),
//!     label: SharedString::from(edge.label.as_str()),
//! });
//! window.set_nodes(ModelRc::from(nodes_model));
//! window.set_edges(ModelRc::from(edges_model));
//!
//! // After every controller call:
//! binding.refresh(&controller.diagram().borrow());
//! ```

use slint::{Model, SharedString, VecModel};
use std::rc::Rc;

use crate::grid;
use crate::model::{ComponentNode, Connection, Diagram};

/// Internal trait for auto-syncing nodes to a Slint model.
trait NodeSyncer {
    fn sync(&self, nodes: &[ComponentNode]);
}

/// Internal trait for auto-syncing edges to a Slint model.
trait EdgeSyncer {
    fn sync(&self, edges: &[Connection]);
}

struct ConcreteNodeSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> NodeSyncer for ConcreteNodeSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&ComponentNode) -> P,
{
    fn sync(&self, nodes: &[ComponentNode]) {
        // Overwrite in place so Slint only re-renders changed rows
        for (i, node) in nodes.iter().enumerate() {
            let item = (self.constructor)(node);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Trim rows the diagram no longer has
        while self.model.row_count() > nodes.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

struct ConcreteEdgeSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> EdgeSyncer for ConcreteEdgeSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&Connection) -> P,
{
    fn sync(&self, edges: &[Connection]) {
        for (i, edge) in edges.iter().enumerate() {
            let item = (self.constructor)(edge);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        while self.model.row_count() > edges.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// One-way binding from the diagram to the surface's node and edge models.
#[derive(Default)]
pub struct SurfaceBinding {
    node_syncer: Option<Box<dyn NodeSyncer>>,
    edge_syncer: Option<Box<dyn EdgeSyncer>>,
}

impl SurfaceBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the node model. `constructor` maps a core node to the surface's
    /// row struct.
    pub fn bind_nodes<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&ComponentNode) -> P + 'static,
    {
        self.node_syncer = Some(Box::new(ConcreteNodeSyncer { model, constructor }));
    }

    /// Bind the edge model.
    pub fn bind_edges<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&Connection) -> P + 'static,
    {
        self.edge_syncer = Some(Box::new(ConcreteEdgeSyncer { model, constructor }));
    }

    /// Push the diagram's current state into every bound model.
    pub fn refresh(&self, diagram: &Diagram) {
        if let Some(syncer) = &self.node_syncer {
            syncer.sync(diagram.nodes());
        }
        if let Some(syncer) = &self.edge_syncer {
            syncer.sync(diagram.edges());
        }
    }
}

/// Row-gutter labels for the board: "1" through "35".
pub fn row_labels() -> Vec<SharedString> {
    (1..=grid::BOARD_ROWS)
        .map(|row| SharedString::from(row.to_string().as_str()))
        .collect()
}
