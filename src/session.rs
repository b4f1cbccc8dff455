//! Pointer interaction sessions: node drag, component resize, port drag.
//!
//! A session is bracketed by explicit start/end events and lives only while
//! the pointer is held down, so at most one session exists at a time (the
//! controller owns the single slot). Sessions are pure state + math; the
//! controller applies their results to the diagram and records history only
//! for the settled end-state, never for intermediate movements.

use crate::grid;
use crate::model::ComponentNode;
use crate::ports::PortLayout;

/// Moving a component across the board.
#[derive(Clone, Debug)]
pub struct NodeDragSession {
    node_id: String,
    /// Pointer offset from the node's top-left corner at grab time.
    grab_dx: f32,
    grab_dy: f32,
}

impl NodeDragSession {
    pub fn start(node: &ComponentNode, pointer_x: f32, pointer_y: f32) -> Self {
        Self {
            node_id: node.id.clone(),
            grab_dx: pointer_x - node.x,
            grab_dy: pointer_y - node.y,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Node position for the current pointer, snapped to the 5 px grid.
    pub fn position_at(&self, pointer_x: f32, pointer_y: f32) -> (f32, f32) {
        (
            grid::snap(pointer_x - self.grab_dx),
            grid::snap(pointer_y - self.grab_dy),
        )
    }
}

/// Dragging a component's bottom edge to change its height.
#[derive(Clone, Debug)]
pub struct ResizeSession {
    node_id: String,
    start_y: f32,
    start_height: f32,
}

impl ResizeSession {
    pub fn start(node: &ComponentNode, pointer_y: f32) -> Self {
        Self {
            node_id: node.id.clone(),
            start_y: pointer_y,
            start_height: node.height_px(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Height for the current pointer, row-quantized with the 3-row floor.
    pub fn height_at(&self, pointer_y: f32) -> f32 {
        grid::snap_height(self.start_height + (pointer_y - self.start_y))
    }
}

/// Dragging a port along its component's vertical edge.
#[derive(Clone, Debug)]
pub struct PortDragSession {
    node_id: String,
    port_id: String,
}

impl PortDragSession {
    pub fn start(node_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            port_id: port_id.into(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn port_id(&self) -> &str {
        &self.port_id
    }

    /// Port position for a pointer y offset within the component's box.
    pub fn position_at(&self, pointer_y: f32, node_height: f32) -> f32 {
        PortLayout::drag_position(pointer_y, node_height)
    }
}

/// The one interaction that may be live at a time.
#[derive(Clone, Debug)]
pub enum Session {
    NodeDrag(NodeDragSession),
    Resize(ResizeSession),
    PortDrag(PortDragSession),
}

impl Session {
    /// The component this session operates on.
    pub fn node_id(&self) -> &str {
        match self {
            Session::NodeDrag(s) => s.node_id(),
            Session::Resize(s) => s.node_id(),
            Session::PortDrag(s) => s.node_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentKind;

    fn gate() -> ComponentNode {
        ComponentNode::new("1", ComponentKind::Logic, 100.0, 100.0, "Gate")
    }

    // ========================================================================
    // Node drag
    // ========================================================================

    #[test]
    fn test_node_drag_keeps_grab_offset() {
        let node = gate();
        let session = NodeDragSession::start(&node, 110.0, 130.0);

        // Pointer moves +40/+20: node follows, keeping the grab offset
        assert_eq!(session.position_at(150.0, 150.0), (140.0, 120.0));
    }

    #[test]
    fn test_node_drag_snaps_to_grid() {
        let node = gate();
        let session = NodeDragSession::start(&node, 100.0, 100.0);

        assert_eq!(session.position_at(103.0, 107.6), (105.0, 110.0));
    }

    // ========================================================================
    // Resize
    // ========================================================================

    #[test]
    fn test_resize_quantizes_to_rows() {
        let node = gate(); // default height 120
        let session = ResizeSession::start(&node, 500.0);

        assert_eq!(session.height_at(500.0), 120.0);
        assert_eq!(session.height_at(511.0), 140.0); // +11 px rounds up a row
        assert_eq!(session.height_at(491.0), 120.0); // -9 px rounds back
    }

    #[test]
    fn test_resize_respects_minimum() {
        let node = gate();
        let session = ResizeSession::start(&node, 500.0);
        assert_eq!(session.height_at(100.0), grid::MIN_NODE_HEIGHT_PX);
    }

    #[test]
    fn test_resize_starts_from_override_height() {
        let mut node = gate();
        node.height = Some(200.0);
        let session = ResizeSession::start(&node, 0.0);
        assert_eq!(session.height_at(20.0), 220.0);
    }

    // ========================================================================
    // Port drag
    // ========================================================================

    #[test]
    fn test_port_drag_snaps_to_pitch() {
        let session = PortDragSession::start("1", "input-1");
        // 120 px node: 50 px pointer snaps to the 40 px pitch line
        assert_eq!(session.position_at(50.0, 120.0), 40.0 / 120.0 * 100.0);
    }

    #[test]
    fn test_session_node_id() {
        let node = gate();
        assert_eq!(Session::NodeDrag(NodeDragSession::start(&node, 0.0, 0.0)).node_id(), "1");
        assert_eq!(Session::Resize(ResizeSession::start(&node, 0.0)).node_id(), "1");
        assert_eq!(Session::PortDrag(PortDragSession::start("1", "p")).node_id(), "1");
    }
}
