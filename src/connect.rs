//! The connection rule engine.
//!
//! Decides whether a proposed link between two port handles is legal and
//! synthesizes the resulting [`Connection`]. Rejections are silent at the
//! operation level (a no-op, per the editor's error policy); the detailed
//! reason is still available through [`validate_connection`] and is logged at
//! debug level.
//!
//! # Identity
//!
//! Edge ids are derived deterministically from the four endpoint identifiers
//! (`{source}-{sourcePort}-{target}-{targetPort}`), so connecting the same
//! pair of handles twice yields the same id both times. The engine itself
//! does not deduplicate; the diagram's edge collection has set semantics on
//! the id and drops the second insertion.

use std::fmt;

use log::debug;

use crate::grid;
use crate::model::{Connection, Diagram, EdgeStyle, Endpoint};

/// Result of connection validation with optional rejection reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(ConnectError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Reasons why a proposed connection was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The named node does not exist in the diagram.
    NodeNotFound(String),
    /// The source handle is not output-class (`output-…` or `power-…`).
    SourceNotOutput(String),
    /// The target handle is not input-class (`input-…` or `power-…`).
    TargetNotInput(String),
    /// Source and target name the same handle on the same node.
    SameHandle,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {} not found", id),
            Self::SourceNotOutput(id) => write!(f, "source handle {} is not an output", id),
            Self::TargetNotInput(id) => write!(f, "target handle {} is not an input", id),
            Self::SameHandle => write!(f, "cannot connect a handle to itself"),
        }
    }
}

/// Whether a handle id names an output-class port (an output proper, or a
/// power rail leaving the component's right edge).
pub fn is_output_class(handle: &str) -> bool {
    handle.starts_with("output") || handle.starts_with("power")
}

/// Whether a handle id names an input-class port (an input proper, or a
/// power rail entering the component's left edge).
pub fn is_input_class(handle: &str) -> bool {
    handle.starts_with("input") || handle.starts_with("power")
}

/// Deterministic edge id for a logical link.
pub fn connection_id(source_node: &str, source_port: &str, target_node: &str, target_port: &str) -> String {
    format!("{source_node}-{source_port}-{target_node}-{target_port}")
}

/// Validate a proposed connection against the current diagram.
///
/// Checks, in order: both nodes exist, the handles are not the same handle,
/// the source handle is output-class and the target handle is input-class.
/// The handles are classified by role prefix only — they are not required to
/// appear in the node's explicit port set, because legacy components expose
/// arity-derived handles that are never stored.
pub fn validate_connection(
    diagram: &Diagram,
    source_node: &str,
    source_port: &str,
    target_node: &str,
    target_port: &str,
) -> ValidationResult {
    if diagram.node(source_node).is_none() {
        return ValidationResult::Invalid(ConnectError::NodeNotFound(source_node.to_string()));
    }
    if diagram.node(target_node).is_none() {
        return ValidationResult::Invalid(ConnectError::NodeNotFound(target_node.to_string()));
    }
    if source_node == target_node && source_port == target_port {
        return ValidationResult::Invalid(ConnectError::SameHandle);
    }
    if !is_output_class(source_port) {
        return ValidationResult::Invalid(ConnectError::SourceNotOutput(source_port.to_string()));
    }
    if !is_input_class(target_port) {
        return ValidationResult::Invalid(ConnectError::TargetNotInput(target_port.to_string()));
    }
    ValidationResult::Valid
}

/// Attempt to connect two handles, synthesizing the resulting edge.
///
/// Returns `None` on any rule violation — no edge is created and no error
/// surfaces to the caller.
///
/// The edge label is the grid row of the *source* node at connect time
/// (`floor(y / 20) + 1`). It is frozen: moving the source node afterwards
/// does not refresh it.
pub fn try_connect(
    diagram: &Diagram,
    source_node: &str,
    source_port: &str,
    target_node: &str,
    target_port: &str,
) -> Option<Connection> {
    match validate_connection(diagram, source_node, source_port, target_node, target_port) {
        ValidationResult::Valid => {}
        ValidationResult::Invalid(err) => {
            debug!(
                "rejected connection {}:{} -> {}:{}: {}",
                source_node, source_port, target_node, target_port, err
            );
            return None;
        }
    }

    // Existence checked above
    let source = diagram.node(source_node)?;
    let row = grid::row_number(source.y);

    Some(Connection {
        id: connection_id(source_node, source_port, target_node, target_port),
        source: Endpoint::new(source_node, source_port),
        target: Endpoint::new(target_node, target_port),
        label: row.to_string(),
        style: EdgeStyle::default(),
    })
}

/// Re-terminate an existing edge onto new endpoints.
///
/// The new endpoints go through the same validation as a fresh connection.
/// The id-generation scheme is re-applied, so the edge gets the id its new
/// endpoints dictate; the frozen row label and style carry over from the old
/// edge. Returns the replacement edge, or `None` if the old edge is missing
/// or the new endpoints are invalid.
pub fn re_terminate(
    diagram: &Diagram,
    old_edge_id: &str,
    source_node: &str,
    source_port: &str,
    target_node: &str,
    target_port: &str,
) -> Option<Connection> {
    let old = diagram.edge(old_edge_id)?;

    if !validate_connection(diagram, source_node, source_port, target_node, target_port).is_valid() {
        debug!("rejected re-termination of edge {}", old_edge_id);
        return None;
    }

    Some(Connection {
        id: connection_id(source_node, source_port, target_node, target_port),
        source: Endpoint::new(source_node, source_port),
        target: Endpoint::new(target_node, target_port),
        label: old.label.clone(),
        style: old.style.clone(),
    })
}
