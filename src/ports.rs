//! The port layout manager.
//!
//! Maintains a component's port positions (percentage offsets along its
//! vertical edge) and re-flows them on edit. Two *distinct* distribution
//! policies exist and are deliberately not unified:
//!
//! - [`PortLayout::distribute_even`] — creation-time even spacing, used when
//!   a component template is instantiated.
//! - [`PortLayout::distribute_saved`] — save-time normalization at a fixed
//!   8-row pitch against the 35-row board, used when a port edit is saved.
//!
//! The two disagree for the same port count; which one wins depends on the
//! lifecycle point, and save-time normalization overwrites user-dragged
//! positions. That mismatch is existing product behavior and is kept as is.

use crate::grid;
use crate::model::{Port, PortRole, PortSet};

/// Default label for the `index`-th port (0-based) of a role sequence.
///
/// Inputs use positional letters ("A", "B", …, "Z", "AA", …); outputs use
/// the Q-series ("Q", "Q2", "Q3", …); power rails are numbered ("P1", "P2", …).
pub fn default_port_label(role: PortRole, index: usize) -> String {
    match role {
        PortRole::Input => column_letters(index),
        PortRole::Output => {
            if index == 0 {
                "Q".to_string()
            } else {
                format!("Q{}", index + 1)
            }
        }
        PortRole::Power => format!("P{}", index + 1),
    }
}

/// Bijective base-26 letters: 0 -> "A", 25 -> "Z", 26 -> "AA".
fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    // Only ASCII letters pushed above
    String::from_utf8(out).unwrap_or_default()
}

/// Helper functions for port layout operations.
pub struct PortLayout;

impl PortLayout {
    /// Append a new port to the role's sequence.
    ///
    /// The label defaults from the role and ordinal, the position to 50
    /// (center). Returns a reference to the new port.
    pub fn add_port(set: &mut PortSet, role: PortRole, id: String) -> &Port {
        let seq = set.sequence_mut(role);
        let label = default_port_label(role, seq.len());
        seq.push(Port::new(id, role, label, 50.0));
        seq.last().unwrap()
    }

    /// Remove a port from whichever sequence contains it.
    ///
    /// Returns `false` (no-op) if no sequence contains it.
    pub fn remove_port(set: &mut PortSet, port_id: &str) -> bool {
        let len_before = set.len();
        set.inputs.retain(|p| p.id != port_id);
        set.outputs.retain(|p| p.id != port_id);
        set.power.retain(|p| p.id != port_id);
        set.len() != len_before
    }

    /// Set a port's position, clamped to `[0, 100]`.
    pub fn set_port_position(set: &mut PortSet, port_id: &str, position: f32) -> bool {
        match set.find_mut(port_id) {
            Some(port) => {
                port.position = position.clamp(0.0, 100.0);
                true
            }
            None => false,
        }
    }

    /// Rename a port.
    pub fn set_port_label(set: &mut PortSet, port_id: &str, label: impl Into<String>) -> bool {
        match set.find_mut(port_id) {
            Some(port) => {
                port.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Creation-time policy: space N ports evenly along the edge,
    /// `position = (index + 1) * 100 / (N + 1)`.
    pub fn distribute_even(ports: &mut [Port]) {
        let count = ports.len();
        for (i, port) in ports.iter_mut().enumerate() {
            port.position = (i as f32 + 1.0) * 100.0 / (count as f32 + 1.0);
        }
    }

    /// Save-time policy: space ports at a fixed 8-row pitch normalized
    /// against the total board rows,
    /// `position = (index * 8 * rowHeight) / (rowHeight * totalRows) * 100`.
    ///
    /// Positions are clamped to `[0, 100]`; beyond four ports the raw pitch
    /// runs off the edge.
    pub fn distribute_saved(ports: &mut [Port]) {
        for (i, port) in ports.iter_mut().enumerate() {
            let raw = (i as f32 * 8.0 * grid::ROW_HEIGHT_PX)
                / (grid::ROW_HEIGHT_PX * grid::BOARD_ROWS as f32)
                * 100.0;
            port.position = raw.clamp(0.0, 100.0);
        }
    }

    /// Interactive drag: convert a pointer y offset within the component's
    /// bounding box to a snapped percentage position.
    ///
    /// The offset is clamped to the box, snapped to the 40 px port pitch,
    /// converted to a percentage of the component height and clamped again.
    pub fn drag_position(pointer_y: f32, node_height: f32) -> f32 {
        if node_height <= 0.0 {
            return 0.0;
        }
        let normalized = pointer_y.clamp(0.0, node_height);
        let snapped = (normalized / grid::PORT_PITCH_PX).round() * grid::PORT_PITCH_PX;
        (snapped / node_height * 100.0).clamp(0.0, 100.0)
    }
}
