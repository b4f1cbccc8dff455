//! # Circuit Grid Editor
//!
//! A headless core for a schematic circuit diagram editor: components placed
//! on a fixed snap-to-grid board, directional port-to-port wiring with rule
//! validation, and snapshot-based undo/redo.
//!
//! ## Features
//!
//! - **Grid Contract** - Fixed 160×35-cell board; positions snap to 5 px,
//!   heights to 20 px rows, port drags to a 40 px pitch
//! - **Rule-Validated Wiring** - Output-class to input-class only, silent
//!   rejection, deterministic edge ids with set semantics
//! - **Snapshot History** - Linear undo/redo over deep-copied diagram states
//!   with redo-branch truncation and duplicate suppression
//! - **Port Layout Manager** - Per-role port sequences with distinct
//!   creation-time and save-time distribution policies
//! - **UI-Agnostic Core** - The controller and model know nothing about the
//!   toolkit; [`SurfaceBinding`] adapts them to Slint `VecModel`s
//!
//! ## Quick Start
//!
//! ```ignore
//! use circuit_grid_editor::{builtin_templates, EditorController};
//!
//! let ctrl = EditorController::new();
//! let palette = builtin_templates();
//!
//! let psu = ctrl.add_component(&palette[0], 100.0, 100.0);
//! let gate = ctrl.add_component(&palette[1], 400.0, 100.0);
//! let wire = ctrl.connect(&psu, "output-default", &gate, "input-1");
//! ctrl.tick();
//!
//! assert!(wire.is_some());
//! assert!(ctrl.undo());
//! ```
//!
//! ## Core Components
//!
//! - [`Diagram`] - The node/edge graph with invariant-preserving mutators
//! - [`EditorController`] - The edit-surface facade: intents, interaction
//!   sessions, deferred history recording
//! - [`History`] - Snapshot-based undo/redo engine
//! - [`PortLayout`] - Port layout operations and distribution policies
//! - [`ComponentLibrary`] - The palette of placeable templates
//! - [`SurfaceBinding`] - Auto-sync from the diagram to Slint models

pub mod grid;
pub mod model;
pub mod connect;
pub mod ports;
pub mod history;
pub mod session;
pub mod library;
pub mod keyboard;
pub mod controller;
pub mod sync;

// Re-export the main types and functions
pub use model::{
    ComponentKind, ComponentNode, Connection, Diagram, EdgeStyle, Endpoint, Port, PortRole,
    PortSet,
};
pub use grid::{board_grid_commands, row_number, snap, snap_height};
pub use connect::{
    connection_id, re_terminate, try_connect, validate_connection, ConnectError, ValidationResult,
};
pub use ports::{default_port_label, PortLayout};
pub use history::{History, Snapshot};
pub use session::{NodeDragSession, PortDragSession, ResizeSession, Session};
pub use library::{builtin_templates, instantiate, ComponentLibrary, ComponentTemplate};
pub use keyboard::{shortcut_for, HistoryShortcut, KeyEvent};
pub use controller::EditorController;
pub use sync::{row_labels, SurfaceBinding};
