//! Shared test setup.

#![allow(dead_code)]

use std::sync::Once;

use circuit_grid_editor::{builtin_templates, ComponentTemplate, EditorController};

static INIT: Once = Once::new();

/// Initialize logging once for the whole test binary.
pub fn init() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn template(id: &str) -> ComponentTemplate {
    builtin_templates()
        .into_iter()
        .find(|t| t.id == id)
        .unwrap_or_else(|| panic!("unknown template {id}"))
}

/// A controller holding a power supply ("1") at (100, 100) and a logic gate
/// ("2") at (400, 100), with the placement already settled into history.
pub fn power_and_gate() -> EditorController {
    init();
    let ctrl = EditorController::new();
    ctrl.add_component(&template("power-supply"), 100.0, 100.0);
    ctrl.add_component(&template("logic-gate"), 400.0, 100.0);
    ctrl.tick();
    ctrl
}
