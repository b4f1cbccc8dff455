//! Connection rule enforcement at the controller surface.

mod common;

use common::{power_and_gate, template};

#[test]
fn test_role_enforcement_matrix() {
    let ctrl = power_and_gate();

    // (source handle, target handle, accepted)
    let cases = [
        ("output-default", "input-1", true),
        ("output-default", "input-2", true),
        ("output-default", "power-1", true),
        ("power-1", "input-1", true),
        ("power-1", "power-2", true),
        ("input-1", "input-2", false),
        ("input-1", "output-default", false),
        ("output-default", "output-2", false),
        ("bogus-1", "input-1", false),
        ("output-default", "bogus-1", false),
    ];

    for (source_port, target_port, accepted) in cases {
        let result = ctrl.connect("1", source_port, "2", target_port);
        assert_eq!(
            result.is_some(),
            accepted,
            "1:{source_port} -> 2:{target_port}"
        );
    }
}

#[test]
fn test_unknown_nodes_reject_silently() {
    let ctrl = power_and_gate();
    let before = ctrl.history_len();

    assert!(ctrl.connect("42", "output-default", "2", "input-1").is_none());
    assert!(ctrl.connect("1", "output-default", "42", "input-1").is_none());
    ctrl.tick();

    // Silent rejection: no edge, no error state, no history growth
    assert!(ctrl.edges().is_empty());
    assert_eq!(ctrl.history_len(), before);
}

#[test]
fn test_repeat_wire_returns_existing_id() {
    let ctrl = power_and_gate();

    let first = ctrl.connect("1", "output-default", "2", "input-1");
    let second = ctrl.connect("1", "output-default", "2", "input-1");
    ctrl.tick();
    let settled = ctrl.history_len();

    // Idempotent surface: same id both times, one edge on the board
    assert!(first.is_some());
    assert_eq!(second, first);
    assert_eq!(ctrl.edges().len(), 1);

    // And the repeat alone records nothing further
    ctrl.connect("1", "output-default", "2", "input-1");
    ctrl.tick();
    assert_eq!(ctrl.history_len(), settled);
}

#[test]
fn test_parallel_wires_between_same_components() {
    let ctrl = power_and_gate();

    // Distinct handle pairs yield distinct ids, so both wires coexist
    ctrl.connect("1", "output-default", "2", "input-1").unwrap();
    ctrl.connect("1", "output-default", "2", "input-2").unwrap();
    ctrl.tick();

    assert_eq!(ctrl.edges().len(), 2);
}

#[test]
fn test_reconnect_moves_wire_to_new_target() {
    let ctrl = power_and_gate();
    ctrl.add_component(&template("output-led"), 600.0, 200.0);
    let old_id = ctrl.connect("1", "output-default", "2", "input-1").unwrap();
    ctrl.tick();

    let new_id = ctrl.reconnect(&old_id, "1", "output-default", "3", "input-1").unwrap();
    ctrl.tick();

    assert_eq!(new_id, "1-output-default-3-input-1");
    let edges = ctrl.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].target.node, "3");
    // Label frozen from the original connect survives re-termination
    assert_eq!(edges[0].label, "6");

    // Undo restores the original termination
    assert!(ctrl.undo());
    assert_eq!(ctrl.edges()[0].id, old_id);
}

#[test]
fn test_reconnect_cannot_collapse_two_wires_into_one_id() {
    let ctrl = power_and_gate();
    ctrl.add_component(&template("output-led"), 600.0, 200.0);
    let to_gate = ctrl.connect("1", "output-default", "2", "input-1").unwrap();
    let to_led = ctrl.connect("1", "output-default", "3", "input-1").unwrap();
    ctrl.tick();

    // Moving the gate wire onto the LED's already-wired input is refused,
    // so every edge id stays unique
    assert!(ctrl.reconnect(&to_gate, "1", "output-default", "3", "input-1").is_none());
    ctrl.tick();

    let mut ids: Vec<String> = ctrl.edges().into_iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 2);

    // Deleting the LED wire takes out exactly that one wire
    assert!(ctrl.remove_edge(&to_led));
    ctrl.tick();
    assert_eq!(ctrl.edges().len(), 1);
    assert_eq!(ctrl.edges()[0].id, to_gate);
}

#[test]
fn test_reconnect_rejects_invalid_endpoints() {
    let ctrl = power_and_gate();
    let old_id = ctrl.connect("1", "output-default", "2", "input-1").unwrap();
    ctrl.tick();

    assert!(ctrl.reconnect(&old_id, "2", "input-2", "1", "input-1").is_none());
    assert!(ctrl.reconnect("missing-edge", "1", "output-default", "2", "input-1").is_none());

    // The original wire is untouched
    assert_eq!(ctrl.edges()[0].id, old_id);
}

#[test]
fn test_deleting_component_drops_its_wires() {
    let ctrl = power_and_gate();
    ctrl.add_component(&template("output-led"), 600.0, 200.0);
    ctrl.connect("1", "output-default", "2", "input-1").unwrap();
    ctrl.connect("2", "output-default", "3", "input-1").unwrap();
    ctrl.tick();
    assert_eq!(ctrl.edges().len(), 2);

    ctrl.remove_component("2");
    ctrl.tick();

    assert!(ctrl.edges().is_empty());
    assert_eq!(ctrl.nodes().len(), 2);
}
