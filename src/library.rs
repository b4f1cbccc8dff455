//! Component templates and the palette library.
//!
//! Templates are what the palette offers; instantiating one produces a
//! [`ComponentNode`] with arity-derived ports, evenly distributed along the
//! component edges (the creation-time distribution policy).

use crate::model::{ComponentKind, ComponentNode, Port, PortRole, PortSet};
use crate::ports::{default_port_label, PortLayout};

/// A palette entry describing a component that can be placed.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentTemplate {
    pub id: String,
    pub label: String,
    pub kind: ComponentKind,
    pub description: String,
}

impl ComponentTemplate {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ComponentKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            description: description.into(),
        }
    }
}

/// The four built-in palette entries.
pub fn builtin_templates() -> Vec<ComponentTemplate> {
    vec![
        ComponentTemplate::new(
            "power-supply",
            "Power Supply",
            ComponentKind::Power,
            "Provides power to the circuit",
        ),
        ComponentTemplate::new(
            "logic-gate",
            "Logic Gate",
            ComponentKind::Logic,
            "Basic logic gate component",
        ),
        ComponentTemplate::new(
            "input-switch",
            "Input Switch",
            ComponentKind::Input,
            "Input switch for the circuit",
        ),
        ComponentTemplate::new(
            "output-led",
            "Output LED",
            ComponentKind::Output,
            "Output LED indicator",
        ),
    ]
}

/// The palette: built-in templates plus user-defined ones.
pub struct ComponentLibrary {
    templates: Vec<ComponentTemplate>,
    next_custom_id: u32,
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentLibrary {
    pub fn new() -> Self {
        Self {
            templates: builtin_templates(),
            next_custom_id: 0,
        }
    }

    pub fn templates(&self) -> &[ComponentTemplate] {
        &self.templates
    }

    pub fn find(&self, id: &str) -> Option<&ComponentTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Register a user-defined template. The id is `{kind}-{n}` from a
    /// library-local counter, so ids are stable across runs.
    pub fn add_template(
        &mut self,
        label: impl Into<String>,
        kind: ComponentKind,
        description: impl Into<String>,
    ) -> &ComponentTemplate {
        self.next_custom_id += 1;
        let id = format!("{}-{}", kind, self.next_custom_id);
        self.templates.push(ComponentTemplate::new(id, label, kind, description));
        self.templates.last().unwrap()
    }
}

/// Build a node from a template.
///
/// Port handles are numbered per role: inputs `input-1`…`input-N`, the first
/// output `output-default` and further outputs `output-2`, `output-3`, … .
/// Labels follow the default scheme, except that a power supply's single
/// arity-derived output is its rail and is labelled "Power". Each sequence
/// is evenly distributed (creation-time policy).
pub fn instantiate(template: &ComponentTemplate, node_id: impl Into<String>, x: f32, y: f32) -> ComponentNode {
    let (n_in, n_out) = template.kind.default_arity();
    let mut set = PortSet::new();

    for i in 0..n_in {
        set.inputs.push(Port::new(
            format!("input-{}", i + 1),
            PortRole::Input,
            default_port_label(PortRole::Input, i),
            50.0,
        ));
    }
    for i in 0..n_out {
        let id = if i == 0 {
            "output-default".to_string()
        } else {
            format!("output-{}", i + 1)
        };
        let label = if template.kind == ComponentKind::Power {
            "Power".to_string()
        } else {
            default_port_label(PortRole::Output, i)
        };
        set.outputs.push(Port::new(id, PortRole::Output, label, 50.0));
    }

    PortLayout::distribute_even(&mut set.inputs);
    PortLayout::distribute_even(&mut set.outputs);

    let mut node = ComponentNode::new(node_id, template.kind, x, y, template.label.clone());
    node.ports = Some(set);
    node
}
