//! Definition and layer builders.

use strata::{Layer, Node};

/// A definition of `def_type` with optional identifier and parent reference.
pub fn def(def_type: &str, name: Option<&str>, parent: Option<&str>) -> Node {
    let mut node = Node::new(def_type);
    if let Some(name) = name {
        node.set_attr("Name", name);
    }
    if let Some(parent) = parent {
        node.set_attr("ParentName", parent);
    }
    node
}

/// A `ThingDef` template.
pub fn thing(name: &str) -> Node {
    def("ThingDef", Some(name), None)
}

/// A `ThingDef` inheriting from `parent`.
pub fn thing_of(name: &str, parent: &str) -> Node {
    def("ThingDef", Some(name), Some(parent))
}

/// A `ThingDef` with a parent reference but no identifier.
pub fn anonymous_of(parent: &str) -> Node {
    def("ThingDef", None, Some(parent))
}

/// An element holding list items with the given values.
pub fn list(name: &str, items: &[&str]) -> Node {
    items
        .iter()
        .fold(Node::new(name), |node, item| node.with_child(Node::list_item(*item)))
}

pub fn layer(name: &str, defs: impl IntoIterator<Item = Node>) -> Layer {
    defs.into_iter()
        .fold(Layer::new(name), |layer, def| layer.with_def(def))
}

/// Find a definition by identifier across a layer's `ThingDef`s.
pub fn find<'a>(layer: &'a Layer, name: &str) -> &'a Node {
    layer
        .defs("ThingDef")
        .iter()
        .find(|n| n.attr("Name") == Some(name))
        .unwrap_or_else(|| panic!("no ThingDef named {name} in {}", layer.name()))
}
