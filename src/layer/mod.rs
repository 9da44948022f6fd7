//! Content layers.
//!
//! A [`Layer`] is one priority tier of definitions (base content, an overlay,
//! ...). Layers are handed to the engine as an ordered slice: index 0 is the
//! lowest priority and is processed first.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::inherit::InheritOptions;
use crate::tree::Node;

/// Position of a layer in the caller-supplied processing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub usize);

impl LayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Address of a top-level definition: `layers[layer].defs[def_type][index]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub layer: LayerId,
    pub def_type: SmolStr,
    pub index: usize,
}

impl NodeRef {
    pub fn new(layer: LayerId, def_type: impl Into<SmolStr>, index: usize) -> Self {
        Self {
            layer,
            def_type: def_type.into(),
            index,
        }
    }
}

/// One priority tier of definition documents, grouped by definition type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    name: String,
    /// Definition type -> definitions in load order.
    defs: IndexMap<SmolStr, Vec<Node>>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defs: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a definition under its own element name.
    pub fn push_def(&mut self, node: Node) {
        self.defs
            .entry(node.name_key().clone())
            .or_default()
            .push(node);
    }

    pub fn with_def(mut self, node: Node) -> Self {
        self.push_def(node);
        self
    }

    /// Definitions of one type, empty if the layer has none.
    pub fn defs(&self, def_type: &str) -> &[Node] {
        self.defs.get(def_type).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn defs_mut(&mut self, def_type: &str) -> Option<&mut Vec<Node>> {
        self.defs.get_mut(def_type)
    }

    pub fn def_types(&self) -> impl Iterator<Item = &SmolStr> {
        self.defs.keys()
    }

    /// Every (definition type, definitions) group in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Node])> {
        self.defs.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Total number of top-level definitions.
    pub fn len(&self) -> usize {
        self.defs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.values().all(Vec::is_empty)
    }

    /// Definitions `options` does not consider abstract.
    ///
    /// Abstract definitions exist only to be inherited from; consumers that
    /// materialize definitions skip them.
    pub fn concrete_defs<'a>(
        &'a self,
        options: &'a InheritOptions,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.defs
            .values()
            .flatten()
            .filter(move |n| !options.is_abstract(n))
    }
}

/// Look up the definition a [`NodeRef`] points at.
pub fn node<'a>(layers: &'a [Layer], at: &NodeRef) -> Option<&'a Node> {
    layers
        .get(at.layer.index())?
        .defs
        .get(at.def_type.as_str())?
        .get(at.index)
}

/// Borrow a child definition mutably alongside its parent definition.
///
/// Both refs must name the same definition type. Returns `None` when either
/// ref is dangling, when the types differ, or when both name the same node.
pub fn child_and_parent<'a>(
    layers: &'a mut [Layer],
    child: &NodeRef,
    parent: &NodeRef,
) -> Option<(&'a mut Node, &'a Node)> {
    if child.def_type != parent.def_type {
        return None;
    }
    let def_type = child.def_type.as_str();

    if child.layer == parent.layer {
        let defs = layers
            .get_mut(child.layer.index())?
            .defs
            .get_mut(def_type)?;
        return split_pair(defs, child.index, parent.index);
    }

    let (child_layer, parent_layer) = split_pair(layers, child.layer.index(), parent.layer.index())?;
    let child_node = child_layer.defs.get_mut(def_type)?.get_mut(child.index)?;
    let parent_node = parent_layer.defs.get(def_type)?.get(parent.index)?;
    Some((child_node, parent_node))
}

/// `(&mut items[a], &items[b])` for distinct in-bounds indices.
fn split_pair<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &left[b]))
    }
}
