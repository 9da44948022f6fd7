//! Inheritance graph: parent/child edges between definitions.
//!
//! # Architecture
//!
//! 1. **Indexing** - every layer gets a [`LayerIndex`]; each template definition
//!    becomes a [`GraphNode`] in a single arena shared by all layers
//! 2. **Linking** - layers are linked in processing order; a definition's parent
//!    reference is resolved against its own layer and every earlier one
//! 3. **Traversal** - the merge engine walks each layer's roots downward
//!
//! Definitions with a parent reference but no template identifier are
//! *anonymous*: they get a graph node so they can be traversed, but nothing can
//! name them as a parent, so they never enter an index.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::diagnostics::DiagnosticCollector;
use super::index::LayerIndex;
use super::options::InheritOptions;
use super::resolver::ParentResolver;
use crate::layer::{Layer, LayerId, NodeRef};

/// Index of a node in the graph arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphNodeId(pub(super) usize);

impl GraphNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a graph node can be reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphNodeKind {
    /// Indexed under its template identifier.
    Template(SmolStr),
    /// Has a parent reference but no identifier of its own.
    Anonymous,
}

/// Wraps one definition for traversal.
#[derive(Clone, Debug)]
pub struct GraphNode {
    kind: GraphNodeKind,
    node: NodeRef,
    parent: Option<GraphNodeId>,
    children: Vec<GraphNodeId>,
}

impl GraphNode {
    pub(super) fn template(template_id: SmolStr, node: NodeRef) -> Self {
        Self {
            kind: GraphNodeKind::Template(template_id),
            node,
            parent: None,
            children: Vec::new(),
        }
    }

    fn anonymous(node: NodeRef, parent: GraphNodeId) -> Self {
        Self {
            kind: GraphNodeKind::Anonymous,
            node,
            parent: Some(parent),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> &GraphNodeKind {
        &self.kind
    }

    pub fn template_id(&self) -> Option<&str> {
        match &self.kind {
            GraphNodeKind::Template(id) => Some(id),
            GraphNodeKind::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.kind == GraphNodeKind::Anonymous
    }

    /// The definition this graph node wraps.
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn parent(&self) -> Option<GraphNodeId> {
        self.parent
    }

    pub fn children(&self) -> &[GraphNodeId] {
        &self.children
    }
}

/// Template identifiers around a parent-reference loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cycle {
    pub layer: LayerId,
    pub def_type: SmolStr,
    /// Graph nodes on the loop, each followed by its parent.
    pub members: Vec<GraphNodeId>,
    /// Identifiers along the loop with the first repeated at the end.
    pub chain: Vec<SmolStr>,
}

/// Inheritance forest across all layers.
#[derive(Clone, Debug, Default)]
pub struct InheritanceGraph {
    nodes: Vec<GraphNode>,
    indexes: Vec<LayerIndex>,
    edges: usize,
}

impl InheritanceGraph {
    /// Index every layer, then link them in processing order.
    pub fn build(
        layers: &[Layer],
        options: &InheritOptions,
        diagnostics: &mut DiagnosticCollector,
    ) -> Self {
        let mut graph = Self::default();
        for layer in layers {
            graph.index_layer(layer, options, diagnostics);
        }
        for (position, layer) in layers.iter().enumerate() {
            graph.link_layer(LayerId(position), layer, options, diagnostics);
        }
        graph
    }

    /// Index the next layer in processing order.
    pub fn index_layer(
        &mut self,
        layer: &Layer,
        options: &InheritOptions,
        diagnostics: &mut DiagnosticCollector,
    ) -> LayerId {
        let layer_id = LayerId(self.indexes.len());
        let index = LayerIndex::build(layer_id, layer, options, &mut self.nodes, diagnostics);
        tracing::debug!(
            "[GRAPH] indexed {} '{}': {} template(s)",
            layer_id,
            layer.name(),
            index.len()
        );
        self.indexes.push(index);
        layer_id
    }

    /// Wire parent edges for one indexed layer. Returns the number of edges added.
    ///
    /// Only layers up to and including `layer_id` are searched. Unresolved
    /// references leave the definition parentless and record a warning.
    pub fn link_layer(
        &mut self,
        layer_id: LayerId,
        layer: &Layer,
        options: &InheritOptions,
        diagnostics: &mut DiagnosticCollector,
    ) -> usize {
        let Some(visible) = self.indexes.get(..=layer_id.index()) else {
            return 0;
        };
        let resolver = ParentResolver::new(visible);
        let mut added = 0;

        // Templates: both an identifier and a parent reference
        for (def_type, template_id, id) in visible[layer_id.index()].iter() {
            let at = &self.nodes[id.0].node;
            let Some(node) = layer.defs(&at.def_type).get(at.index) else {
                continue;
            };
            let Some(parent_ref) = options.parent_ref(node) else {
                continue;
            };
            match resolver.resolve(def_type, parent_ref) {
                Some(parent) => {
                    self.nodes[id.0].parent = Some(parent);
                    self.nodes[parent.0].children.push(id);
                    added += 1;
                }
                None => {
                    tracing::warn!(
                        "[GRAPH] {} {} '{}': parent '{}' not found",
                        layer_id,
                        def_type,
                        template_id,
                        parent_ref
                    );
                    diagnostics.unresolved_parent(
                        layer_id,
                        def_type,
                        &format!("template '{template_id}'"),
                        parent_ref,
                        node.position(),
                    );
                }
            }
        }

        // Anonymous: a parent reference without an identifier
        for (def_type, defs) in layer.iter() {
            for (position, node) in defs.iter().enumerate() {
                if options.template_id(node).is_some() {
                    continue;
                }
                let Some(parent_ref) = options.parent_ref(node) else {
                    continue;
                };
                match resolver.resolve(def_type, parent_ref) {
                    Some(parent) => {
                        let id = GraphNodeId(self.nodes.len());
                        self.nodes.push(GraphNode::anonymous(
                            NodeRef::new(layer_id, def_type.clone(), position),
                            parent,
                        ));
                        self.nodes[parent.0].children.push(id);
                        added += 1;
                    }
                    None => {
                        tracing::warn!(
                            "[GRAPH] {} {} #{}: parent '{}' not found",
                            layer_id,
                            def_type,
                            position,
                            parent_ref
                        );
                        diagnostics.unresolved_parent(
                            layer_id,
                            def_type,
                            &format!("anonymous definition #{position}"),
                            parent_ref,
                            node.position(),
                        );
                    }
                }
            }
        }

        self.edges += added;
        tracing::debug!("[GRAPH] linked {}: {} edge(s)", layer_id, added);
        added
    }

    pub fn node(&self, id: GraphNodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (GraphNodeId, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (GraphNodeId(i), node))
    }

    /// Template identifier of a node's resolved parent.
    pub fn parent_template(&self, id: GraphNodeId) -> Option<&str> {
        let parent = self.nodes.get(id.0)?.parent?;
        self.nodes[parent.0].template_id()
    }

    pub fn index(&self, layer: LayerId) -> Option<&LayerIndex> {
        self.indexes.get(layer.index())
    }

    /// Resolver seeing `layer` and every layer before it.
    pub fn resolver(&self, layer: LayerId) -> Option<ParentResolver<'_>> {
        self.indexes.get(..=layer.index()).map(ParentResolver::new)
    }

    /// Indexed nodes of `layer` without a resolved parent, in index order.
    pub fn roots(&self, layer: LayerId) -> Vec<GraphNodeId> {
        self.index(layer)
            .map(|index| {
                index
                    .iter()
                    .map(|(_, _, id)| id)
                    .filter(|id| self.nodes[id.0].parent.is_none())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn layer_count(&self) -> usize {
        self.indexes.len()
    }

    pub fn template_count(&self) -> usize {
        self.indexes.iter().map(LayerIndex::len).sum()
    }

    pub fn anonymous_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_anonymous()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Parent-reference loops, in layer then index order.
    ///
    /// Every node has at most one parent, so a node unreachable from any root
    /// either sits on a loop or descends from one. Each loop is reported once.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let reachable = self.reachable_from_roots();
        let mut settled: FxHashSet<GraphNodeId> = FxHashSet::default();
        let mut cycles = Vec::new();

        for index in &self.indexes {
            for (_, _, start) in index.iter() {
                if reachable.contains(&start) || settled.contains(&start) {
                    continue;
                }

                // Follow parents until we meet this walk or an earlier one
                let mut path: Vec<GraphNodeId> = Vec::new();
                let mut current = Some(start);
                while let Some(id) = current {
                    if settled.contains(&id) {
                        break;
                    }
                    if let Some(pos) = path.iter().position(|p| *p == id) {
                        cycles.push(self.cycle_from(&path[pos..]));
                        break;
                    }
                    path.push(id);
                    current = self.nodes[id.0].parent;
                }
                settled.extend(path);
            }
        }
        cycles
    }

    /// Nodes that are not roots but can be reached from one, plus the roots.
    pub fn reachable_from_roots(&self) -> FxHashSet<GraphNodeId> {
        let mut reached = FxHashSet::default();
        let mut stack: Vec<GraphNodeId> = (0..self.indexes.len())
            .flat_map(|layer| self.roots(LayerId(layer)))
            .collect();
        while let Some(id) = stack.pop() {
            if reached.insert(id) {
                stack.extend(self.nodes[id.0].children.iter().copied());
            }
        }
        reached
    }

    fn cycle_from(&self, members: &[GraphNodeId]) -> Cycle {
        let first = &self.nodes[members[0].0];
        let mut chain: Vec<SmolStr> = members
            .iter()
            .filter_map(|id| self.nodes[id.0].template_id().map(SmolStr::new))
            .collect();
        if let Some(head) = chain.first().cloned() {
            chain.push(head);
        }
        Cycle {
            layer: first.node.layer,
            def_type: first.node.def_type.clone(),
            members: members.to_vec(),
            chain,
        }
    }
}
