//! Layer indexing: template identifier lookup tables.
//!
//! Each layer gets one [`LayerIndex`]: per definition type, a map from template
//! identifier to the graph node wrapping that definition. Indexes are built
//! once, before any linking, and are read-only afterwards.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::diagnostics::DiagnosticCollector;
use super::graph::{GraphNode, GraphNodeId};
use super::options::InheritOptions;
use crate::layer::{Layer, LayerId, NodeRef};

/// Template lookup table for one layer.
#[derive(Clone, Debug)]
pub struct LayerIndex {
    layer: LayerId,
    /// Definition type -> template identifier -> graph node.
    by_type: IndexMap<SmolStr, IndexMap<SmolStr, GraphNodeId>>,
}

impl LayerIndex {
    /// Index every definition in `layer` that carries a template identifier.
    ///
    /// Graph nodes are allocated in `arena`. A template identifier repeated
    /// within one definition type keeps only its last definition; the earlier
    /// ones get no graph node at all and a hint is recorded.
    pub fn build(
        layer_id: LayerId,
        layer: &Layer,
        options: &InheritOptions,
        arena: &mut Vec<GraphNode>,
        diagnostics: &mut DiagnosticCollector,
    ) -> Self {
        let mut by_type = IndexMap::new();

        for (def_type, defs) in layer.iter() {
            // Last write wins; IndexMap keeps the slot of the first occurrence.
            let mut latest: IndexMap<SmolStr, usize> = IndexMap::new();
            for (position, node) in defs.iter().enumerate() {
                let Some(template_id) = options.template_id(node) else {
                    continue;
                };
                if latest.insert(SmolStr::new(template_id), position).is_some() {
                    diagnostics.duplicate_template(
                        layer_id,
                        def_type,
                        template_id,
                        node.position(),
                    );
                }
            }

            if latest.is_empty() {
                continue;
            }

            let templates: IndexMap<SmolStr, GraphNodeId> = latest
                .into_iter()
                .map(|(template_id, position)| {
                    let id = GraphNodeId(arena.len());
                    arena.push(GraphNode::template(
                        template_id.clone(),
                        NodeRef::new(layer_id, def_type.clone(), position),
                    ));
                    (template_id, id)
                })
                .collect();

            tracing::trace!(
                "[INDEX] {} {}: {} template(s)",
                layer_id,
                def_type,
                templates.len()
            );
            by_type.insert(def_type.clone(), templates);
        }

        Self {
            layer: layer_id,
            by_type,
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Look up a template by definition type and identifier.
    pub fn get(&self, def_type: &str, template_id: &str) -> Option<GraphNodeId> {
        self.by_type.get(def_type)?.get(template_id).copied()
    }

    /// Templates of one definition type in index order.
    pub fn templates(&self, def_type: &str) -> impl Iterator<Item = (&SmolStr, GraphNodeId)> {
        self.by_type
            .get(def_type)
            .into_iter()
            .flat_map(|templates| templates.iter().map(|(k, v)| (k, *v)))
    }

    /// Every indexed graph node: definition types in load order, templates in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &SmolStr, GraphNodeId)> {
        self.by_type.iter().flat_map(|(def_type, templates)| {
            templates
                .iter()
                .map(move |(template_id, id)| (def_type, template_id, *id))
        })
    }

    pub fn def_types(&self) -> impl Iterator<Item = &SmolStr> {
        self.by_type.keys()
    }

    /// Number of indexed templates across all definition types.
    pub fn len(&self) -> usize {
        self.by_type.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
