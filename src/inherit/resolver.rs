//! Cross-layer parent resolution.

use super::graph::GraphNodeId;
use super::index::LayerIndex;
use crate::layer::LayerId;

/// Finds the template a parent reference names.
///
/// Holds the indexes of every layer visible from the layer being linked, in
/// processing order. Lookups scan them newest first: the linking layer's own
/// index, then each earlier layer in reverse, ending with the first layer. An
/// overlay therefore sees its own templates before base ones, while earlier
/// layers never see later ones.
#[derive(Clone, Copy, Debug)]
pub struct ParentResolver<'a> {
    indexes: &'a [LayerIndex],
}

impl<'a> ParentResolver<'a> {
    /// `indexes` must be ordered by processing order and end with the linking layer.
    pub fn new(indexes: &'a [LayerIndex]) -> Self {
        Self { indexes }
    }

    /// Resolve a parent reference to the first matching template.
    pub fn resolve(&self, def_type: &str, parent_ref: &str) -> Option<GraphNodeId> {
        self.resolve_with_layer(def_type, parent_ref)
            .map(|(_, id)| id)
    }

    /// Resolve a parent reference, also reporting which layer supplied it.
    pub fn resolve_with_layer(
        &self,
        def_type: &str,
        parent_ref: &str,
    ) -> Option<(LayerId, GraphNodeId)> {
        let found = self
            .indexes
            .iter()
            .rev()
            .find_map(|index| index.get(def_type, parent_ref).map(|id| (index.layer(), id)));

        match found {
            Some((layer, _)) => tracing::trace!(
                "[RESOLVE] {} '{}' found in {}",
                def_type,
                parent_ref,
                layer
            ),
            None => tracing::trace!(
                "[RESOLVE] {} '{}' not found in {} layer(s)",
                def_type,
                parent_ref,
                self.indexes.len()
            ),
        }
        found
    }

    /// Layers in the order lookups visit them.
    pub fn search_order(&self) -> impl Iterator<Item = LayerId> + 'a {
        self.indexes.iter().rev().map(LayerIndex::layer)
    }
}
