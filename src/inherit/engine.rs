//! Inheritance resolution across an ordered stack of layers.

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::error::InheritError;
use super::graph::{GraphNodeId, InheritanceGraph};
use super::merge::{MergeOutcome, merge_node};
use super::options::{CyclePolicy, InheritOptions};
use crate::layer::{self, Layer, LayerId};

/// Summary of one resolution run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Definitions indexed under a template identifier.
    pub templates: usize,
    /// Definitions with a resolved parent but no identifier.
    pub anonymous: usize,
    /// Parent edges linked.
    pub edges: usize,
    /// Definitions stamped as inherited.
    pub merged: usize,
    /// Merges whose child opted out at the top level.
    pub opted_out: usize,
    /// Parent list items appended at the top level.
    pub list_items_appended: usize,
    /// Parent fields adopted at the top level.
    pub fields_adopted: usize,
    /// Tolerated conditions met while indexing, linking and cycle checking.
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolveReport {
    fn record(&mut self, outcome: MergeOutcome) {
        self.merged += 1;
        match outcome {
            MergeOutcome::OptedOut => self.opted_out += 1,
            MergeOutcome::ListAppended(items) => self.list_items_appended += items,
            MergeOutcome::FieldsMerged { adopted, .. } => self.fields_adopted += adopted,
        }
    }

    /// Diagnostics with the given code.
    pub fn diagnostics_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }
}

/// Resolves template inheritance in place.
#[derive(Debug, Clone, Default)]
pub struct InheritanceEngine {
    options: InheritOptions,
}

impl InheritanceEngine {
    pub fn new(options: InheritOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InheritOptions {
        &self.options
    }

    /// Resolve inheritance for `layers`, lowest priority first.
    ///
    /// Every layer is indexed, then linked in order, then each layer's roots
    /// are walked downward merging parent into child. Documents are only
    /// mutated in the last phase, so an error leaves `layers` untouched.
    pub fn resolve(&self, layers: &mut [Layer]) -> Result<ResolveReport, InheritError> {
        let mut diagnostics = DiagnosticCollector::new();
        let graph = InheritanceGraph::build(layers, &self.options, &mut diagnostics);

        for cycle in graph.find_cycles() {
            match self.options.cycle_policy {
                CyclePolicy::Reject => {
                    return Err(InheritError::Cycle {
                        layer: cycle.layer,
                        def_type: cycle.def_type,
                        chain: cycle.chain,
                    });
                }
                CyclePolicy::Skip => {
                    tracing::warn!(
                        "[INHERIT] skipping cycle in {} {}: {}",
                        cycle.layer,
                        cycle.def_type,
                        cycle.chain.join(" -> ")
                    );
                    diagnostics.inheritance_cycle(cycle.layer, &cycle.def_type, &cycle.chain);
                }
            }
        }

        let mut report = ResolveReport {
            templates: graph.template_count(),
            anonymous: graph.anonymous_count(),
            edges: graph.edge_count(),
            ..ResolveReport::default()
        };

        for position in 0..graph.layer_count() {
            let layer_id = LayerId(position);
            let merged_before = report.merged;
            for root in graph.roots(layer_id) {
                self.merge_descendants(&graph, root, layers, &mut report);
            }
            tracing::debug!(
                "[INHERIT] {}: {} definition(s) merged from its roots",
                layer_id,
                report.merged - merged_before
            );
        }

        report.diagnostics = diagnostics.finish();
        tracing::info!(
            "resolve_inheritance: {} layer(s), {} template(s), {} anonymous, {} merged, {} diagnostic(s)",
            layers.len(),
            report.templates,
            report.anonymous,
            report.merged,
            report.diagnostics.len()
        );
        Ok(report)
    }

    /// Depth-first walk below `root`, merging each parent into its children.
    ///
    /// Uses an explicit stack; a parent is always merged before its children
    /// are visited, so inherited content flows all the way down.
    fn merge_descendants(
        &self,
        graph: &InheritanceGraph,
        root: GraphNodeId,
        layers: &mut [Layer],
        report: &mut ResolveReport,
    ) {
        let mut stack: Vec<(GraphNodeId, GraphNodeId)> = graph
            .node(root)
            .children()
            .iter()
            .rev()
            .map(|child| (root, *child))
            .collect();

        while let Some((parent, child)) = stack.pop() {
            let child_ref = graph.node(child).node();
            let parent_ref = graph.node(parent).node();
            let Some((child_node, parent_node)) =
                layer::child_and_parent(layers, child_ref, parent_ref)
            else {
                continue;
            };

            self.options.stamp_inherited(child_node);
            let outcome = merge_node(child_node, parent_node, &self.options);
            tracing::trace!(
                "[INHERIT] {:?} <- {:?}: {:?}",
                graph.node(child).template_id(),
                graph.node(parent).template_id(),
                outcome
            );
            report.record(outcome);

            stack.extend(
                graph
                    .node(child)
                    .children()
                    .iter()
                    .rev()
                    .map(|grandchild| (child, *grandchild)),
            );
        }
    }
}

/// Resolve inheritance for `layers` with the given options.
pub fn resolve_inheritance(
    layers: &mut [Layer],
    options: &InheritOptions,
) -> Result<ResolveReport, InheritError> {
    InheritanceEngine::new(options.clone()).resolve(layers)
}
