//! # Template Inheritance
//!
//! Resolves parent-template references across an ordered stack of layers and
//! materializes inheritance by merging each parent's subtree into its children.
//!
//! ```text
//! index     → per layer, per definition type: template id → graph node
//!   ↓
//! resolver  → own layer first, then earlier layers newest to oldest
//!   ↓
//! graph     → parent → children edges, anonymous definitions included
//!   ↓
//! engine    → walk each layer's roots, merge parent into child in place
//! ```

mod diagnostics;
mod engine;
mod error;
mod graph;
mod index;
pub mod merge;
mod options;
mod resolver;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use engine::{InheritanceEngine, ResolveReport, resolve_inheritance};
pub use error::InheritError;
pub use graph::{Cycle, GraphNode, GraphNodeId, GraphNodeKind, InheritanceGraph};
pub use index::LayerIndex;
pub use merge::{MergeOutcome, merge_node};
pub use options::{CyclePolicy, InheritOptions};
pub use resolver::ParentResolver;
