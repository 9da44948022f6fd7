//! # strata-base
//!
//! Layered template inheritance for attribute-bearing definition documents.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → Layer loading from directories of XML documents
//!   ↓
//! xml       → quick-xml reader/writer for document trees
//!   ↓
//! inherit   → Indexing, cross-layer parent resolution, structural merge
//!   ↓
//! layer     → Ordered definition collections, one per priority tier
//!   ↓
//! tree      → Node/Child document trees
//!   ↓
//! base      → Primitives (Position, LineIndex, attribute constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → tree → layer → inherit → xml → project)
// ============================================================================

/// Foundation types: Position, LineIndex, attribute constants
pub mod base;

/// Document trees
pub mod tree;

/// Priority-ordered definition layers
pub mod layer;

/// Template inheritance engine
pub mod inherit;

/// XML reading and writing
#[cfg(feature = "xml")]
pub mod xml;

/// Loading layers from disk
#[cfg(feature = "xml")]
pub mod project;

// Re-export commonly needed items
pub use base::{LineIndex, Position};
pub use inherit::{
    CyclePolicy, Diagnostic, InheritError, InheritOptions, InheritanceEngine, ResolveReport,
    resolve_inheritance,
};
pub use layer::{Layer, LayerId, NodeRef};
pub use tree::{Child, Node};
