//! Loading layers from directories of definition documents.
//!
//! Each directory becomes one [`Layer`](crate::layer::Layer); every `*.xml`
//! file below it is parsed and its definitions are appended in sorted path
//! order, so load order never depends on the filesystem.

mod error;
mod layer_loader;

pub use error::LoadError;
pub use layer_loader::{LayerLoader, collect_document_paths};
