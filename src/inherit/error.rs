//! Error types for inheritance resolution.

use smol_str::SmolStr;
use thiserror::Error;

use crate::layer::LayerId;

/// Conditions that stop resolution.
///
/// Everything else the engine meets is tolerated and reported through
/// [`super::Diagnostic`]s instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InheritError {
    /// Parent references loop back on themselves.
    #[error("inheritance cycle in {def_type} ({layer}): {}", chain.join(" -> "))]
    Cycle {
        layer: LayerId,
        def_type: SmolStr,
        /// Template identifiers around the cycle, first entry repeated at the end.
        chain: Vec<SmolStr>,
    },
}
