//! Inheritance resolution tests
//!
//! - Layer precedence for parent lookup
//! - Merge scenarios on whole layers
//! - Properties that must hold after resolution
//! - Cycle policies

pub mod tests_cycles;
pub mod tests_scenarios;
