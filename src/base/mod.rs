//! Foundation types shared by every other module.
//!
//! - [`Position`], [`LineIndex`] - Source locations for document elements
//! - [`constants`] - Default attribute keys and sentinel values
//!
//! This module has NO dependencies on other strata modules.

pub mod constants;
mod position;

pub use position::{LineIndex, Position};
