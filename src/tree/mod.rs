//! Document trees: the representation every other module operates on.

mod node;

pub use node::{Child, Node};
