//! Structural merge of a parent definition into a child definition.
//!
//! Three cases, checked in order:
//!
//! 1. **Opt-out** - the child's opt-out attribute holds the false sentinel:
//!    nothing is copied at this level or below it.
//! 2. **List** - every element child of the child is a list item (vacuously
//!    true when it has no element children): clones of the parent's list items
//!    are appended after the child's own. Lists are additive, never
//!    deduplicated. Text and comment children do not count.
//! 3. **Fields** - for each element child of the parent, in order:
//!    - absent from the child by name: a deep clone is appended
//!    - present, and both sides have element structure: merge recursively
//!    - present, and either side is a leaf: the child's value stands
//!
//! Only `child` is mutated. Attributes are never copied.

use super::options::InheritOptions;
use crate::tree::{Child, Node};

/// Which merge case applied at the top level of a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The child opted out; it is unchanged.
    OptedOut,
    /// The child was a list; this many parent items were appended.
    ListAppended(usize),
    /// Field-wise merge.
    FieldsMerged {
        /// Parent fields the child lacked and received as clones.
        adopted: usize,
        /// Fields present on both sides that were merged recursively.
        recursed: usize,
    },
}

/// Merge `parent`'s subtree into `child` in place.
pub fn merge_node(child: &mut Node, parent: &Node, options: &InheritOptions) -> MergeOutcome {
    if options.opts_out(child) {
        return MergeOutcome::OptedOut;
    }

    let is_list = child.elements().all(|n| options.is_list_item(n));
    if is_list {
        let items: Vec<Child> = parent
            .elements()
            .filter(|n| options.is_list_item(n))
            .cloned()
            .map(Child::Element)
            .collect();
        let appended = items.len();
        child.children_mut().extend(items);
        return MergeOutcome::ListAppended(appended);
    }

    let mut adopted = 0;
    let mut recursed = 0;
    for field in parent.elements() {
        match child.element_mut(field.name()) {
            Some(existing) => {
                if !existing.is_leaf() && !field.is_leaf() {
                    merge_node(existing, field, options);
                    recursed += 1;
                }
            }
            None => {
                child.push_child(field.clone());
                adopted += 1;
            }
        }
    }
    MergeOutcome::FieldsMerged { adopted, recursed }
}
