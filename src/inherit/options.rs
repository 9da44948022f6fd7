//! Inheritance options

use smol_str::SmolStr;

use crate::base::constants;
use crate::tree::Node;

/// What to do when parent references form a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Fail before any document is mutated.
    #[default]
    Reject,
    /// Warn, record a diagnostic and leave the cycle's members untouched.
    Skip,
}

/// Vocabulary and behaviour of the inheritance engine.
#[derive(Debug, Clone)]
pub struct InheritOptions {
    /// Attribute holding a node's template identifier
    pub template_id_attr: SmolStr,
    /// Attribute naming the parent template
    pub parent_ref_attr: SmolStr,
    /// Attribute that opts a node out of merging
    pub inherit_attr: SmolStr,
    /// Attribute marking template-only nodes
    pub abstract_attr: SmolStr,
    /// Attribute stamped onto merged nodes
    pub inherited_attr: SmolStr,
    /// Element name of list entries
    pub list_item: SmolStr,
    /// Opt-out value of `inherit_attr`, compared ignoring ASCII case
    pub false_sentinel: SmolStr,
    /// Value written to `inherited_attr`
    pub stamp_value: SmolStr,
    pub cycle_policy: CyclePolicy,
}

impl Default for InheritOptions {
    fn default() -> Self {
        Self {
            template_id_attr: constants::TEMPLATE_ID_ATTR.into(),
            parent_ref_attr: constants::PARENT_REF_ATTR.into(),
            inherit_attr: constants::INHERIT_ATTR.into(),
            abstract_attr: constants::ABSTRACT_ATTR.into(),
            inherited_attr: constants::INHERITED_ATTR.into(),
            list_item: constants::LIST_ITEM.into(),
            false_sentinel: constants::FALSE_SENTINEL.into(),
            stamp_value: constants::TRUE_VALUE.into(),
            cycle_policy: CyclePolicy::default(),
        }
    }
}

impl InheritOptions {
    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    pub fn with_template_id_attr(mut self, key: impl Into<SmolStr>) -> Self {
        self.template_id_attr = key.into();
        self
    }

    pub fn with_parent_ref_attr(mut self, key: impl Into<SmolStr>) -> Self {
        self.parent_ref_attr = key.into();
        self
    }

    pub fn with_list_item(mut self, marker: impl Into<SmolStr>) -> Self {
        self.list_item = marker.into();
        self
    }

    pub fn template_id<'a>(&self, node: &'a Node) -> Option<&'a str> {
        node.attr(&self.template_id_attr)
    }

    pub fn parent_ref<'a>(&self, node: &'a Node) -> Option<&'a str> {
        node.attr(&self.parent_ref_attr)
    }

    /// True when the node's opt-out attribute holds the false sentinel.
    pub fn opts_out(&self, node: &Node) -> bool {
        node.attr(&self.inherit_attr)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(&self.false_sentinel))
    }

    pub fn is_abstract(&self, node: &Node) -> bool {
        node.attr(&self.abstract_attr)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    pub fn is_inherited(&self, node: &Node) -> bool {
        node.attr(&self.inherited_attr) == Some(self.stamp_value.as_str())
    }

    pub fn stamp_inherited(&self, node: &mut Node) {
        node.set_attr(self.inherited_attr.clone(), self.stamp_value.as_str());
    }

    pub fn is_list_item(&self, node: &Node) -> bool {
        node.is_list_item(&self.list_item)
    }
}
