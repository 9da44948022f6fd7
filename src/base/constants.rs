//! Default attribute keys and sentinels understood by the inheritance engine.
//!
//! These are the defaults of [`crate::inherit::InheritOptions`]; callers with a
//! different document vocabulary override them there.

/// Attribute carrying a node's unique template identifier.
pub const TEMPLATE_ID_ATTR: &str = "Name";

/// Attribute naming the template a node inherits from.
pub const PARENT_REF_ATTR: &str = "ParentName";

/// Attribute that suppresses merging when set to [`FALSE_SENTINEL`].
pub const INHERIT_ATTR: &str = "Inherit";

/// Attribute marking a template-only node.
pub const ABSTRACT_ATTR: &str = "Abstract";

/// Attribute stamped onto every node that took part in a merge.
pub const INHERITED_ATTR: &str = "Inherited";

/// Element name of an entry in an unnamed list field.
pub const LIST_ITEM: &str = "li";

/// Value of [`INHERIT_ATTR`] that opts a node out of inheritance.
pub const FALSE_SENTINEL: &str = "false";

/// Value written to [`INHERITED_ATTR`].
pub const TRUE_VALUE: &str = "true";

/// Extension of definition documents collected by the layer loader.
pub const DOCUMENT_EXTENSION: &str = "xml";
