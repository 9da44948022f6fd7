//! Document node representation.
//!
//! A [`Node`] is an element with a name, an ordered attribute map and an
//! ordered child sequence. Children are elements, text leaves or comment
//! leaves. `Clone` is a deep copy: a cloned subtree never aliases its source.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::Position;

/// An element in a definition document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Definition type at document root, field name or list-item marker below.
    name: SmolStr,
    /// Attributes in source order.
    attributes: IndexMap<SmolStr, String>,
    /// Children in source order.
    children: Vec<Child>,
    /// Where the element started in its source document, if parsed from one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    position: Option<Position>,
}

/// A child of a [`Node`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Child {
    Element(Node),
    Text(String),
    Comment(String),
}

impl Child {
    pub fn as_element(&self) -> Option<&Node> {
        match self {
            Child::Element(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Node> {
        match self {
            Child::Element(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Child::Element(_))
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Element(node)
    }
}

impl Node {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            position: None,
        }
    }

    /// A scalar field: an element holding a single text leaf.
    pub fn field(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self::new(name).with_text(value)
    }

    /// A list entry named with the default list-item marker.
    pub fn list_item(value: impl Into<String>) -> Self {
        Self::field(crate::base::constants::LIST_ITEM, value)
    }

    pub fn with_attr(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.push_child(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Comment(text.into()));
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name as a cheaply clonable key.
    pub fn name_key(&self) -> &SmolStr {
        &self.name
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Set an attribute, keeping its original slot if it already existed.
    pub fn set_attr(&mut self, key: impl Into<SmolStr>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Child> {
        &mut self.children
    }

    /// Consume the node, keeping only its children.
    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    pub fn push_child(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    /// Element children in order, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(Child::as_element)
    }

    /// First element child with the given name.
    pub fn element(&self, name: &str) -> Option<&Node> {
        self.elements().find(|n| n.name == name)
    }

    pub fn element_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .filter_map(Child::as_element_mut)
            .find(|n| n.name == name)
    }

    /// Concatenated direct text content, `None` if there is none.
    pub fn text(&self) -> Option<String> {
        let mut texts = self.children.iter().filter_map(|c| match c {
            Child::Text(t) => Some(t.as_str()),
            _ => None,
        });
        let first = texts.next()?;
        Some(texts.fold(first.to_string(), |mut acc, t| {
            acc.push_str(t);
            acc
        }))
    }

    /// True when every direct child is text or a comment.
    ///
    /// Vacuously true for an element with no children.
    pub fn is_leaf(&self) -> bool {
        !self.children.iter().any(Child::is_element)
    }

    pub fn is_list_item(&self, marker: &str) -> bool {
        self.name == marker
    }

    /// Number of elements in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.elements().map(Node::subtree_len).sum::<usize>()
    }
}
