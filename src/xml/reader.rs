//! XML document reader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::XmlError;
use crate::base::LineIndex;
use crate::tree::{Child, Node};

/// Parse a whole document and return its root element.
///
/// Content outside the root element (declaration, processing instructions,
/// top-level comments) is dropped. Text is trimmed at both ends and dropped
/// when nothing is left.
pub fn parse_document(input: &[u8]) -> Result<Node, XmlError> {
    let lines = LineIndex::new(input);
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                let position = lines.position(reader.error_position() as usize);
                return Err(XmlError::syntax(position, e.to_string()));
            }
        };
        let end = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                // `end` is just past '>'; the tag spans "<" + content + ">"
                let start = end.saturating_sub(e.len() + 2);
                stack.push(element(&e)?.with_position(lines.position(start)));
            }
            Event::Empty(e) => {
                let start = end.saturating_sub(e.len() + 3);
                let node = element(&e)?.with_position(lines.position(start));
                attach(&mut stack, &mut root, node, &lines, start)?;
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    return Err(XmlError::syntax(lines.position(end), "unexpected end tag"));
                };
                attach(&mut stack, &mut root, node, &lines, end)?;
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| XmlError::xml(format!("Text error: {e}")))?;
                if let Some(parent) = stack.last_mut() {
                    if !text.is_empty() {
                        parent.push_child(Child::Text(text.into_owned()));
                    }
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|_| XmlError::InvalidUtf8("CDATA section"))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Child::Text(text));
                }
            }
            Event::Comment(e) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|_| XmlError::InvalidUtf8("comment"))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(Child::Comment(text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Unclosed(open.name().to_string()));
    }
    root.ok_or(XmlError::MissingRoot)
}

/// Parse a definition document and return the definitions under its root.
///
/// Text and comments directly under the root are dropped.
pub fn read_defs(input: &[u8]) -> Result<Vec<Node>, XmlError> {
    let root = parse_document(input)?;
    Ok(root
        .into_children()
        .into_iter()
        .filter_map(|child| match child {
            Child::Element(node) => Some(node),
            _ => None,
        })
        .collect())
}

fn element(e: &BytesStart<'_>) -> Result<Node, XmlError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|_| XmlError::InvalidUtf8("tag name"))?
        .to_string();
    let mut node = Node::new(name);

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| XmlError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|_| XmlError::InvalidUtf8("attribute key"))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::xml(format!("Attribute value error: {e}")))?
            .into_owned();
        node.set_attr(key, value);
    }
    Ok(node)
}

/// Hand a finished element to its parent, or make it the document root.
fn attach(
    stack: &mut [Node],
    root: &mut Option<Node>,
    node: Node,
    lines: &LineIndex,
    offset: usize,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::syntax(
            lines.position(offset),
            format!("second root element <{}>", node.name()),
        ));
    }
    *root = Some(node);
    Ok(())
}
