//! XML document writer.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::DEFS_ROOT;
use super::error::XmlError;
use crate::tree::{Child, Node};

/// Serialize one element and its subtree, indented by two spaces.
pub fn write_node(node: &Node) -> Result<Vec<u8>, XmlError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
    write_element(&mut writer, node)?;
    Ok(buffer.into_inner())
}

/// Serialize definitions as a complete document under a `Defs` root.
pub fn write_defs<'a>(defs: impl IntoIterator<Item = &'a Node>) -> Result<Vec<u8>, XmlError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| XmlError::xml(format!("Write error: {e}")))?;
    writer
        .write_event(Event::Start(BytesStart::new(DEFS_ROOT)))
        .map_err(|e| XmlError::xml(format!("Write error: {e}")))?;
    for def in defs {
        write_element(&mut writer, def)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(DEFS_ROOT)))
        .map_err(|e| XmlError::xml(format!("Write error: {e}")))?;

    let mut output = buffer.into_inner();
    output.push(b'\n');
    Ok(output)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), XmlError> {
    let mut start = BytesStart::new(node.name());
    for (key, value) in node.attributes() {
        start.push_attribute((key, value));
    }

    if node.children().is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::xml(format!("Write error: {e}")));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| XmlError::xml(format!("Write error: {e}")))?;
    for child in node.children() {
        match child {
            Child::Element(element) => write_element(writer, element)?,
            Child::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| XmlError::xml(format!("Write error: {e}")))?,
            // Comment bodies are written raw; escaping would change them
            Child::Comment(text) => writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(|e| XmlError::xml(format!("Write error: {e}")))?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name())))
        .map_err(|e| XmlError::xml(format!("Write error: {e}")))
}
