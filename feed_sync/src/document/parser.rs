//! Feed document parser
//!
//! Builds an owned [`Node`] tree with `quick-xml`. DOCTYPE declarations are
//! skipped and never resolved, so no DTD or external entity is ever loaded.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::document::node::{Document, Node};
use crate::error::{Error, Result};

/// Parse raw document bytes. `location` names the source in error messages.
pub fn parse_document(bytes: &[u8], location: &str) -> Result<Document> {
    let fail = |message: String| Error::ParseError {
        location: location.to_string(),
        message,
    };

    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| fail(format!("{} (at byte {})", e, reader.buffer_position())))?;

        match event {
            Event::Start(e) => {
                stack.push(element(&e).map_err(fail)?);
            }
            Event::Empty(e) => {
                let node = element(&e).map_err(fail)?;
                attach(&mut stack, &mut root, node).map_err(fail)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| fail("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, node).map_err(fail)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| fail(e.to_string()))?;
                    current.push_text(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, DOCTYPE
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(fail(format!("unclosed element <{}>", open.name())));
    }

    let root = root.ok_or_else(|| fail("document has no root element".to_string()))?;
    tracing::debug!(location, root = root.name(), "Parsed document");
    Ok(Document::new(root))
}

fn element(start: &BytesStart<'_>) -> std::result::Result<Node, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut node = Node::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
        node.insert_attribute(key, value);
    }

    Ok(node)
}

fn attach(
    stack: &mut [Node],
    root: &mut Option<Node>,
    node: Node,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(node);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(node);
            Ok(())
        }
        None => Err(format!("second root element <{}>", node.name())),
    }
}
