//! Minimal element visitor over quick-xml used by the scheme and workspace readers

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// An element boundary seen while reading a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Close {
        name: String,
    },
}

impl XmlNode {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            XmlNode::Open { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            XmlNode::Close { .. } => None,
        }
    }
}

/// Walk every element of `contents` in document order.
///
/// Self-closing elements produce an `Open` immediately followed by a `Close`.
/// The document must be well formed: a single root, matched tags, valid attributes.
pub fn visit_elements(
    contents: &str,
    mut visit: impl FnMut(&XmlNode),
) -> std::result::Result<(), String> {
    let mut reader = Reader::from_str(contents);
    reader.config_mut().trim_text(true);

    let mut open: Vec<String> = Vec::new();
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} (at byte {})", reader.error_position()))?;
        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                if open.is_empty() && saw_root {
                    return Err("document has more than one root element".to_string());
                }
                saw_root = true;
                let node = open_node(start)?;
                visit(&node);
                let name = element_name(start);
                if matches!(event, Event::Empty(_)) {
                    visit(&XmlNode::Close { name });
                } else {
                    open.push(name);
                }
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                open.pop();
                visit(&XmlNode::Close { name });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(format!("unexpected end of document, <{unclosed}> is not closed"));
    }
    if !saw_root {
        return Err("document has no root element".to_string());
    }
    Ok(())
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn open_node(start: &BytesStart<'_>) -> std::result::Result<XmlNode, String> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        attributes.push((key, value.into_owned()));
    }
    Ok(XmlNode::Open {
        name: element_name(start),
        attributes,
    })
}
