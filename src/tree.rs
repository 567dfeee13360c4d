//! Loosely-typed XML tree.
//!
//! The export is parsed into the shape generic XML-to-object converters
//! produce: every element becomes a mapping from child tag name to the list of
//! child values carrying that name, in document order. An element with no
//! attributes and no child elements collapses to a plain string.
//!
//! ```text
//! <item>                               Node {
//!   <title>Hello</title>                 "title":    [Scalar("Hello")],
//!   <category domain="c">Tech</category> "category": [Node { attrs: {domain}, text: "Tech" }],
//!   <category domain="c">Rust</category>             [.., Node { .. text: "Rust" }],
//! </item>                              }
//! ```
//!
//! [`Value`] makes the scalar/node split an explicit union, so callers never
//! guess at the shape of a child. Field lookups with default handling live in
//! [`crate::fields`].
//!
//! ## Text handling
//!
//! - Entity references in text and attribute values are unescaped.
//! - CDATA sections are taken verbatim.
//! - Whitespace-only text between child elements is dropped.
//! - Text inside a leaf element is kept as written, except that a leaf holding
//!   only whitespace (and no CDATA) reads as an empty element: `""`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("Invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Unexpected end of document inside <{0}>")]
    UnclosedElement(String),
    #[error("Closing tag </{0}> has no matching opening tag")]
    UnmatchedClose(String),
}

/// A child value: either collapsed text or a full element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Node(Node),
}

impl Value {
    /// Text of this value: the scalar itself, or the element's own text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Node(node) => node.text(),
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            Value::Scalar(_) => None,
        }
    }
}

/// An element with attributes, children, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    attributes: BTreeMap<String, String>,
    children: BTreeMap<String, Vec<Value>>,
    text: Option<String>,
}

/// Stand-in for elements that collapsed to a scalar but are read as nodes.
pub(crate) static EMPTY_NODE: Node = Node {
    attributes: BTreeMap::new(),
    children: BTreeMap::new(),
    text: None,
};

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values stored under `tag`, in document order.
    pub fn get(&self, tag: &str) -> Option<&[Value]> {
        self.children.get(tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.children.contains_key(tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Append a child value under `tag`.
    pub fn push(&mut self, tag: impl Into<String>, value: Value) {
        self.children.entry(tag.into()).or_default().push(value);
    }

    pub fn with_child(mut self, tag: impl Into<String>, value: Value) -> Self {
        self.push(tag, value);
        self
    }

    pub fn with_scalar(self, tag: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_child(tag, Value::Scalar(text.into()))
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn is_leaf(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }
}

/// An element that has been opened but not yet closed.
struct Frame {
    tag: String,
    node: Node,
    text: String,
    has_cdata: bool,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, ParseError> {
        let tag = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut node = Node::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::Xml {
                position,
                source: e.into(),
            })?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr
                .unescape_value()
                .map_err(|source| ParseError::Xml { position, source })?;
            node.attributes.insert(key, value.into_owned());
        }
        Ok(Self {
            tag,
            node,
            text: String::new(),
            has_cdata: false,
        })
    }

    fn close(self) -> (String, Value) {
        let Frame {
            tag,
            mut node,
            text,
            has_cdata,
        } = self;
        let significant = has_cdata || !text.trim().is_empty();
        let value = if node.is_leaf() {
            Value::Scalar(if significant { text } else { String::new() })
        } else {
            if significant {
                node.text = Some(text);
            }
            Value::Node(node)
        };
        (tag, value)
    }
}

/// Parse an XML document into a tree.
///
/// The returned node is a synthetic root whose only child is the document
/// element, so `parse("<rss>..</rss>")?.get("rss")` yields the `<rss>` value.
pub fn parse(xml: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut root = Node::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| ParseError::Xml { position, source })?;
        match event {
            Event::Start(start) => stack.push(Frame::open(&start, position)?),
            Event::Empty(start) => {
                let (tag, value) = Frame::open(&start, position)?.close();
                attach(&mut stack, &mut root, tag, value);
            }
            Event::End(end) => {
                let frame = stack.pop().ok_or_else(|| {
                    ParseError::UnmatchedClose(String::from_utf8_lossy(end.name().as_ref()).into())
                })?;
                let (tag, value) = frame.close();
                attach(&mut stack, &mut root, tag, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|source| ParseError::Xml { position, source })?;
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(std::str::from_utf8(&cdata)?);
                    frame.has_cdata = true;
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnclosedElement(open.tag));
    }
    Ok(root)
}

fn attach(stack: &mut [Frame], root: &mut Node, tag: String, value: Value) {
    match stack.last_mut() {
        Some(parent) => parent.node.push(tag, value),
        None => root.push(tag, value),
    }
}
