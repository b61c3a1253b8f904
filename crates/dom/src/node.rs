//! Node storage for the document tree.

use indexmap::IndexMap;
use serde_json::Value;
use slotmap::new_key_type;

use crate::event::Handler;

new_key_type! {
    /// Stable handle to a node in a [`Document`](crate::Document).
    ///
    /// Ids are never reused after a node is destroyed, so a stale id reliably
    /// reports [`Error::NoSuchNode`](crate::Error::NoSuchNode).
    pub struct NodeId;
}

/// Inline content assigned directly to a node instead of composed children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text; escaped on serialization.
    Text(String),
    /// Raw markup; emitted verbatim and never sanitized.
    Markup(String),
}

/// A registered event listener.
pub(crate) struct Listener {
    /// Event name the listener reacts to.
    pub(crate) kind: String,
    /// Callback invoked on dispatch.
    pub(crate) handler: Handler,
}

/// Per-node state held in the document arena.
pub(crate) struct NodeData {
    /// Lowercased tag name.
    pub(crate) tag: String,
    /// Parent node, when attached.
    pub(crate) parent: Option<NodeId>,
    /// Ordered child nodes.
    pub(crate) children: Vec<NodeId>,
    /// Space-separated class list.
    pub(crate) class_name: String,
    /// Inline style declarations, in assignment order.
    pub(crate) style: IndexMap<String, String>,
    /// Plain properties (`id`, `value`, `checked`, `type`, ...).
    pub(crate) props: IndexMap<String, Value>,
    /// Text or markup content, if any.
    pub(crate) inline: Option<Inline>,
    /// Attached listeners, in registration order.
    pub(crate) listeners: Vec<Listener>,
}

impl NodeData {
    /// Create an empty, detached node for `tag`.
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            class_name: String::new(),
            style: IndexMap::new(),
            props: IndexMap::new(),
            inline: None,
            listeners: Vec::new(),
        }
    }

    /// The `id` property, when it is a string.
    pub(crate) fn id(&self) -> Option<&str> {
        self.props.get("id").and_then(Value::as_str)
    }

    /// Iterate the whitespace-separated classes.
    pub(crate) fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name.split_whitespace()
    }
}
