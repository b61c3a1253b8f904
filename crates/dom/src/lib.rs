//! In-memory document model used as the host UI surface.
//!
//! The toolkit never talks to a concrete UI framework. Instead it builds and
//! mutates a [`Document`]: a tree of element nodes with plain properties, inline
//! styles, class lists, text or raw markup content, and event listeners that
//! bubble from target to root. A host adapter renders the tree and feeds user
//! interaction back through [`Document::click`], [`Document::input`],
//! [`Document::toggle`] and [`Document::choose`].
//!
//! Queries support a small selector subset (see [`Selector`]).

mod document;
mod error;
mod event;
mod markup;
mod node;
mod selector;

pub use document::Document;
pub use error::{Error, Result};
pub use event::{Event, Handler, handler};
pub use node::{Inline, NodeId};
pub use selector::Selector;
pub use serde_json::Value;
