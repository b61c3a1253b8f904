//! Event values and listener callbacks.

use std::sync::Arc;

use crate::{Document, NodeId};

/// Listener callback. Receives the owning document so handlers can mutate the
/// tree without capturing a strong reference to it.
pub type Handler = Arc<dyn Fn(&Document, &Event) + Send + Sync>;

/// Wrap a closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Document, &Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An event travelling from its target up through the ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name, e.g. `click` or `input`.
    pub kind: String,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Node whose listener is currently running.
    pub current_target: NodeId,
}

impl Event {
    /// True when the listener runs on the node that originated the event.
    pub fn at_target(&self) -> bool {
        self.target == self.current_target
    }
}
