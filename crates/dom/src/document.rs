//! The shared document handle.

use std::{fmt, mem, sync::Arc};

use parking_lot::Mutex;
use serde_json::Value;
use slotmap::SlotMap;
use tracing::trace;

use crate::{
    Error, Result,
    event::{Event, Handler},
    markup,
    node::{Inline, Listener, NodeData, NodeId},
    selector::Selector,
};

/// Arena plus the fixed structural nodes.
struct Tree {
    /// All live nodes, attached or not.
    nodes: SlotMap<NodeId, NodeData>,
    /// The `html` root.
    root: NodeId,
    /// The `head` element.
    head: NodeId,
    /// The `body` element.
    body: NodeId,
}

impl Tree {
    /// Build `html > (head, body)`.
    fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new("html"));
        let head = nodes.insert(NodeData::new("head"));
        let body = nodes.insert(NodeData::new("body"));
        for child in [head, body] {
            nodes[child].parent = Some(root);
            nodes[root].children.push(child);
        }
        Self {
            nodes,
            root,
            head,
            body,
        }
    }

    /// Borrow a node or report it missing.
    fn get(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(Error::NoSuchNode(id))
    }

    /// Mutably borrow a node or report it missing.
    fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(Error::NoSuchNode(id))
    }

    /// Walk from `id` up to the topmost ancestor (inclusive).
    fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            path.push(n);
            cur = self.nodes.get(n).and_then(|d| d.parent);
        }
        path
    }

    /// Unlink `id` from its parent, if it has one.
    fn unlink(&mut self, id: NodeId) -> Result<()> {
        let parent = self.get_mut(id)?.parent.take();
        if let Some(p) = parent
            && let Some(pd) = self.nodes.get_mut(p)
        {
            pd.children.retain(|c| *c != id);
        }
        Ok(())
    }

    /// Collect `id` and all of its descendants, depth first.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(d) = self.nodes.get(n) {
                out.push(n);
                stack.extend(d.children.iter().rev());
            }
        }
        out
    }

    /// Remove children of `id` from the arena, returning their data so the
    /// caller can drop it outside the lock.
    fn clear_children(&mut self, id: NodeId) -> Result<Vec<NodeData>> {
        let children = mem::take(&mut self.get_mut(id)?.children);
        let mut removed = Vec::new();
        for child in children {
            for n in self.subtree(child) {
                removed.extend(self.nodes.remove(n));
            }
        }
        Ok(removed)
    }

    /// Descendants of `context` in document order, excluding `context`.
    fn descendants(&self, context: NodeId) -> Vec<NodeId> {
        let mut all = self.subtree(context);
        all.retain(|n| *n != context);
        all
    }
}

/// A cheaply clonable handle to a shared, in-memory document tree.
///
/// The tree starts as `html > (head, body)`. All operations lock internally and
/// release the lock before running event listeners, so listeners may freely
/// call back into the document.
#[derive(Clone)]
pub struct Document {
    /// Shared tree state.
    tree: Arc<Mutex<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            tree: Arc::new(Mutex::new(Tree::new())),
        }
    }

    /// The `html` root node.
    pub fn root(&self) -> NodeId {
        self.tree.lock().root
    }

    /// The `head` element.
    pub fn head(&self) -> NodeId {
        self.tree.lock().head
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.tree.lock().body
    }

    /// Number of live nodes in the arena, attached or not.
    pub fn node_count(&self) -> usize {
        self.tree.lock().nodes.len()
    }

    /// Create a detached element. Tag names are not validated.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let id = self.tree.lock().nodes.insert(NodeData::new(tag));
        trace!(tag, ?id, "create_element");
        id
    }

    /// True if `id` refers to a live node.
    pub fn exists(&self, id: NodeId) -> bool {
        self.tree.lock().nodes.contains_key(id)
    }

    /// True if `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let tree = self.tree.lock();
        tree.nodes.contains_key(id) && tree.ancestry(id).last() == Some(&tree.root)
    }

    /// True if `id` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let tree = self.tree.lock();
        tree.nodes.contains_key(id) && tree.ancestry(id).contains(&ancestor)
    }

    /// Lowercased tag name.
    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.tree.lock().nodes.get(id).map(|n| n.tag.clone())
    }

    /// Parent of `id`, when attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.lock().nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .lock()
            .nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Append `child` as the last child of `parent`, moving it if it is already
    /// attached elsewhere.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.tree.lock();
        tree.get(parent)?;
        tree.get(child)?;
        if tree.ancestry(parent).contains(&child) {
            return Err(Error::Hierarchy { parent, child });
        }
        tree.unlink(child)?;
        tree.get_mut(child)?.parent = Some(parent);
        tree.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`. Returns `false` if it was not a child.
    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<bool> {
        let mut tree = self.tree.lock();
        tree.get(parent)?;
        if tree.get(child)?.parent != Some(parent) {
            return Ok(false);
        }
        tree.unlink(child)?;
        Ok(true)
    }

    /// Detach `id` from wherever it is attached. The node stays alive.
    pub fn detach(&self, id: NodeId) -> Result<()> {
        self.tree.lock().unlink(id)
    }

    /// Detach `id` and drop it together with its whole subtree and listeners.
    pub fn destroy(&self, id: NodeId) -> Result<()> {
        let removed: Vec<NodeData> = {
            let mut tree = self.tree.lock();
            if id == tree.root || id == tree.head || id == tree.body {
                return Err(Error::Hierarchy {
                    parent: tree.root,
                    child: id,
                });
            }
            tree.unlink(id)?;
            tree.subtree(id)
                .into_iter()
                .filter_map(|n| tree.nodes.remove(n))
                .collect()
        };
        trace!(?id, count = removed.len(), "destroy");
        // Listeners are dropped here, after the lock is released.
        drop(removed);
        Ok(())
    }

    /// Assign a plain property.
    pub fn set_prop(&self, id: NodeId, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.tree.lock().get_mut(id)?.props.insert(key.to_string(), value);
        Ok(())
    }

    /// Read a plain property.
    pub fn prop(&self, id: NodeId, key: &str) -> Option<Value> {
        self.tree
            .lock()
            .nodes
            .get(id)
            .and_then(|n| n.props.get(key).cloned())
    }

    /// Read a string property, or an empty string when unset.
    pub fn prop_str(&self, id: NodeId, key: &str) -> String {
        match self.prop(id, key) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Read a boolean property; non-booleans read as `false`.
    pub fn prop_bool(&self, id: NodeId, key: &str) -> bool {
        matches!(self.prop(id, key), Some(Value::Bool(true)))
    }

    /// Set one inline style declaration, replacing any previous value.
    pub fn set_style(&self, id: NodeId, key: &str, value: &str) -> Result<()> {
        self.tree
            .lock()
            .get_mut(id)?
            .style
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Read one inline style declaration.
    pub fn style(&self, id: NodeId, key: &str) -> Option<String> {
        self.tree
            .lock()
            .nodes
            .get(id)
            .and_then(|n| n.style.get(key).cloned())
    }

    /// Replace the class list.
    pub fn set_class_name(&self, id: NodeId, class: &str) -> Result<()> {
        self.tree.lock().get_mut(id)?.class_name = class.to_string();
        Ok(())
    }

    /// The class list as a single string.
    pub fn class_name(&self, id: NodeId) -> Option<String> {
        self.tree.lock().nodes.get(id).map(|n| n.class_name.clone())
    }

    /// Replace all content of `id` with literal text.
    pub fn set_text(&self, id: NodeId, text: &str) -> Result<()> {
        self.set_inline(id, Inline::Text(text.to_string()))
    }

    /// Replace all content of `id` with raw, unsanitized markup.
    pub fn set_inner_html(&self, id: NodeId, markup: &str) -> Result<()> {
        self.set_inline(id, Inline::Markup(markup.to_string()))
    }

    /// Shared implementation for text and markup assignment.
    fn set_inline(&self, id: NodeId, inline: Inline) -> Result<()> {
        let removed = {
            let mut tree = self.tree.lock();
            let removed = tree.clear_children(id)?;
            tree.get_mut(id)?.inline = Some(inline);
            removed
        };
        drop(removed);
        Ok(())
    }

    /// Inline content assigned to `id`, if any.
    pub fn inline(&self, id: NodeId) -> Option<Inline> {
        self.tree.lock().nodes.get(id).and_then(|n| n.inline.clone())
    }

    /// Concatenated text of `id` and its descendants, with markup tags removed.
    pub fn text_content(&self, id: NodeId) -> Option<String> {
        let tree = self.tree.lock();
        tree.get(id).ok()?;
        let mut out = String::new();
        for n in tree.subtree(id) {
            match &tree.nodes[n].inline {
                Some(Inline::Text(t)) => out.push_str(t),
                Some(Inline::Markup(m)) => out.push_str(&markup::strip_tags(m)),
                None => {}
            }
        }
        Some(out)
    }

    /// Register a listener. Registering the same handler twice runs it twice.
    pub fn add_event_listener(&self, id: NodeId, kind: &str, handler: Handler) -> Result<()> {
        self.tree.lock().get_mut(id)?.listeners.push(Listener {
            kind: kind.to_string(),
            handler,
        });
        Ok(())
    }

    /// Number of listeners for `kind` registered directly on `id`.
    pub fn listener_count(&self, id: NodeId, kind: &str) -> usize {
        self.tree
            .lock()
            .nodes
            .get(id)
            .map(|n| n.listeners.iter().filter(|l| l.kind == kind).count())
            .unwrap_or(0)
    }

    /// Dispatch `kind` at `target`, bubbling through its ancestors. Returns
    /// the number of listeners invoked.
    ///
    /// Listeners are snapshotted before any of them runs; nodes destroyed by an
    /// earlier listener still receive the event if they were on the path.
    pub fn dispatch(&self, target: NodeId, kind: &str) -> Result<usize> {
        let calls: Vec<(NodeId, Handler)> = {
            let tree = self.tree.lock();
            tree.get(target)?;
            tree.ancestry(target)
                .into_iter()
                .flat_map(|n| {
                    tree.nodes[n]
                        .listeners
                        .iter()
                        .filter(|l| l.kind == kind)
                        .map(move |l| (n, l.handler.clone()))
                        .collect::<Vec<_>>()
                })
                .collect()
        };
        trace!(?target, kind, listeners = calls.len(), "dispatch");
        for (current_target, h) in &calls {
            let ev = Event {
                kind: kind.to_string(),
                target,
                current_target: *current_target,
            };
            h(self, &ev);
        }
        Ok(calls.len())
    }

    /// Find the first connected element whose `id` property equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.lock();
        tree.descendants(tree.root)
            .into_iter()
            .find(|n| tree.nodes[*n].id() == Some(id))
    }

    /// First descendant of `context` matching `selector`.
    pub fn query_selector(&self, context: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(context, selector)?.into_iter().next())
    }

    /// All descendants of `context` matching `selector`, in document order.
    pub fn query_selector_all(&self, context: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let sel = Selector::parse(selector)?;
        let tree = self.tree.lock();
        tree.get(context)?;
        Ok(tree
            .descendants(context)
            .into_iter()
            .filter(|n| sel.matches(&tree.nodes[*n]))
            .collect())
    }

    /// Serialize `id` and its subtree as markup.
    pub fn outer_html(&self, id: NodeId) -> Option<String> {
        let tree = self.tree.lock();
        tree.get(id).ok()?;
        let mut out = String::new();
        markup::write_node(&tree.nodes, id, &mut out);
        Some(out)
    }

    /// Deliver a click on `id`.
    pub fn click(&self, id: NodeId) -> Result<usize> {
        self.dispatch(id, "click")
    }

    /// Set the `value` of a text-like input and deliver `input`.
    pub fn input(&self, id: NodeId, text: &str) -> Result<usize> {
        self.set_prop(id, "value", text)?;
        self.dispatch(id, "input")
    }

    /// Set `checked` on a checkbox and deliver `change`.
    pub fn toggle(&self, id: NodeId, checked: bool) -> Result<usize> {
        self.set_prop(id, "checked", checked)?;
        self.dispatch(id, "change")
    }

    /// Select the option of a dropdown whose value is `value` and deliver
    /// `change`. Option `selected` flags are updated to match.
    pub fn choose(&self, id: NodeId, value: &str) -> Result<usize> {
        {
            let mut tree = self.tree.lock();
            let options = tree.get(id)?.children.clone();
            for opt in options {
                let node = tree.get_mut(opt)?;
                let hit = node.props.get("value").and_then(Value::as_str) == Some(value);
                node.props.insert("selected".into(), Value::Bool(hit));
            }
            tree.get_mut(id)?
                .props
                .insert("value".into(), Value::String(value.to_string()));
        }
        self.dispatch(id, "change")
    }
}
