//! Named style blocks in the document head.

use dom::{Document, NodeId};
use tracing::{debug, trace};

use crate::{
    Result,
    element::{ElementOptions, build_element},
};

/// Append a `<style id=…>` block with `css` to the head.
///
/// Returns `None` without touching the document when an element with `id`
/// already exists anywhere in it.
pub fn inject_style(doc: &Document, id: &str, css: &str) -> Result<Option<NodeId>> {
    if doc.get_element_by_id(id).is_some() {
        trace!(id, "style_already_present");
        return Ok(None);
    }
    let node = build_element(doc, "style", ElementOptions::new().prop("id", id).text(css))?;
    doc.append_child(doc.head(), node)?;
    debug!(id, bytes = css.len(), "style_injected");
    Ok(Some(node))
}

/// Remove the style block registered under `id`. Returns `false` when no such
/// block is attached to the head.
pub fn remove_style(doc: &Document, id: &str) -> Result<bool> {
    let Some(node) = doc.get_element_by_id(id) else {
        trace!(id, "style_absent");
        return Ok(false);
    };
    if !doc.remove_child(doc.head(), node)? {
        trace!(id, "style_not_in_head");
        return Ok(false);
    }
    doc.destroy(node)?;
    debug!(id, "style_removed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_is_idempotent_per_id() {
        let doc = Document::new();
        let first = inject_style(&doc, "theme", "body { color: red; }").unwrap();
        let node = first.expect("first inject creates a node");
        assert_eq!(doc.parent(node), Some(doc.head()));
        assert_eq!(doc.text_content(node).as_deref(), Some("body { color: red; }"));

        assert_eq!(inject_style(&doc, "theme", "other").unwrap(), None);
        assert_eq!(doc.children(doc.head()).len(), 1);

        assert!(remove_style(&doc, "theme").unwrap());
        assert!(!remove_style(&doc, "theme").unwrap());
        assert!(inject_style(&doc, "theme", "x").unwrap().is_some());
    }

    #[test]
    fn ids_outside_head_are_not_removed() {
        let doc = Document::new();
        let div = doc.create_element("div");
        doc.set_prop(div, "id", "taken").unwrap();
        doc.append_child(doc.body(), div).unwrap();

        assert_eq!(inject_style(&doc, "taken", "x").unwrap(), None);
        assert!(!remove_style(&doc, "taken").unwrap());
        assert!(doc.exists(div));
    }
}
