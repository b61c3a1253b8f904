//! Markup serialization and text helpers.

use std::fmt::Write as _;

use serde_json::Value;
use slotmap::SlotMap;

use crate::node::{Inline, NodeData, NodeId};

/// Elements that never have a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Escape text for use between tags.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double-quoted attribute.
fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Convert a camelCase style key (`backgroundColor`) into its CSS form
/// (`background-color`). Keys that are already kebab-case pass through.
pub(crate) fn css_property(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Drop anything between `<` and `>`; good enough for reading back text from
/// markup we stored verbatim.
pub(crate) fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Render a property value as an attribute, or `None` when it should be omitted.
fn attr_value(v: &Value) -> Option<String> {
    match v {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some(String::new()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Serialize `id` and its subtree.
pub(crate) fn write_node(nodes: &SlotMap<NodeId, NodeData>, id: NodeId, out: &mut String) {
    let Some(node) = nodes.get(id) else { return };
    let _ignored = write!(out, "<{}", node.tag);
    if let Some(v) = node.props.get("id").and_then(attr_value) {
        let _ignored = write!(out, " id=\"{}\"", escape_attr(&v));
    }
    if !node.class_name.is_empty() {
        let _ignored = write!(out, " class=\"{}\"", escape_attr(&node.class_name));
    }
    for (k, v) in node.props.iter().filter(|(k, _)| k.as_str() != "id") {
        match attr_value(v) {
            Some(s) if s.is_empty() => {
                let _ignored = write!(out, " {k}");
            }
            Some(s) => {
                let _ignored = write!(out, " {k}=\"{}\"", escape_attr(&s));
            }
            None => {}
        }
    }
    if !node.style.is_empty() {
        let decls: Vec<String> = node
            .style
            .iter()
            .map(|(k, v)| format!("{}: {}", css_property(k), v))
            .collect();
        let _ignored = write!(out, " style=\"{}\"", escape_attr(&decls.join("; ")));
    }
    out.push('>');
    if VOID_TAGS.contains(&node.tag.as_str()) {
        return;
    }
    match &node.inline {
        Some(Inline::Text(t)) => out.push_str(&escape_text(t)),
        Some(Inline::Markup(m)) => out.push_str(m),
        None => {}
    }
    for child in &node.children {
        write_node(nodes, *child, out);
    }
    let _ignored = write!(out, "</{}>", node.tag);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_keys_are_kebab_cased() {
        assert_eq!(css_property("backgroundColor"), "background-color");
        assert_eq!(css_property("zIndex"), "z-index");
        assert_eq!(css_property("margin-top"), "margin-top");
    }

    #[test]
    fn strips_markup() {
        assert_eq!(strip_tags("<p>hi <b>there</b></p>"), "hi there");
        assert_eq!(strip_tags("a > b"), "a > b");
    }

    #[test]
    fn escapes() {
        assert_eq!(escape_text("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(escape_attr("\"x\""), "&quot;x&quot;");
    }
}
