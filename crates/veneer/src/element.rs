//! Element construction from a tag name and an option bag.
//!
//! [`ElementOptions`] collects everything that is applied to a fresh node:
//! plain properties, inline style, class name, one content slot and event
//! listeners. [`build_element`] creates the node and applies the options; the
//! node is returned detached.

use std::fmt;

use dom::{Document, Event, Handler, NodeId, Value, handler};
use serde_json::Map;
use tracing::trace;

use crate::Result;

/// Literal content placed inside an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Escaped text.
    Text(String),
    /// Raw markup, stored as-is.
    Markup(String),
}

/// Options applied to a node by [`build_element`].
#[derive(Clone, Default)]
pub struct ElementOptions {
    /// Plain properties in assignment order.
    props: Vec<(String, Value)>,
    /// Inline style declarations in assignment order.
    style: Vec<(String, String)>,
    /// Replacement class list.
    class_name: Option<String>,
    /// Text or markup content; the last assignment wins.
    content: Option<Content>,
    /// Listeners to attach.
    events: Vec<(String, Handler)>,
}

impl fmt::Debug for ElementOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementOptions")
            .field("props", &self.props)
            .field("style", &self.style)
            .field("class_name", &self.class_name)
            .field("content", &self.content)
            .field("events", &self.events.len())
            .finish()
    }
}

impl ElementOptions {
    /// Empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a JSON-like property bag.
    ///
    /// `style` must be an object and is merged key by key. `className`,
    /// `innerHTML` and `textContent` go to their dedicated slots; every other
    /// key becomes a plain property. Event handlers cannot be expressed in data
    /// and are added with [`ElementOptions::on`].
    pub fn from_bag(bag: &Map<String, Value>) -> Self {
        bag.iter().fold(Self::new(), |opts, (key, value)| match key.as_str() {
            "style" => match value.as_object() {
                Some(decls) => decls
                    .iter()
                    .fold(opts, |o, (k, v)| o.style(k, CssValue(v))),
                None => opts,
            },
            _ => opts.prop(key, value.clone()),
        })
    }

    /// Assign a property. The keys `className`, `innerHTML` and `textContent`
    /// are routed to the class and content slots when given strings.
    pub fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match (key, value) {
            ("className", Value::String(s)) => self.class_name = Some(s),
            ("innerHTML", Value::String(s)) => self.content = Some(Content::Markup(s)),
            ("textContent", Value::String(s)) => self.content = Some(Content::Text(s)),
            (_, value) => self.props.push((key.to_string(), value)),
        }
        self
    }

    /// Merge one inline style declaration; later keys overwrite earlier ones.
    pub fn style(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.style.push((key.to_string(), value.to_string()));
        self
    }

    /// Replace the class list.
    pub fn class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set literal text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(Content::Text(text.into()));
        self
    }

    /// Set raw markup content.
    pub fn html(mut self, markup: impl Into<String>) -> Self {
        self.content = Some(Content::Markup(markup.into()));
        self
    }

    /// Attach a listener for `event`. Repeated calls add repeated listeners.
    pub fn on<F>(self, event: &str, f: F) -> Self
    where
        F: Fn(&Document, &Event) + Send + Sync + 'static,
    {
        self.on_handler(event, handler(f))
    }

    /// Attach an existing [`Handler`] for `event`.
    pub fn on_handler(mut self, event: &str, h: Handler) -> Self {
        self.events.push((event.to_string(), h));
        self
    }
}

/// Render a JSON scalar the way a style assignment would stringify it.
struct CssValue<'a>(&'a Value);

impl fmt::Display for CssValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => f.write_str(s),
            Value::Null => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

/// Create a detached `tag` node and apply `options` to it.
pub fn build_element(doc: &Document, tag: &str, options: ElementOptions) -> Result<NodeId> {
    let ElementOptions {
        props,
        style,
        class_name,
        content,
        events,
    } = options;

    let id = doc.create_element(tag);
    for (key, value) in props {
        doc.set_prop(id, &key, value)?;
    }
    for (key, value) in &style {
        doc.set_style(id, key, value)?;
    }
    if let Some(class_name) = class_name {
        doc.set_class_name(id, &class_name)?;
    }
    match content {
        Some(Content::Text(text)) => doc.set_text(id, &text)?,
        Some(Content::Markup(markup)) => doc.set_inner_html(id, &markup)?,
        None => {}
    }
    for (event, h) in events {
        doc.add_event_listener(id, &event, h)?;
    }
    trace!(tag, id = ?id, "element_built");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use serde_json::json;

    use super::*;

    #[test]
    fn applies_every_option_kind() {
        let doc = Document::new();
        let id = build_element(
            &doc,
            "input",
            ElementOptions::new()
                .prop("type", "checkbox")
                .prop("checked", true)
                .style("zIndex", 9999)
                .style("color", "red")
                .style("color", "blue")
                .class("a b"),
        )
        .unwrap();
        assert_eq!(doc.prop_str(id, "type"), "checkbox");
        assert!(doc.prop_bool(id, "checked"));
        assert_eq!(doc.style(id, "zIndex").as_deref(), Some("9999"));
        assert_eq!(doc.style(id, "color").as_deref(), Some("blue"));
        assert_eq!(doc.class_name(id).as_deref(), Some("a b"));
        assert_eq!(doc.parent(id), None);
    }

    #[test]
    fn text_is_never_markup() {
        let doc = Document::new();
        let id = build_element(&doc, "p", ElementOptions::new().text("<b>x</b>")).unwrap();
        assert_eq!(doc.outer_html(id).unwrap(), "<p>&lt;b&gt;x&lt;/b&gt;</p>");

        let id = build_element(&doc, "p", ElementOptions::new().html("<b>x</b>")).unwrap();
        assert_eq!(doc.outer_html(id).unwrap(), "<p><b>x</b></p>");
    }

    #[test]
    fn repeated_listeners_all_fire() {
        let doc = Document::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let (h1, h2) = (hits.clone(), hits.clone());
        let id = build_element(
            &doc,
            "button",
            ElementOptions::new()
                .on("click", move |_, _| {
                    h1.fetch_add(1, Ordering::SeqCst);
                })
                .on("click", move |_, _| {
                    h2.fetch_add(1, Ordering::SeqCst);
                }),
        )
        .unwrap();
        doc.click(id).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn bag_routes_special_keys() {
        let bag = json!({
            "className": "row",
            "style": {"top": 0, "position": "fixed"},
            "textContent": "hello",
            "title": "tip",
        });
        let doc = Document::new();
        let opts = ElementOptions::from_bag(bag.as_object().unwrap());
        let id = build_element(&doc, "div", opts).unwrap();
        assert_eq!(doc.class_name(id).as_deref(), Some("row"));
        assert_eq!(doc.style(id, "top").as_deref(), Some("0"));
        assert_eq!(doc.text_content(id).as_deref(), Some("hello"));
        assert_eq!(doc.prop_str(id, "title"), "tip");
        assert_eq!(doc.prop(id, "className"), None);
    }
}
