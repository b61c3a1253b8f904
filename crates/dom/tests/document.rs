use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use dom::{Document, Error, Inline, handler};

#[test]
fn append_moves_and_rejects_cycles() {
    let doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    doc.append_child(doc.body(), a).unwrap();
    doc.append_child(a, b).unwrap();
    assert!(doc.is_connected(b));

    // Moving b to body detaches it from a.
    doc.append_child(doc.body(), b).unwrap();
    assert!(doc.children(a).is_empty());
    assert_eq!(doc.parent(b), Some(doc.body()));

    doc.append_child(a, b).unwrap();
    assert_eq!(
        doc.append_child(b, a),
        Err(Error::Hierarchy {
            parent: b,
            child: a
        })
    );
}

#[test]
fn contains_covers_self_and_descendants() {
    let doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("span");
    let c = doc.create_element("i");
    doc.append_child(a, b).unwrap();
    doc.append_child(b, c).unwrap();
    assert!(doc.contains(a, a));
    assert!(doc.contains(a, c));
    assert!(!doc.contains(c, a));
    doc.destroy(c).unwrap();
    assert!(!doc.contains(a, c));
}

#[test]
fn destroy_drops_subtree_and_reports_stale_ids() {
    let doc = Document::new();
    let before = doc.node_count();
    let outer = doc.create_element("div");
    let inner = doc.create_element("span");
    doc.append_child(outer, inner).unwrap();
    doc.append_child(doc.body(), outer).unwrap();

    doc.destroy(outer).unwrap();
    assert_eq!(doc.node_count(), before);
    assert!(!doc.exists(inner));
    assert_eq!(doc.set_text(inner, "x"), Err(Error::NoSuchNode(inner)));
    assert!(doc.children(doc.body()).is_empty());
}

#[test]
fn remove_child_only_detaches_direct_children() {
    let doc = Document::new();
    let a = doc.create_element("div");
    doc.append_child(doc.head(), a).unwrap();
    assert!(!doc.remove_child(doc.body(), a).unwrap());
    assert!(doc.remove_child(doc.head(), a).unwrap());
    assert!(doc.exists(a));
    assert!(!doc.is_connected(a));
}

#[test]
fn events_bubble_and_listeners_may_mutate_the_tree() {
    let doc = Document::new();
    let outer = doc.create_element("div");
    let inner = doc.create_element("button");
    doc.append_child(outer, inner).unwrap();
    doc.append_child(doc.body(), outer).unwrap();

    let at_target = Arc::new(AtomicUsize::new(0));
    let seen = at_target.clone();
    doc.add_event_listener(
        outer,
        "click",
        handler(move |doc, ev| {
            if ev.at_target() {
                seen.fetch_add(1, Ordering::SeqCst);
            }
            // Re-entrant mutation while dispatching must not deadlock.
            doc.set_prop(ev.current_target, "clicked", true).unwrap();
        }),
    )
    .unwrap();

    assert_eq!(doc.click(inner).unwrap(), 1);
    assert_eq!(at_target.load(Ordering::SeqCst), 0);
    assert!(doc.prop_bool(outer, "clicked"));

    assert_eq!(doc.click(outer).unwrap(), 1);
    assert_eq!(at_target.load(Ordering::SeqCst), 1);
}

#[test]
fn duplicate_listeners_all_run() {
    let doc = Document::new();
    let n = doc.create_element("input");
    let count = Arc::new(AtomicUsize::new(0));
    for _ in 0..2 {
        let count = count.clone();
        doc.add_event_listener(
            n,
            "input",
            handler(move |_, _| {
                count.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
    }
    assert_eq!(doc.listener_count(n, "input"), 2);
    doc.input(n, "abc").unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(doc.prop_str(n, "value"), "abc");
}

#[test]
fn text_and_markup_replace_children() {
    let doc = Document::new();
    let p = doc.create_element("p");
    let child = doc.create_element("b");
    doc.append_child(p, child).unwrap();
    doc.set_inner_html(p, "<i>hi</i> there").unwrap();
    assert!(!doc.exists(child));
    assert_eq!(doc.text_content(p).unwrap(), "hi there");
    assert_eq!(
        doc.inline(p),
        Some(Inline::Markup("<i>hi</i> there".to_string()))
    );

    doc.set_text(p, "<not markup>").unwrap();
    assert_eq!(
        doc.outer_html(p).unwrap(),
        "<p>&lt;not markup&gt;</p>"
    );
}

#[test]
fn queries_only_see_descendants() {
    let doc = Document::new();
    let a = doc.create_element("div");
    doc.set_class_name(a, "card wide").unwrap();
    doc.set_prop(a, "id", "first").unwrap();
    let b = doc.create_element("div");
    doc.set_class_name(b, "card").unwrap();
    doc.append_child(doc.body(), a).unwrap();
    doc.append_child(doc.body(), b).unwrap();
    let loose = doc.create_element("div");
    doc.set_class_name(loose, "card").unwrap();

    let all = doc.query_selector_all(doc.root(), ".card").unwrap();
    assert_eq!(all, vec![a, b]);
    assert_eq!(doc.query_selector(doc.root(), "div.wide").unwrap(), Some(a));
    assert_eq!(doc.get_element_by_id("first"), Some(a));
    assert!(doc.query_selector(doc.root(), "div span").is_err());
}

#[test]
fn choose_updates_option_flags() {
    let doc = Document::new();
    let select = doc.create_element("select");
    for v in ["a", "b"] {
        let opt = doc.create_element("option");
        doc.set_prop(opt, "value", v).unwrap();
        doc.set_prop(opt, "selected", v == "a").unwrap();
        doc.append_child(select, opt).unwrap();
    }
    doc.choose(select, "b").unwrap();
    let flags: Vec<bool> = doc
        .children(select)
        .into_iter()
        .map(|o| doc.prop_bool(o, "selected"))
        .collect();
    assert_eq!(flags, vec![false, true]);
    assert_eq!(doc.prop_str(select, "value"), "b");
}

#[test]
fn outer_html_renders_attributes_and_styles() {
    let doc = Document::new();
    let n = doc.create_element("input");
    doc.set_prop(n, "type", "checkbox").unwrap();
    doc.set_prop(n, "checked", true).unwrap();
    doc.set_prop(n, "disabled", false).unwrap();
    doc.set_style(n, "zIndex", "9999").unwrap();
    assert_eq!(
        doc.outer_html(n).unwrap(),
        "<input type=\"checkbox\" checked style=\"z-index: 9999\">"
    );
}
