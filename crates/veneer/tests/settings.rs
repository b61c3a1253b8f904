use std::sync::Arc;

use config::Config;
use dom::Document;
use parking_lot::Mutex;
use veneer::{
    FieldChange, FieldDescriptor, FieldValue, SettingsSchema, SettingsValues, render_settings_panel,
};

fn capture() -> (Arc<Mutex<Vec<SettingsValues>>>, impl Fn(&SettingsValues) + Send + Sync + 'static) {
    let saved = Arc::new(Mutex::new(Vec::new()));
    let sink = saved.clone();
    (saved, move |v: &SettingsValues| sink.lock().push(v.clone()))
}

#[test]
fn slider_edit_is_saved() {
    let doc = Document::new();
    let schema = SettingsSchema::new().with(
        "volume",
        FieldDescriptor::slider("Volume", 50.0, 0.0, 100.0).with_step(5.0),
    );
    let (saved, on_save) = capture();
    let panel = render_settings_panel(&doc, &Config::default(), &schema, on_save).unwrap();

    let slider = panel.input("volume").unwrap();
    assert_eq!(doc.prop_str(slider, "type"), "range");
    assert_eq!(doc.prop(slider, "step"), Some(5.0.into()));
    doc.input(slider, "80").unwrap();
    doc.click(panel.save_button()).unwrap();

    let saved = saved.lock();
    assert_eq!(saved.len(), 1);
    let expected: SettingsValues = [("volume", 80.0)].into_iter().collect();
    assert_eq!(saved[0], expected);
    // The caller's schema is untouched.
    assert_eq!(schema.get("volume").unwrap().value(), FieldValue::Number(50.0));
}

#[test]
fn switch_tracks_checked_state() {
    let doc = Document::new();
    let schema = SettingsSchema::new().with("on", FieldDescriptor::switch("On", false));
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();
    let checkbox = panel.input("on").unwrap();
    assert!(!doc.prop_bool(checkbox, "checked"));

    for checked in [true, false, true, true, false] {
        doc.toggle(checkbox, checked).unwrap();
        assert_eq!(panel.value("on"), Some(FieldValue::Bool(checked)));
    }
}

#[test]
fn save_has_exactly_the_schema_keys() {
    let doc = Document::new();
    let schema = veneer::Toolkit::demo_schema()
        .with("volume", FieldDescriptor::slider("Volume", 1.0, 0.0, 2.0));
    let (saved, on_save) = capture();
    let panel = render_settings_panel(&doc, &Config::default(), &schema, on_save).unwrap();
    let values = panel.save();
    assert_eq!(values.keys().collect::<Vec<_>>(), schema.keys().collect::<Vec<_>>());
    assert_eq!(saved.lock()[0], values);
}

#[test]
fn controls_read_their_own_types() {
    let doc = Document::new();
    let schema = SettingsSchema::new()
        .with("name", FieldDescriptor::text("Name", "a"))
        .with("count", FieldDescriptor::number("Count", 5.0, 0.0, 10.0))
        .with(
            "mode",
            FieldDescriptor::select("Mode", "fast", [("Fast", "fast"), ("Slow", "slow")]),
        );
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();

    doc.input(panel.input("name").unwrap(), "bob").unwrap();
    doc.input(panel.input("count").unwrap(), "7.9").unwrap();
    doc.choose(panel.input("mode").unwrap(), "slow").unwrap();

    let values = panel.values();
    assert_eq!(values.get("name"), Some(&FieldValue::from("bob")));
    assert_eq!(values.get("count"), Some(&FieldValue::Number(7.0)));
    assert_eq!(values.get("mode"), Some(&FieldValue::from("slow")));

    doc.input(panel.input("count").unwrap(), "lots").unwrap();
    let count = panel.value("count").and_then(|v| v.as_f64()).unwrap();
    assert!(count.is_nan());
}

#[test]
fn select_marks_current_option() {
    let doc = Document::new();
    let schema = SettingsSchema::new().with(
        "mode",
        FieldDescriptor::select("Mode", "b", [("A", "a"), ("B", "b"), ("C", "c")]),
    );
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();
    let select = panel.input("mode").unwrap();
    let selected: Vec<bool> = doc
        .children(select)
        .into_iter()
        .map(|o| doc.prop_bool(o, "selected"))
        .collect();
    assert_eq!(selected, [false, true, false]);
}

#[test]
fn rows_follow_schema_order_with_optional_notes() {
    let doc = Document::new();
    let schema = SettingsSchema::new()
        .with("b", FieldDescriptor::text("B", "").with_note("second"))
        .with("a", FieldDescriptor::switch("A", true));
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();
    let root = panel.node();
    assert_eq!(doc.class_name(root).as_deref(), Some("veneer-settings-panel"));

    let rows = doc.query_selector_all(root, ".veneer-setting-item").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(doc.text_content(rows[0]).as_deref(), Some("Bsecond"));
    assert_eq!(doc.children(rows[1]).len(), 2);
    let notes = doc.query_selector_all(root, ".veneer-setting-note").unwrap();
    assert_eq!(notes.len(), 1);
}

#[test]
fn empty_schema_renders_only_save() {
    let doc = Document::new();
    let (saved, on_save) = capture();
    let panel = render_settings_panel(&doc, &Config::default(), &SettingsSchema::new(), on_save).unwrap();
    assert_eq!(doc.children(panel.node()), vec![panel.save_button()]);
    doc.click(panel.save_button()).unwrap();
    assert!(saved.lock()[0].is_empty());
}

#[test]
fn change_events_can_be_applied_by_the_caller() {
    let doc = Document::new();
    let schema = SettingsSchema::new().with("on", FieldDescriptor::switch("On", false));
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();
    let changes: Arc<Mutex<Vec<FieldChange>>> = Arc::default();
    let sink = changes.clone();
    panel.on_change(move |c| sink.lock().push(c.clone()));

    doc.toggle(panel.input("on").unwrap(), true).unwrap();
    let mut mine = schema.clone();
    for change in changes.lock().iter() {
        assert!(mine.apply_change(change));
    }
    assert_eq!(mine.get("on").unwrap().value(), FieldValue::Bool(true));
    assert_eq!(panel.schema(), mine);
}

#[test]
fn unusable_slider_steps_fall_back_to_one() {
    let doc = Document::new();
    let schema = SettingsSchema::new()
        .with("zero", FieldDescriptor::slider("Zero", 1.0, 0.0, 10.0).with_step(0.0))
        .with("nan", FieldDescriptor::slider("NaN", 1.0, 0.0, 10.0).with_step(f64::NAN))
        .with("none", FieldDescriptor::slider("None", 1.0, 0.0, 10.0))
        .with("half", FieldDescriptor::slider("Half", 1.0, 0.0, 10.0).with_step(0.5));
    let panel = render_settings_panel(&doc, &Config::default(), &schema, |_| {}).unwrap();
    for key in ["zero", "nan", "none"] {
        assert_eq!(doc.prop(panel.input(key).unwrap(), "step"), Some(1.0.into()), "{key}");
    }
    assert_eq!(doc.prop(panel.input("half").unwrap(), "step"), Some(0.5.into()));
}
