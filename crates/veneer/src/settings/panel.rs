//! Rendering a schema into bound form controls.

use std::sync::Arc;

use config::Config;
use dom::{Document, Event, NodeId, Value};
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::{
    number::{parse_float, parse_int},
    schema::{Control, FieldChange, FieldDescriptor, FieldValue, SettingsSchema, SettingsValues},
};
use crate::{
    Result,
    element::{ElementOptions, build_element},
};

/// Callback receiving the collected values when the panel is saved.
pub type SaveCallback = Arc<dyn Fn(&SettingsValues) + Send + Sync>;

/// Observer notified after every control edit.
type ChangeObserver = Arc<dyn Fn(&FieldChange) + Send + Sync>;

/// Ties a schema key to its working descriptor and the input producing it.
struct Binding {
    /// Schema key.
    key: String,
    /// Working copy of the descriptor.
    field: FieldDescriptor,
    /// Live input node.
    input: NodeId,
}

/// Mutable panel state shared with the control listeners.
#[derive(Default)]
struct PanelState {
    /// One binding per schema entry, in render order.
    bindings: Vec<Binding>,
    /// Registered change observers.
    observers: Vec<ChangeObserver>,
}

/// A rendered settings panel.
///
/// Clones share state. Dropping every handle leaves the panel working; the
/// listeners in the document keep its state alive.
#[derive(Clone)]
pub struct SettingsPanel {
    /// Panel root node.
    node: NodeId,
    /// "Save Settings" button.
    save_button: NodeId,
    /// Bindings and observers.
    state: Arc<Mutex<PanelState>>,
    /// Receives collected values on save.
    on_save: SaveCallback,
}

impl SettingsPanel {
    /// Root node of the panel. It is returned detached; attach it where needed.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The save button.
    pub fn save_button(&self) -> NodeId {
        self.save_button
    }

    /// Input node rendered for `key`.
    pub fn input(&self, key: &str) -> Option<NodeId> {
        self.state
            .lock()
            .bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.input)
    }

    /// Current value of `key`.
    pub fn value(&self, key: &str) -> Option<FieldValue> {
        self.state
            .lock()
            .bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.field.value())
    }

    /// Snapshot of every bound value in schema order.
    pub fn values(&self) -> SettingsValues {
        collect(&self.state)
    }

    /// Snapshot of the working schema.
    pub fn schema(&self) -> SettingsSchema {
        self.state
            .lock()
            .bindings
            .iter()
            .map(|b| (b.key.clone(), b.field.clone()))
            .collect()
    }

    /// Register an observer called after every control edit.
    pub fn on_change<F>(&self, f: F)
    where
        F: Fn(&FieldChange) + Send + Sync + 'static,
    {
        self.state.lock().observers.push(Arc::new(f));
    }

    /// Collect the current values and hand them to the save callback, exactly
    /// as the save button does. Returns the collected values.
    pub fn save(&self) -> SettingsValues {
        run_save(&self.state, &self.on_save)
    }
}

/// Collect values from the bindings.
fn collect(state: &Mutex<PanelState>) -> SettingsValues {
    state
        .lock()
        .bindings
        .iter()
        .map(|b| (b.key.clone(), b.field.value()))
        .collect()
}

/// Collect values and pass them to `on_save`.
fn run_save(state: &Mutex<PanelState>, on_save: &SaveCallback) -> SettingsValues {
    let values = collect(state);
    debug!(fields = values.len(), "settings_saved");
    on_save(&values);
    values
}

/// Read the new value of a control from its input node.
fn read_control(doc: &Document, input: NodeId, control: &Control) -> FieldValue {
    match control {
        Control::Switch { .. } => FieldValue::Bool(doc.prop_bool(input, "checked")),
        Control::Text { .. } | Control::Select { .. } => FieldValue::Text(doc.prop_str(input, "value")),
        Control::Number { .. } => FieldValue::Number(parse_int(&doc.prop_str(input, "value"))),
        Control::Slider { .. } => FieldValue::Number(parse_float(&doc.prop_str(input, "value"))),
    }
}

/// Listener body shared by every control: update the binding at `index` and
/// notify observers.
fn on_control_event(state: &Mutex<PanelState>, index: usize, doc: &Document, ev: &Event) {
    let (change, observers) = {
        let mut st = state.lock();
        let Some(binding) = st.bindings.get_mut(index) else {
            return;
        };
        let value = read_control(doc, ev.current_target, &binding.field.control);
        if value.as_f64().is_some_and(f64::is_nan) {
            debug!(key = %binding.key, raw = %doc.prop_str(ev.current_target, "value"), "settings_value_nan");
        }
        binding.field.control.set_value(value.clone());
        trace!(key = %binding.key, value = %value, "settings_value_changed");
        let change = FieldChange {
            key: binding.key.clone(),
            value,
        };
        (change, st.observers.clone())
    };
    for observer in observers {
        observer(&change);
    }
}

/// Options for the input node of `control`, without listeners.
fn control_options(control: &Control) -> ElementOptions {
    let bound = |opts: ElementOptions, key: &str, v: Option<f64>| match v {
        Some(v) => opts.prop(key, v),
        None => opts,
    };
    match control {
        Control::Switch { value } => ElementOptions::new()
            .prop("type", "checkbox")
            .prop("checked", *value),
        Control::Text { value } => ElementOptions::new()
            .prop("type", "text")
            .prop("value", value.as_str()),
        Control::Number { value, min, max } => {
            let opts = ElementOptions::new()
                .prop("type", "number")
                .prop("value", value.to_string());
            bound(bound(opts, "min", *min), "max", *max)
        }
        Control::Slider {
            value,
            min,
            max,
            step,
        } => {
            let opts = ElementOptions::new()
                .prop("type", "range")
                .prop("value", value.to_string());
            bound(bound(opts, "min", *min), "max", *max).prop("step", slider_step(*step))
        }
        Control::Select { value, .. } => ElementOptions::new().prop("value", value.as_str()),
    }
}

/// Slider granularity; missing, zero, negative or non-finite steps fall back
/// to 1.
fn slider_step(step: Option<f64>) -> f64 {
    step.filter(|s| s.is_finite() && *s > 0.0).unwrap_or(1.0)
}

/// Build the input node for `control`, including select options.
fn build_control(
    doc: &Document,
    control: &Control,
    state: &Arc<Mutex<PanelState>>,
    index: usize,
) -> Result<NodeId> {
    let (tag, event) = match control {
        Control::Switch { .. } => ("input", "change"),
        Control::Select { .. } => ("select", "change"),
        _ => ("input", "input"),
    };
    let st = state.clone();
    let opts = control_options(control)
        .on(event, move |doc, ev| on_control_event(&st, index, doc, ev));
    let input = build_element(doc, tag, opts)?;

    if let Control::Select { value, options } = control {
        for option in options {
            let opt = build_element(
                doc,
                "option",
                ElementOptions::new()
                    .prop("value", option.value.as_str())
                    .text(option.label.as_str())
                    .prop("selected", Value::Bool(option.value == *value)),
            )?;
            doc.append_child(input, opt)?;
        }
    }
    Ok(input)
}

/// Render `schema` into a detached settings panel.
///
/// Each field becomes a row with a label, a control bound to a working copy of
/// its descriptor, and an optional note. A trailing "Save Settings" button
/// passes the collected values to `on_save`.
pub fn render_settings_panel<F>(
    doc: &Document,
    config: &Config,
    schema: &SettingsSchema,
    on_save: F,
) -> Result<SettingsPanel>
where
    F: Fn(&SettingsValues) + Send + Sync + 'static,
{
    let state = Arc::new(Mutex::new(PanelState::default()));
    let panel = build_element(
        doc,
        "div",
        ElementOptions::new().class(config.class("settings-panel")),
    )?;

    for (index, (key, field)) in schema.iter().enumerate() {
        let row = build_element(
            doc,
            "div",
            ElementOptions::new().class(config.class("setting-item")),
        )?;
        let label = build_element(doc, "label", ElementOptions::new().text(field.name.as_str()))?;
        doc.append_child(row, label)?;

        let input = build_control(doc, &field.control, &state, index)?;
        doc.append_child(row, input)?;

        if let Some(note) = field.note.as_deref().filter(|n| !n.is_empty()) {
            let note = build_element(
                doc,
                "div",
                ElementOptions::new()
                    .class(config.class("setting-note"))
                    .text(note),
            )?;
            doc.append_child(row, note)?;
        }

        doc.append_child(panel, row)?;
        state.lock().bindings.push(Binding {
            key: key.to_string(),
            field: field.clone(),
            input,
        });
    }

    let on_save: SaveCallback = Arc::new(on_save);
    let save_state = state.clone();
    let save_cb = on_save.clone();
    let save_button = build_element(
        doc,
        "button",
        ElementOptions::new()
            .text("Save Settings")
            .on("click", move |_, _| {
                run_save(&save_state, &save_cb);
            }),
    )?;
    doc.append_child(panel, save_button)?;

    debug!(fields = schema.len(), panel = ?panel, "settings_panel_rendered");
    Ok(SettingsPanel {
        node: panel,
        save_button,
        state,
        on_save,
    })
}
