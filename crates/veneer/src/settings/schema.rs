//! Settings schema: keyed field descriptors and the values they produce.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One choice of a `select` control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value stored when chosen.
    pub value: String,
}

impl SelectOption {
    /// Build an option from a label and value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Control type together with its current value and type-specific bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Control {
    /// Checkbox.
    Switch {
        /// Checked state.
        value: bool,
    },
    /// Single-line text input.
    Text {
        /// Current text.
        value: String,
    },
    /// Integer input.
    Number {
        /// Current value; `NaN` after non-numeric input.
        value: f64,
        /// Lower bound hint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound hint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// Range input.
    Slider {
        /// Current value.
        value: f64,
        /// Lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        /// Step size; 1 when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
    },
    /// Dropdown.
    Select {
        /// Value of the chosen option.
        value: String,
        /// Choices in display order.
        options: Vec<SelectOption>,
    },
}

impl Control {
    /// Lowercase type name as it appears in serialized schemas.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Switch { .. } => "switch",
            Self::Text { .. } => "text",
            Self::Number { .. } => "number",
            Self::Slider { .. } => "slider",
            Self::Select { .. } => "select",
        }
    }

    /// Current value.
    pub fn value(&self) -> FieldValue {
        match self {
            Self::Switch { value } => FieldValue::Bool(*value),
            Self::Text { value } | Self::Select { value, .. } => FieldValue::Text(value.clone()),
            Self::Number { value, .. } | Self::Slider { value, .. } => FieldValue::Number(*value),
        }
    }

    /// Replace the current value. Returns `false`, leaving the control
    /// untouched, when `value` has the wrong primitive type.
    pub fn set_value(&mut self, value: FieldValue) -> bool {
        match (self, value) {
            (Self::Switch { value: v }, FieldValue::Bool(b)) => *v = b,
            (Self::Text { value: v } | Self::Select { value: v, .. }, FieldValue::Text(s)) => {
                *v = s
            }
            (Self::Number { value: v, .. } | Self::Slider { value: v, .. }, FieldValue::Number(n)) => {
                *v = n
            }
            _ => return false,
        }
        true
    }
}

/// One entry of a settings schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Display label.
    pub name: String,
    /// Optional help text shown under the control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Control type and value.
    #[serde(flatten)]
    pub control: Control,
}

impl FieldDescriptor {
    /// Descriptor with the given label and control.
    pub fn new(name: impl Into<String>, control: Control) -> Self {
        Self {
            name: name.into(),
            note: None,
            control,
        }
    }

    /// Checkbox field.
    pub fn switch(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, Control::Switch { value })
    }

    /// Text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(
            name,
            Control::Text {
                value: value.into(),
            },
        )
    }

    /// Integer field bounded by `min..=max`.
    pub fn number(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            name,
            Control::Number {
                value,
                min: Some(min),
                max: Some(max),
            },
        )
    }

    /// Range field bounded by `min..=max` with step 1.
    pub fn slider(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            name,
            Control::Slider {
                value,
                min: Some(min),
                max: Some(max),
                step: None,
            },
        )
    }

    /// Dropdown field over `(label, value)` pairs.
    pub fn select<L, V>(
        name: impl Into<String>,
        value: impl Into<String>,
        options: impl IntoIterator<Item = (L, V)>,
    ) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        Self::new(
            name,
            Control::Select {
                value: value.into(),
                options: options
                    .into_iter()
                    .map(|(l, v)| SelectOption::new(l, v))
                    .collect(),
            },
        )
    }

    /// Attach help text.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the step of a slider; other controls are returned unchanged.
    pub fn with_step(mut self, new_step: f64) -> Self {
        if let Control::Slider { step, .. } = &mut self.control {
            *step = Some(new_step);
        }
        self
    }

    /// Current value.
    pub fn value(&self) -> FieldValue {
        self.control.value()
    }
}

/// A value produced by a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Switch state.
    Bool(bool),
    /// Number or slider value.
    Number(f64),
    /// Text or select value.
    Text(String),
}

impl FieldValue {
    /// Boolean payload, if this is a switch value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric payload, if this is a number or slider value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload, if this is a text or select value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A single control edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Schema key of the edited field.
    pub key: String,
    /// New value.
    pub value: FieldValue,
}

/// Values collected from a settings panel, keyed and ordered like the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsValues(IndexMap<String, FieldValue>);

impl SettingsValues {
    /// Empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Keys in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for SettingsValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Ordered mapping from stable keys to field descriptors. Insertion order is
/// render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSchema(IndexMap<String, FieldDescriptor>);

impl SettingsSchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a schema from a JSON object.
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| Error::Schema(e.to_string()))
    }

    /// Add or replace `key`, keeping its original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, field: FieldDescriptor) {
        self.0.insert(key.into(), field);
    }

    /// Builder form of [`SettingsSchema::insert`].
    pub fn with(mut self, key: impl Into<String>, field: FieldDescriptor) -> Self {
        self.insert(key, field);
        self
    }

    /// Descriptor for `key`.
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.0.get(key)
    }

    /// Entries in render order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Current value of every field.
    pub fn values(&self) -> SettingsValues {
        SettingsValues(
            self.0
                .iter()
                .map(|(k, f)| (k.clone(), f.value()))
                .collect(),
        )
    }

    /// Apply one change. Returns `false` for unknown keys or mismatched types.
    pub fn apply_change(&mut self, change: &FieldChange) -> bool {
        self.0
            .get_mut(&change.key)
            .is_some_and(|f| f.control.set_value(change.value.clone()))
    }

    /// Apply every value whose key and type match; returns how many applied.
    pub fn apply(&mut self, values: &SettingsValues) -> usize {
        values
            .iter()
            .filter(|(key, value)| {
                self.0
                    .get_mut(*key)
                    .is_some_and(|f| f.control.set_value((*value).clone()))
            })
            .count()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for SettingsSchema {
    fn from_iter<I: IntoIterator<Item = (K, FieldDescriptor)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, f)| (k.into(), f)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SettingsSchema {
        SettingsSchema::new()
            .with("enabled", FieldDescriptor::switch("Enabled", true))
            .with(
                "volume",
                FieldDescriptor::slider("Volume", 50.0, 0.0, 100.0).with_step(5.0),
            )
            .with(
                "mode",
                FieldDescriptor::select("Mode", "a", [("A", "a"), ("B", "b")]),
            )
    }

    #[test]
    fn decodes_json_schema_in_order() {
        let schema = SettingsSchema::from_json(
            r#"{
                "zeta": {"name": "Z", "type": "text", "value": "x", "note": "n"},
                "alpha": {"name": "A", "type": "number", "value": 5, "min": 0, "max": 10}
            }"#,
        )
        .unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(schema.get("zeta").unwrap().note.as_deref(), Some("n"));
        assert_eq!(
            schema.get("alpha").unwrap().control,
            Control::Number {
                value: 5.0,
                min: Some(0.0),
                max: Some(10.0)
            }
        );
    }

    #[test]
    fn mismatched_value_type_is_rejected() {
        let err = SettingsSchema::from_json(r#"{"x": {"name": "X", "type": "switch", "value": "yes"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(SettingsSchema::from_json(r#"{"x": {"name": "X", "type": "color", "value": 1}}"#).is_err());
    }

    #[test]
    fn apply_respects_types_and_keys() {
        let mut schema = sample();
        let values: SettingsValues = [
            ("volume", FieldValue::from(80)),
            ("enabled", FieldValue::from("nope")),
            ("missing", FieldValue::from(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(schema.apply(&values), 1);
        assert_eq!(schema.get("volume").unwrap().value(), FieldValue::Number(80.0));
        assert_eq!(schema.get("enabled").unwrap().value(), FieldValue::Bool(true));

        assert!(schema.apply_change(&FieldChange {
            key: "mode".into(),
            value: "b".into(),
        }));
        assert_eq!(schema.values().get("mode"), Some(&FieldValue::from("b")));
    }

    #[test]
    fn values_serialize_as_plain_map() {
        let json = serde_json::to_string(&sample().values()).unwrap();
        assert_eq!(json, r#"{"enabled":true,"volume":50.0,"mode":"a"}"#);
    }
}
