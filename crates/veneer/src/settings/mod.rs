//! Settings schemas and the panels rendered from them.
//!
//! A [`SettingsSchema`] maps stable keys to [`FieldDescriptor`]s. Rendering it
//! with [`render_settings_panel`] yields a [`SettingsPanel`] whose controls are
//! bound to a working copy of each descriptor. Edits are reported as
//! [`FieldChange`]s; saving collects a [`SettingsValues`] map keyed exactly like
//! the schema. The caller's schema is never modified; use
//! [`SettingsSchema::apply`] or [`SettingsSchema::apply_change`] to fold values
//! back in.

mod number;
mod panel;
mod schema;

pub use number::{parse_float, parse_int};
pub use panel::{SaveCallback, SettingsPanel, render_settings_panel};
pub use schema::{
    Control, FieldChange, FieldDescriptor, FieldValue, SelectOption, SettingsSchema, SettingsValues,
};
