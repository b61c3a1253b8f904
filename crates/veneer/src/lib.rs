//! Embeddable UI construction and overlay lifecycle toolkit.
//!
//! Everything is built imperatively in a [`dom::Document`]:
//!
//! - [`build_element`]: one node from a tag and an [`ElementOptions`] bag
//! - [`render_settings_panel`]: bound form controls from a [`SettingsSchema`]
//! - [`ModalHandle`] and [`ToastHandle`]: overlays with explicit lifecycles,
//!   created through an [`OverlayManager`]
//! - [`inject_style`] and [`remove_style`]: named style blocks in the head
//!
//! [`Toolkit`] wires a document, a [`config::Config`] and [`HostServices`]
//! together and exposes the same operations as methods.

mod element;
mod error;
mod host;
mod overlay;
pub mod settings;
mod style;
mod timer;
mod toolkit;
pub mod util;

pub use config::ToastKind;
pub use element::{Content, ElementOptions, build_element};
pub use error::{Error, Result};
pub use host::{HostServices, MemoryHost};
pub use overlay::{
    BacklogEntry, ModalContent, ModalHandle, OverlayManager, ToastHandle, ToastId, ToastOptions,
    ToastPhase,
};
pub use settings::{
    Control, FieldChange, FieldDescriptor, FieldValue, SelectOption, SettingsPanel, SettingsSchema,
    SettingsValues, render_settings_panel,
};
pub use style::{inject_style, remove_style};
pub use timer::TimerQueue;
pub use toolkit::{NAME, Toolkit, ToolkitInfo, default_stylesheet};
