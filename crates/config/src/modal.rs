//! Modal dialog styling.

use serde::{Deserialize, Serialize};

use crate::{Error, defaults, parse_rgb};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
/// Modal configuration section.
pub struct Modal {
    /// Backdrop fill. Any CSS color expression; not validated.
    #[serde(default = "defaults::default_modal_backdrop")]
    pub backdrop: String,
    /// Panel background color.
    #[serde(default = "defaults::default_modal_bg")]
    pub bg: String,
    /// Title text color.
    #[serde(default = "defaults::default_modal_title_fg")]
    pub title_fg: String,
    /// Close control color.
    #[serde(default = "defaults::default_modal_close_fg")]
    pub close_fg: String,
    /// Panel corner radius in pixels.
    #[serde(default = "defaults::default_modal_radius")]
    pub radius: f32,
    /// Panel padding in pixels.
    #[serde(default = "defaults::default_modal_padding")]
    pub padding: f32,
    /// Stacking order shared by modals and toasts.
    #[serde(default = "defaults::default_z_index")]
    pub z_index: i64,
}

impl Default for Modal {
    fn default() -> Self {
        Self {
            backdrop: defaults::default_modal_backdrop(),
            bg: defaults::default_modal_bg(),
            title_fg: defaults::default_modal_title_fg(),
            close_fg: defaults::default_modal_close_fg(),
            radius: defaults::MODAL_RADIUS,
            padding: defaults::MODAL_PADDING,
            z_index: defaults::Z_INDEX,
        }
    }
}

impl Modal {
    /// Panel background as `#rrggbb`.
    pub fn bg_css(&self) -> String {
        css_color(&self.bg)
    }

    /// Title color as `#rrggbb`.
    pub fn title_css(&self) -> String {
        css_color(&self.title_fg)
    }

    /// Close control color as `#rrggbb`.
    pub fn close_css(&self) -> String {
        css_color(&self.close_fg)
    }

    /// Check the named colors parse.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("bg", &self.bg),
            ("title_fg", &self.title_fg),
            ("close_fg", &self.close_fg),
        ] {
            if parse_rgb(value).is_none() {
                return Err(Error::Validation {
                    path: None,
                    message: format!("modal.{field}: unknown color {value:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Normalize a color name to hex, passing unknown values through untouched.
fn css_color(value: &str) -> String {
    parse_rgb(value).map_or_else(|| value.to_string(), crate::rgb_to_hex)
}
