//! Toast configuration and theme resolution.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, ToastStyle, ToastTheme, defaults, parse_rgb, raw::RawToastStyle};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
/// Toast configuration section.
pub struct Toast {
    /// Default on-screen lifetime, measured from `show()`, in milliseconds.
    #[serde(default = "defaults::default_toast_duration_ms")]
    pub duration_ms: u64,

    /// Delay between insertion and the fade-in to full opacity.
    #[serde(default = "defaults::default_toast_fade_in_ms")]
    pub fade_in_ms: u64,

    /// Grace period between fade-out and removal from the document.
    #[serde(default = "defaults::default_toast_grace_ms")]
    pub grace_ms: u64,

    /// Maximum number of shown toasts remembered in the backlog.
    #[serde(default = "defaults::default_toast_backlog")]
    pub backlog: usize,

    /// Corner radius in pixels.
    #[serde(default = "defaults::default_toast_radius")]
    pub radius: f32,

    /// Styling for Info toasts.
    #[serde(default = "defaults::default_toast_info_style")]
    pub(crate) info: RawToastStyle,
    /// Styling for Success toasts.
    #[serde(default = "defaults::default_toast_success_style")]
    pub(crate) success: RawToastStyle,
    /// Styling for Warning toasts.
    #[serde(default = "defaults::default_toast_warning_style")]
    pub(crate) warning: RawToastStyle,
    /// Styling for Error toasts.
    #[serde(default = "defaults::default_toast_error_style")]
    pub(crate) error: RawToastStyle,
}

impl Default for Toast {
    fn default() -> Self {
        Self {
            duration_ms: defaults::TOAST_DURATION_MS,
            fade_in_ms: defaults::TOAST_FADE_IN_MS,
            grace_ms: defaults::TOAST_GRACE_MS,
            backlog: defaults::TOAST_BACKLOG,
            radius: defaults::TOAST_RADIUS,
            info: defaults::default_toast_info_style(),
            success: defaults::default_toast_success_style(),
            warning: defaults::default_toast_warning_style(),
            error: defaults::default_toast_error_style(),
        }
    }
}

/// Resolve a raw toast style to concrete colors, falling back to `defaults`
/// for unset or unparseable values.
fn resolve_toast_style(raw: &RawToastStyle, defaults: &RawToastStyle) -> ToastStyle {
    /// Resolve a color from raw/default options with a fallback.
    fn color(raw: Option<&str>, def: Option<&str>) -> (u8, u8, u8) {
        raw.and_then(parse_rgb)
            .or_else(|| def.and_then(parse_rgb))
            .unwrap_or((0xff, 0xff, 0xff))
    }

    ToastStyle {
        bg: color(raw.bg.as_deref(), defaults.bg.as_deref()),
        fg: color(raw.fg.as_deref(), defaults.fg.as_deref()),
    }
}

impl Toast {
    /// Default lifetime as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Fade-in delay as a `Duration`.
    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    /// Removal grace period as a `Duration`.
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Resolve the effective toast theme by applying defaults and parsing colors.
    pub fn theme(&self) -> ToastTheme {
        let d = Self::default();
        ToastTheme {
            info: resolve_toast_style(&self.info, &d.info),
            success: resolve_toast_style(&self.success, &d.success),
            warning: resolve_toast_style(&self.warning, &d.warning),
            error: resolve_toast_style(&self.error, &d.error),
        }
    }

    /// Check every configured color parses.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        let d = Self::default();
        for (name, raw, def) in [
            ("info", &self.info, &d.info),
            ("success", &self.success, &d.success),
            ("warning", &self.warning, &d.warning),
            ("error", &self.error, &d.error),
        ] {
            let merged = raw.over(def);
            for (field, value) in [("bg", &merged.bg), ("fg", &merged.fg)] {
                if let Some(v) = value
                    && parse_rgb(v).is_none()
                {
                    return Err(Error::Validation {
                        path: None,
                        message: format!("toast.{name}.{field}: unknown color {v:?}"),
                    });
                }
            }
        }
        Ok(())
    }
}
