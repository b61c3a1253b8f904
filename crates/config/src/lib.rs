//! Configuration types (toast timing and theme, modal styling, stylesheet)
//! shared by the veneer crates.
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

mod defaults;
mod error;
mod loader;
mod modal;
mod raw;
mod toast;
mod types;

#[cfg(test)]
mod test_parse;

pub use error::{Error, excerpt_at};
pub use loader::{load, load_from_path, load_from_str};
pub use modal::Modal;
pub use raw::RawToastStyle;
pub use toast::Toast;
pub use types::{ToastKind, ToastStyle, ToastTheme};

/// Top-level toolkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Prefix for every class name and element id the toolkit generates.
    #[serde(default = "defaults::default_prefix")]
    pub prefix: String,

    /// Toast timing and theme.
    #[serde(default)]
    pub toast: Toast,

    /// Modal styling.
    #[serde(default)]
    pub modal: Modal,

    /// Replacement for the built-in stylesheet injected on start.
    #[serde(default)]
    pub stylesheet: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: defaults::default_prefix(),
            toast: Toast::default(),
            modal: Modal::default(),
            stylesheet: None,
        }
    }
}

impl Config {
    /// Check values that parse but are not usable.
    pub fn validate(&self) -> Result<(), Error> {
        if self.prefix.is_empty() || self.prefix.contains(char::is_whitespace) {
            return Err(Error::Validation {
                path: None,
                message: format!("prefix must be a non-empty word, got {:?}", self.prefix),
            });
        }
        self.toast.validate()?;
        self.modal.validate()
    }

    /// Class or id name under this config's prefix: `class("toast")` is
    /// `veneer-toast` with the default prefix.
    pub fn class(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }
}

/// Parse color into raw rgb tuple.
pub(crate) fn parse_rgb(s: &str) -> Option<(u8, u8, u8)> {
    colornames::Color::try_from(s).ok().map(|c| c.rgb())
}

/// Convert an RGB tuple into a canonical `#rrggbb` string.
pub(crate) fn rgb_to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Determine the preferred user config path (`~/.veneer/config.toml`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".veneer");
    p.push("config.toml");
    p
}

/// Resolve the effective config path.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.veneer/config.toml` when it exists.
/// 3) Else `None`: the caller runs on built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
