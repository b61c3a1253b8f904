//! Core configuration data types used in the config crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a toast notification; selects its color.
///
/// Parsing is total: unrecognized names fall back to [`ToastKind::Info`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ToastKind {
    /// Neutral information.
    #[default]
    Info,
    /// A completed action.
    Success,
    /// Something needs attention.
    Warning,
    /// A failure.
    Error,
}

impl ToastKind {
    /// All kinds, in theme order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];

    /// Parse a kind name, falling back to `Info` for anything unrecognized.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    /// Lowercase name, as used in class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl From<String> for ToastKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for ToastKind {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete per-kind toast styling with parsed colors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastStyle {
    /// Background fill color.
    pub bg: (u8, u8, u8),
    /// Text color.
    pub fg: (u8, u8, u8),
}

impl ToastStyle {
    /// Background as a CSS hex color.
    pub fn bg_css(&self) -> String {
        crate::rgb_to_hex(self.bg)
    }

    /// Text color as a CSS hex color.
    pub fn fg_css(&self) -> String {
        crate::rgb_to_hex(self.fg)
    }
}

/// Fully resolved toast theme for all kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastTheme {
    /// Style for Info toasts.
    pub info: ToastStyle,
    /// Style for Success toasts.
    pub success: ToastStyle,
    /// Style for Warning toasts.
    pub warning: ToastStyle,
    /// Style for Error toasts.
    pub error: ToastStyle,
}

impl ToastTheme {
    /// Pick the style for a toast kind.
    pub fn style_for(&self, kind: ToastKind) -> &ToastStyle {
        match kind {
            ToastKind::Info => &self.info,
            ToastKind::Success => &self.success,
            ToastKind::Warning => &self.warning,
            ToastKind::Error => &self.error,
        }
    }
}
