use serde::{Deserialize, Serialize};

// ===== RAW TOAST STYLE =====

/// Raw per-kind toast style with optional color names, merged over defaults
/// and resolved into a [`ToastStyle`](crate::ToastStyle).
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawToastStyle {
    /// Background color name or `#rrggbb`.
    #[serde(default)]
    pub bg: Option<String>,
    /// Text color name or `#rrggbb`.
    #[serde(default)]
    pub fg: Option<String>,
}

impl RawToastStyle {
    /// Fill unset fields from `base`.
    pub(crate) fn over(&self, base: &Self) -> Self {
        Self {
            bg: self.bg.clone().or_else(|| base.bg.clone()),
            fg: self.fg.clone().or_else(|| base.fg.clone()),
        }
    }
}
