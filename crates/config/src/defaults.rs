// Defaults and constants for toolkit configuration

use crate::raw::RawToastStyle;

pub(crate) const PREFIX: &str = "veneer";
pub(crate) fn default_prefix() -> String {
    PREFIX.to_string()
}

// Toast defaults
pub(crate) const TOAST_DURATION_MS: u64 = 3000;
pub(crate) const TOAST_FADE_IN_MS: u64 = 10;
pub(crate) const TOAST_GRACE_MS: u64 = 300;
pub(crate) const TOAST_BACKLOG: usize = 50;
pub(crate) const TOAST_RADIUS: f32 = 5.0;

pub(crate) const fn default_toast_duration_ms() -> u64 {
    TOAST_DURATION_MS
}
pub(crate) const fn default_toast_fade_in_ms() -> u64 {
    TOAST_FADE_IN_MS
}
pub(crate) const fn default_toast_grace_ms() -> u64 {
    TOAST_GRACE_MS
}
pub(crate) const fn default_toast_backlog() -> usize {
    TOAST_BACKLOG
}
pub(crate) const fn default_toast_radius() -> f32 {
    TOAST_RADIUS
}

fn toast_style(bg: &str) -> RawToastStyle {
    RawToastStyle {
        bg: Some(bg.to_string()),
        fg: Some("#ffffff".to_string()),
    }
}

pub(crate) fn default_toast_info_style() -> RawToastStyle {
    toast_style("#7289da")
}
pub(crate) fn default_toast_success_style() -> RawToastStyle {
    toast_style("#43b581")
}
pub(crate) fn default_toast_warning_style() -> RawToastStyle {
    toast_style("#faa61a")
}
pub(crate) fn default_toast_error_style() -> RawToastStyle {
    toast_style("#f04747")
}

// Modal defaults
pub(crate) const MODAL_BACKDROP: &str = "rgba(0, 0, 0, 0.6)";
pub(crate) const MODAL_BG: &str = "#36393f";
pub(crate) const MODAL_TITLE_FG: &str = "#ffffff";
pub(crate) const MODAL_CLOSE_FG: &str = "#b9bbbe";
pub(crate) const MODAL_RADIUS: f32 = 5.0;
pub(crate) const MODAL_PADDING: f32 = 20.0;
pub(crate) const Z_INDEX: i64 = 9999;

pub(crate) fn default_modal_backdrop() -> String {
    MODAL_BACKDROP.to_string()
}
pub(crate) fn default_modal_bg() -> String {
    MODAL_BG.to_string()
}
pub(crate) fn default_modal_title_fg() -> String {
    MODAL_TITLE_FG.to_string()
}
pub(crate) fn default_modal_close_fg() -> String {
    MODAL_CLOSE_FG.to_string()
}
pub(crate) const fn default_modal_radius() -> f32 {
    MODAL_RADIUS
}
pub(crate) const fn default_modal_padding() -> f32 {
    MODAL_PADDING
}
pub(crate) const fn default_z_index() -> i64 {
    Z_INDEX
}
