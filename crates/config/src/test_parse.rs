#[cfg(test)]
mod tests {
    use std::{fs, path::Path, time::Duration};

    use crate::*;

    #[test]
    fn empty_source_yields_defaults() {
        let cfg = load_from_str("", None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.toast.duration(), Duration::from_millis(3000));
        assert_eq!(cfg.toast.grace(), Duration::from_millis(300));
        assert_eq!(cfg.class("toast"), "veneer-toast");
    }

    #[test]
    fn partial_toast_overrides_keep_other_defaults() {
        let src = r##"
            prefix = "acme"

            [toast]
            duration_ms = 5000

            [toast.info]
            bg = "#333333"
        "##;
        let cfg = load_from_str(src, None).unwrap();
        assert_eq!(cfg.toast.duration_ms, 5000);
        assert_eq!(cfg.toast.fade_in_ms, 10);
        let theme = cfg.toast.theme();
        assert_eq!(theme.info.bg, (0x33, 0x33, 0x33));
        // fg was not overridden and comes from the default style
        assert_eq!(theme.info.fg, (0xff, 0xff, 0xff));
        assert_eq!(theme.error.bg_css(), "#f04747");
        assert_eq!(cfg.class("modal"), "acme-modal");
    }

    #[test]
    fn named_colors_resolve_to_hex() {
        let cfg = load_from_str("[modal]\ntitle_fg = \"white\"\n", None).unwrap();
        assert_eq!(cfg.modal.title_css(), "#ffffff");
        // backdrop is free-form CSS
        assert_eq!(cfg.modal.backdrop, "rgba(0, 0, 0, 0.6)");
    }

    #[test]
    fn toast_kind_parsing_falls_back_to_info() {
        assert_eq!(ToastKind::parse("success"), ToastKind::Success);
        assert_eq!(ToastKind::parse("WARNING"), ToastKind::Warning);
        assert_eq!(ToastKind::parse("bogus"), ToastKind::Info);
        let k: ToastKind = serde_json::from_str("\"sparkly\"").unwrap();
        assert_eq!(k, ToastKind::Info);
        assert_eq!(serde_json::to_string(&ToastKind::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn unknown_field_reports_location() {
        let src = "prefix = \"x\"\n\n[toast]\ndurration_ms = 1\n";
        match load_from_str(src, None) {
            Err(Error::Parse { line, excerpt, .. }) => {
                assert!(line == 3 || line == 4, "line {line}");
                assert!(excerpt.contains("durration_ms"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_color_is_a_validation_error() {
        let err = load_from_str("[toast.error]\nbg = \"not-a-color\"\n", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.pretty().contains("toast.error.bg"));
    }

    #[test]
    fn blank_prefix_rejected() {
        assert!(load_from_str("prefix = \"\"\n", None).is_err());
    }

    #[test]
    fn load_from_path_reads_toml_and_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("config.toml");
        fs::write(&good, "[toast]\nbacklog = 3\n").unwrap();
        assert_eq!(load_from_path(&good).unwrap().toast.backlog, 3);

        let bad = dir.path().join("config.json");
        fs::write(&bad, "{}").unwrap();
        let err = load_from_path(&bad).unwrap_err();
        assert_eq!(err.path(), Some(bad.as_path()));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "prefix = \n").unwrap();
        let err = load_from_path(&broken).unwrap_err();
        assert_eq!(err.path(), Some(broken.as_path()));
        assert!(err.pretty().starts_with("Config parse error at"));
    }

    #[test]
    fn explicit_path_wins_resolution() {
        let p = Path::new("/tmp/elsewhere.toml");
        assert_eq!(resolve_config_path(Some(p)), Some(p.to_path_buf()));
    }
}
