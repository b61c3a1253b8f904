//! Parse and load user configuration.

use std::{ffi::OsStr, fs, path::Path};

use tracing::debug;

use crate::{
    Config, Error,
    error::{excerpt_at, line_col},
};

/// Parse a TOML configuration from a string and validate it.
///
/// `path` is only used to annotate errors.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Config, Error> {
    let parsed: Result<Config, toml::de::Error> = toml::from_str(source);
    let cfg = match parsed {
        Ok(cfg) => cfg,
        Err(e) => {
            let (line, col) = e
                .span()
                .map_or((1, 1), |span| line_col(source, span.start));
            return Err(Error::Parse {
                path: path.map(Path::to_path_buf),
                line,
                col,
                message: e.message().to_string(),
                excerpt: excerpt_at(source, line, col),
            });
        }
    };
    cfg.validate().map_err(|e| match path {
        Some(p) => e.with_path(p),
        None => e,
    })?;
    Ok(cfg)
}

/// Load a fully resolved `Config` from a TOML file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    if path.extension() != Some(OsStr::new("toml")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .toml file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "config_load");
    load_from_str(&source, Some(path))
}

/// Load the configuration chosen by [`resolve_config_path`](crate::resolve_config_path),
/// or built-in defaults when there is none.
pub fn load(explicit: Option<&Path>) -> Result<Config, Error> {
    match crate::resolve_config_path(explicit) {
        Some(p) => load_from_path(&p),
        None => {
            debug!("config_defaults");
            Ok(Config::default())
        }
    }
}
