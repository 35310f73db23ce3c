use std::path::Path;

use fe_core::config::Config;

/// Effective config as TOML, or just its location when `path` is given.
pub fn render(cfg: &Config, path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => Ok(p.display().to_string()),
        None => Ok(cfg.to_toml()?),
    }
}
