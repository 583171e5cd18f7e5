pub mod check;
pub mod ensure;

pub use check::check;
pub use ensure::ensure;

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Build the effective config for a run rooted at `root`.
///
/// An explicit pyproject path must exist; otherwise `<root>/pyproject.toml`
/// is used when present. `extra_ignore` is appended in both cases.
pub(crate) fn load_config(
    root: &Path,
    pyproject: Option<&str>,
    extra_ignore: &[String],
) -> Result<AppConfig> {
    let mut cfg = match pyproject {
        Some(p) => AppConfig::load(Path::new(p)),
        None => AppConfig::discover(root),
    }
    .context("failed to load config")?;
    cfg.ignore
        .extend(extra_ignore)
        .context("invalid --ignore value")?;
    Ok(cfg)
}
