use crate::commands::load_config;
use crate::packages::find_missing_markers;
use anyhow::{Result, bail};
use std::path::Path;

/// Execute the check command: report missing markers and fail if any.
pub fn check(root: &Path, pyproject: Option<&str>, extra_ignore: &[String]) -> Result<()> {
    let cfg = load_config(root, pyproject, extra_ignore)?;
    let missing = find_missing_markers(root, &cfg)?;
    if !missing.is_empty() {
        for path in &missing {
            println!("missing: {}", path.display());
        }
        bail!("{} {} file(s) missing", missing.len(), cfg.marker_name);
    }
    println!("[OK] all {} files already present", cfg.marker_name);
    Ok(())
}
