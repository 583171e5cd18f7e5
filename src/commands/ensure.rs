use crate::commands::load_config;
use crate::packages::{Report, ensure_markers};
use anyhow::Result;
use std::path::Path;

/// Execute the default command: create every missing marker under `root`.
pub fn ensure(root: &Path, pyproject: Option<&str>, extra_ignore: &[String]) -> Result<Report> {
    let cfg = load_config(root, pyproject, extra_ignore)?;
    let report = ensure_markers(root, &cfg)?;

    let count = report.created_count();
    if count > 0 {
        println!();
        println!("[OK] created {} {} file(s)", count, cfg.marker_name);
    } else {
        println!("[OK] all {} files already present", cfg.marker_name);
    }
    Ok(report)
}
