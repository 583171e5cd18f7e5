use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod marker;
pub mod scan;

pub use marker::create_marker;
pub use scan::{qualifying_dirs, resolve_root};

/// Outcome of one [`ensure_markers`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Resolved root the paths below are relative to.
    pub root: PathBuf,
    /// Markers created by this run, relative to `root`, in creation order.
    pub created: Vec<PathBuf>,
}

impl Report {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Create the marker file in every qualifying directory under `root` that
/// lacks one. Prints `created: <path>` for each new file.
///
/// Directories are visited parent-first. Any filesystem error aborts the run;
/// markers created up to that point stay in place.
pub fn ensure_markers(root: &Path, cfg: &AppConfig) -> Result<Report> {
    let root = resolve_root(root)?;
    tracing::info!(root=%root.display(), "scanning for packages");

    let mut report = Report {
        root: root.clone(),
        created: Vec::new(),
    };
    for dir in qualifying_dirs(&root, cfg)? {
        let marker = dir.join(&cfg.marker_name);
        if create_marker(&marker)? {
            let rel = relative_to(&marker, &root);
            println!("created: {}", rel.display());
            report.created.push(rel);
        }
    }

    tracing::info!("created {}: {}", cfg.marker_name, report.created_count());
    Ok(report)
}

/// List markers that [`ensure_markers`] would create, relative to the
/// resolved root, without touching the filesystem.
pub fn find_missing_markers(root: &Path, cfg: &AppConfig) -> Result<Vec<PathBuf>> {
    let root = resolve_root(root)?;
    let mut missing = Vec::new();
    for dir in qualifying_dirs(&root, cfg)? {
        let marker = dir.join(&cfg.marker_name);
        if !marker_present(&marker)? {
            missing.push(relative_to(&marker, &root));
        }
    }
    tracing::debug!("missing {}: {}", cfg.marker_name, missing.len());
    Ok(missing)
}

// Any entry counts, dangling symlinks included, matching `create_marker`.
fn marker_present(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to inspect {}", path.display())),
    }
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
