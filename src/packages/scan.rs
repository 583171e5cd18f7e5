use crate::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Resolve `root` to an absolute canonical directory path.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = root
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", root.display()))?;
    if !resolved.is_dir() {
        bail!("not a directory: {}", resolved.display());
    }
    Ok(resolved)
}

/// Collect every directory under `root` that qualifies as a package.
///
/// Ignored directories are pruned during the walk, so nothing below them is
/// ever seen. Each source file marks its ancestors up to (not including) the
/// root; the climb stops at the first ancestor already marked, so every
/// directory is recorded once.
///
/// Ignore matching covers every segment of the absolute path, so a root that
/// itself lies inside an ignored directory yields nothing.
///
/// `root` must already be resolved. The root itself is never returned.
pub fn qualifying_dirs(root: &Path, cfg: &AppConfig) -> Result<BTreeSet<PathBuf>> {
    let mut qualifying: BTreeSet<PathBuf> = BTreeSet::new();

    if cfg.ignore.matches_path(root) {
        tracing::warn!(
            "root {} lies inside an ignored directory, nothing to do",
            root.display()
        );
        return Ok(qualifying);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let ignored = cfg.ignore.matches_name(e.file_name());
            if ignored {
                tracing::debug!("skipping ignored directory {}", e.path().display());
            }
            !ignored
        });

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let path = entry.path();
        if is_directory(&entry) || !is_source(&entry, &cfg.extension) {
            continue;
        }
        tracing::trace!("source file {}", path.display());

        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == root || !qualifying.insert(d.to_path_buf()) {
                break;
            }
            tracing::trace!("qualifies: {}", d.display());
            dir = d.parent();
        }
    }

    tracing::debug!("{} qualifying directories", qualifying.len());
    Ok(qualifying)
}

// Symlinked directories are not descended into, but they are still not files.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

// Raw bytes, so names that are not valid UTF-8 still match.
fn is_source(entry: &DirEntry, extension: &str) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .ends_with(extension.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::IgnoreSet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, b"").unwrap();
    }

    fn rel_set(root: &Path, dirs: &BTreeSet<PathBuf>) -> Vec<String> {
        dirs.iter()
            .map(|d| {
                d.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn transitive_qualification() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        touch(&root, "a/b/mod.py");
        fs::create_dir_all(root.join("a/empty")).unwrap();

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert_eq!(rel_set(&root, &dirs), vec!["a", "a/b"]);
    }

    #[test]
    fn root_never_qualifies() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        touch(&root, "main.py");

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert!(dirs.is_empty());
    }

    #[test]
    fn ignored_subtree_does_not_count_for_ancestors() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        touch(&root, "a/b/build/gen.py");
        touch(&root, "node_modules/fake/mod.py");

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert!(dirs.is_empty(), "unexpected: {:?}", dirs);
    }

    #[test]
    fn non_source_files_do_not_qualify() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        touch(&root, "docs/readme.md");
        touch(&root, "data/table.pyc");
        fs::create_dir_all(root.join("odd.py")).unwrap();

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert!(dirs.is_empty(), "unexpected: {:?}", dirs);
    }

    #[test]
    fn injected_ignore_set_is_used() {
        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        touch(&root, "keep/mod.py");
        touch(&root, "skip_me/mod.py");
        touch(&root, "node_modules/pkg/mod.py");

        let cfg = AppConfig {
            ignore: IgnoreSet::new(["skip_me"]).unwrap(),
            ..AppConfig::default()
        };
        let dirs = qualifying_dirs(&root, &cfg).unwrap();
        assert_eq!(
            rel_set(&root, &dirs),
            vec!["keep", "node_modules", "node_modules/pkg"]
        );
    }

    #[test]
    fn root_inside_ignored_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("build").join("project");
        touch(&root, "pkg/mod.py");
        let root = resolve_root(&root).unwrap();

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert!(dirs.is_empty(), "unexpected: {:?}", dirs);
    }

    #[test]
    fn root_named_like_ignored_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("scripts");
        touch(&root, "tools/run.py");
        let root = resolve_root(&root).unwrap();

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert!(dirs.is_empty(), "unexpected: {:?}", dirs);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_source_name_qualifies() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let root = resolve_root(dir.path()).unwrap();
        fs::create_dir_all(root.join("pkg")).unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.py");
        if fs::write(root.join("pkg").join(name), b"").is_err() {
            // Some filesystems refuse non UTF-8 names.
            return;
        }

        let dirs = qualifying_dirs(&root, &AppConfig::default()).unwrap();
        assert_eq!(rel_set(&root, &dirs), vec!["pkg"]);
    }

    #[test]
    fn resolve_root_rejects_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = resolve_root(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("failed to resolve"));
    }

    #[test]
    fn resolve_root_rejects_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "file.py");
        let err = resolve_root(&dir.path().join("file.py")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
