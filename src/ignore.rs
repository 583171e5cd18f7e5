use anyhow::{Context, Result};
use glob::Pattern;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Component, Path};

/// Directory names skipped by default: caches, build output, VCS metadata,
/// virtual environments and the folder holding helper scripts.
pub const DEFAULT_IGNORE: &[&str] = &[
    "__pycache__",
    ".git",
    "venv",
    "env",
    ".venv",
    "node_modules",
    ".pytest_cache",
    ".mypy_cache",
    "build",
    "dist",
    "scripts",
    "*.egg-info",
];

/// Set of directory names excluded from scanning.
///
/// Entries are compared against single path segments. An entry containing
/// glob metacharacters is compiled into a [`Pattern`]; anything else must
/// match the segment exactly.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    names: BTreeSet<String>,
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(entries)?;
        Ok(set)
    }

    pub fn extend<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.insert(entry.as_ref())?;
        }
        Ok(())
    }

    pub fn insert(&mut self, entry: &str) -> Result<()> {
        if entry.contains(['*', '?', '[']) {
            let pattern = Pattern::new(entry)
                .with_context(|| format!("invalid ignore pattern: {}", entry))?;
            if !self.patterns.iter().any(|p| p.as_str() == entry) {
                self.patterns.push(pattern);
            }
        } else {
            self.names.insert(entry.to_string());
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }

    /// True if a single directory name is ignored.
    pub fn matches_name(&self, name: &OsStr) -> bool {
        // Non UTF-8 names can only match through their lossy form.
        let name = name.to_string_lossy();
        self.names.contains(name.as_ref()) || self.patterns.iter().any(|p| p.matches(&name))
    }

    /// True if any normal segment of `rel` is ignored.
    pub fn matches_path(&self, rel: &Path) -> bool {
        rel.components().any(|c| match c {
            Component::Normal(seg) => self.matches_name(seg),
            _ => false,
        })
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_IGNORE).expect("built-in ignore entries are valid")
    }
}
