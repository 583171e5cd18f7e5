use crate::ignore::IgnoreSet;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const MARKER_NAME: &str = "__init__.py";
pub const SOURCE_EXTENSION: &str = ".py";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ignore: IgnoreSet,
    pub marker_name: String,
    pub extension: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::with_defaults(),
            marker_name: MARKER_NAME.to_string(),
            extension: SOURCE_EXTENSION.to_string(),
        }
    }
}

// --- Raw TOML structures ---
#[derive(Deserialize)]
struct PyProject {
    tool: Option<ToolSection>,
}

#[derive(Deserialize)]
struct ToolSection {
    ensure_init: Option<EnsureInitToml>,
}

#[derive(Deserialize)]
struct EnsureInitToml {
    ignore: Option<Vec<String>>,
    extend_ignore: Option<Vec<String>>,
}

impl AppConfig {
    /// Load `[tool.ensure_init]` from the given pyproject.toml.
    /// A file without that table yields the defaults.
    pub fn load(pyproject_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(pyproject_path)
            .with_context(|| format!("failed to read {}", pyproject_path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse {}", pyproject_path.display()))
    }

    /// Use `<root>/pyproject.toml` when it exists, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let candidate: PathBuf = root.join("pyproject.toml");
        if candidate.is_file() {
            tracing::debug!("using config from {}", candidate.display());
            Self::load(&candidate)
        } else {
            tracing::debug!("no pyproject.toml under {}, using defaults", root.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let root: PyProject = toml::from_str(content).context("invalid TOML")?;
        let Some(section) = root.tool.and_then(|t| t.ensure_init) else {
            return Ok(Self::default());
        };

        let mut cfg = Self::default();
        if let Some(ignore) = section.ignore {
            cfg.ignore = IgnoreSet::new(&ignore).context("invalid `ignore` entry")?;
        }
        if let Some(extra) = section.extend_ignore {
            cfg.ignore
                .extend(&extra)
                .context("invalid `extend_ignore` entry")?;
        }
        Ok(cfg)
    }
}
