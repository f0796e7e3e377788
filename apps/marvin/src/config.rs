//! Configuration discovery and effective settings resolution.
//!
//! Marvin reads `marvin.toml|.marvin.toml|marvin.yaml|.marvin.yaml|.marvin.yml`
//! from the repository root (or closest ancestor) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `output_dir`: `.marvin/results` (relative to the repository root)
//! - `output`: `tui`
//! - `path`: `docs/`
//! - `vale.min_alert_level`: `suggestion`
//! - `markdownlint.fix`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::store::DEFAULT_RESULTS_DIR;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const TOML_NAMES: [&str; 2] = ["marvin.toml", ".marvin.toml"];
const YAML_NAMES: [&str; 3] = ["marvin.yaml", ".marvin.yaml", ".marvin.yml"];
const OUTPUT_MODES: [&str; 3] = ["tui", "plain", "json"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Vale section under `[vale]`.
pub struct ValeCfg {
    pub config: Option<String>,
    pub min_alert_level: Option<String>,
    pub glob: Option<String>,
    /// Explicit path to the vale executable.
    pub binary: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// markdownlint section under `[markdownlint]`.
pub struct MarkdownlintCfg {
    pub config: Option<String>,
    pub fix: Option<bool>,
    pub binary: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `marvin.toml|yaml`.
pub struct MarvinConfig {
    pub output_dir: Option<String>,
    pub output: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub vale: ValeCfg,
    #[serde(default)]
    pub markdownlint: MarkdownlintCfg,
}

#[derive(Debug, Default, Clone)]
/// Flags collected from the command line; `None` means "not given".
pub struct CliOverrides {
    pub repo_root: Option<String>,
    pub output_dir: Option<String>,
    pub output: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub output: String,
    pub path: String,
    pub vale: ValeCfg,
    pub markdownlint: MarkdownlintCfg,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a marvin config file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if find_config_file(cur).is_some() || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    TOML_NAMES
        .iter()
        .chain(YAML_NAMES.iter())
        .map(|n| dir.join(n))
        .find(|p| p.is_file())
}

/// Load `MarvinConfig` from the first config file present in `root`.
///
/// Returns `Ok(None)` when there is no config file; a file that exists but
/// does not parse is an error.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, MarvinConfig)>> {
    let path = match find_config_file(root) {
        Some(p) => p,
        None => return Ok(None),
    };
    let s = fs::read_to_string(&path)?;
    let is_toml = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let cfg: MarvinConfig = if is_toml {
        toml::from_str(&s).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?
    } else {
        serde_yaml::from_str(&s).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?
    };
    Ok(Some((path, cfg)))
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let (config_path, cfg) = match load_config(&repo_root)? {
        Some((p, c)) => (Some(p), c),
        None => (None, MarvinConfig::default()),
    };

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "tui".to_string())
        .to_ascii_lowercase();
    if !OUTPUT_MODES.contains(&output.as_str()) {
        return Err(Error::Config(format!(
            "unknown output mode '{}' (expected tui|plain|json)",
            output
        )));
    }

    let output_dir = cli
        .output_dir
        .clone()
        .or(cfg.output_dir)
        .unwrap_or_else(|| DEFAULT_RESULTS_DIR.to_string());
    let output_dir = repo_root.join(output_dir);

    let path = cli
        .path
        .clone()
        .or(cfg.path)
        .unwrap_or_else(|| "docs/".to_string());

    Ok(Effective {
        repo_root,
        config_path,
        output_dir,
        output,
        path,
        vale: cfg.vale,
        markdownlint: cfg.markdownlint,
    })
}
