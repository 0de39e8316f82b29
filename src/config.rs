//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/reacttree/reacttree.toml`
//! 3. Project config: `<project_dir>/.reacttree.toml`
//! 4. Environment variables: `REACTTREE_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{MatchMode, DEFAULT_EXTENSIONS};
use crate::util::path::expand_env_vars;

/// Unified configuration for reacttree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory import paths are joined onto (default: entry file's directory)
    pub source_root: Option<PathBuf>,
    /// Extensions an import line must mention to be considered
    pub extensions: Vec<String>,
    /// Tag names skipped in addition to the HTML elements
    pub ignore_elements: Vec<String>,
    /// How tags are looked up in import lines
    pub match_mode: MatchMode,
    /// Depth at which nodes stop being scanned (root is 0)
    pub max_depth: Option<usize>,
    /// Reuse subtrees of files imported from several places
    pub memoize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_root: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore_elements: vec![],
            match_mode: MatchMode::Substring,
            max_depth: None,
            memoize: false,
        }
    }
}

/// Raw settings for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawSettings {
    pub source_root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub ignore_elements: Option<Vec<String>>,
    pub match_mode: Option<MatchMode>,
    pub max_depth: Option<usize>,
    pub memoize: Option<bool>,
}

/// Get the XDG config directory for reacttree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "reacttree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("reacttree.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".reacttree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Merge arrays with union semantics and negation support.
///
/// - Items from overlay are added to base
/// - Items prefixed with `!` remove the corresponding item from the result
/// - Duplicates are de-duplicated
///
/// # Examples
/// ```ignore
/// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
/// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
/// ```
pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
    let mut result: HashSet<String> = base.iter().cloned().collect();

    for pattern in overlay {
        if let Some(negated) = pattern.strip_prefix('!') {
            result.remove(negated);
        } else {
            result.insert(pattern.clone());
        }
    }

    // Convert to sorted Vec for deterministic output
    let mut vec: Vec<String> = result.into_iter().collect();
    vec.sort();
    vec
}

impl Settings {
    /// Directory import paths are joined onto when building from `entry`.
    pub fn source_root_for(&self, entry: &Path) -> PathBuf {
        match (&self.source_root, entry.parent()) {
            (Some(root), _) => root.clone(),
            (None, Some(parent)) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(root) = &self.source_root {
            let expanded = expand_env_vars(root.to_string_lossy().as_ref());
            self.source_root = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base) with union semantics for arrays.
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Arrays: union merge with negation support
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            source_root: overlay.source_root.clone().or_else(|| self.source_root.clone()),
            extensions: overlay
                .extensions
                .as_ref()
                .map(|o| merge_array(&self.extensions, o))
                .unwrap_or_else(|| self.extensions.clone()),
            ignore_elements: overlay
                .ignore_elements
                .as_ref()
                .map(|o| merge_array(&self.ignore_elements, o))
                .unwrap_or_else(|| self.ignore_elements.clone()),
            match_mode: overlay.match_mode.unwrap_or(self.match_mode),
            max_depth: overlay.max_depth.or(self.max_depth),
            memoize: overlay.memoize.unwrap_or(self.memoize),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    ///
    /// Unlike `merge_with()` which uses union semantics, this method replaces
    /// arrays entirely if the global config specifies them.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            source_root: global.source_root.clone().or_else(|| self.source_root.clone()),
            extensions: global
                .extensions
                .clone()
                .unwrap_or_else(|| self.extensions.clone()),
            ignore_elements: global
                .ignore_elements
                .clone()
                .unwrap_or_else(|| self.ignore_elements.clone()),
            match_mode: global.match_mode.unwrap_or(self.match_mode),
            max_depth: global.max_depth.or(self.max_depth),
            memoize: global.memoize.unwrap_or(self.memoize),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory holding `.reacttree.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE (global defines the real baseline)
    /// - Global → Project: UNION with negation support
    /// - Any → Env vars: REPLACE (explicit user override)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = match global_config_path() {
            Some(path) if path.exists() => Some(path),
            _ => None,
        };
        Self::load_from(global.as_deref(), project_dir)
    }

    /// Same as [`Settings::load`] with an explicit global config file.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config REPLACES defaults
        if let Some(path) = global_path {
            let raw = load_raw_settings(path)?;
            current = current.apply_global(&raw);
        }

        // 3. Project config UNIONS with global
        if let Some(dir) = project_dir {
            let local_path = project_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables replace
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply REACTTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("REACTTREE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("extensions")
                .with_list_parse_key("ignore_elements")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "source_root")? {
            settings.source_root = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value(&config, "extensions")? {
            settings.extensions = val;
        }
        if let Some(val) = env_value(&config, "ignore_elements")? {
            settings.ignore_elements = val;
        }
        if let Some(val) = env_value(&config, "match_mode")? {
            settings.match_mode = val;
        }
        if let Some(val) = env_value(&config, "max_depth")? {
            settings.max_depth = Some(val);
        }
        if let Some(val) = env_value(&config, "memoize")? {
            settings.memoize = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# reacttree configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/reacttree/reacttree.toml  (defines your baseline)
#   Project: <project_dir>/.reacttree.toml       (project-specific additions)
#   Env:     REACTTREE_* environment variables   (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Project config UNIONS with global.
#   Use "!item" in project config to REMOVE an inherited item:
#     extensions = [".vue", "!.ts"]

# Directory import paths are joined onto (default: directory of the entry file)
# source_root = "./src"

# An import line is only considered when it mentions one of these
# extensions = [".tsx", ".jsx", ".ts", ".js"]

# Tags that never become components, in addition to the HTML elements
# ignore_elements = ["Fragment", "svg"]

# "substring": tag may appear anywhere in the import line
# "word":      tag must appear as a whole identifier
# match_mode = "substring"

# Nodes at this depth are listed but not scanned (root is 0)
# max_depth = 10

# Reuse the subtree of a file imported from several places
# memoize = false
"#
        .to_string()
    }
}

/// Value of an env override, `None` when the variable is not set.
///
/// A set but unparsable value is a config error, like in a config file.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override {key}: {e}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
