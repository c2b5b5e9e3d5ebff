//! Release configuration discovery
//!
//! Locates the project's release configuration (the `release` object of
//! `package.json` or a standalone `.releaserc*` file) and extracts the
//! commit-analyzer options from its plugin list. Every failure along the way
//! degrades to an empty configuration; nothing here returns an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{RuleCascade, TagPattern};

/// Plugin whose options carry the release rules
pub const COMMIT_ANALYZER_PLUGIN: &str = "@semantic-release/commit-analyzer";

const MANIFEST_FILE: &str = "package.json";
const MANIFEST_KEY: &str = "release";

/// Standalone configuration files checked in every searched directory, in order
const SEARCH_PLACES: &[&str] = &[
    ".releaserc",
    ".releaserc.json",
    ".releaserc.yaml",
    ".releaserc.yml",
    ".config/releaserc",
    ".config/releaserc.json",
    ".config/releaserc.yaml",
    ".config/releaserc.yml",
];

/// Configuration files that need a JavaScript runtime to evaluate
const SCRIPT_PLACES: &[&str] = &[
    ".releaserc.js",
    ".releaserc.cjs",
    ".releaserc.mjs",
    "release.config.js",
    "release.config.cjs",
    "release.config.mjs",
];

/// A resolved release configuration object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    settings: Map<String, Value>,
    source: Option<PathBuf>,
}

/// A plugin declaration as written: either a bare name or a `[name, options]` pair
#[derive(Debug, Clone, PartialEq)]
enum PluginEntry {
    Bare(String),
    Configured { name: String, options: Option<Value> },
}

impl PluginEntry {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(PluginEntry::Bare(name.clone())),
            Value::Array(items) => {
                let name = items.first()?.as_str()?.to_string();
                Some(PluginEntry::Configured {
                    name,
                    options: items.get(1).cloned(),
                })
            }
            _ => None,
        }
    }

    fn into_spec(self) -> PluginSpec {
        match self {
            PluginEntry::Bare(name) => PluginSpec {
                name,
                options: empty_object(),
            },
            PluginEntry::Configured { name, options } => PluginSpec {
                name,
                options: options
                    .filter(|opts| !opts.is_null())
                    .unwrap_or_else(empty_object),
            },
        }
    }
}

/// Uniform plugin record handed to the rest of the crate
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSpec {
    pub name: String,
    pub options: Value,
}

/// State of the `releaseRules` option of the commit analyzer
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseRulesSetting {
    /// No `releaseRules` key; the analyzer's default rules apply
    Absent,
    /// `releaseRules` is present but not a list (e.g. a module path)
    Malformed,
    Declared(RuleCascade),
}

impl ReleaseRulesSetting {
    /// Read the setting from commit-analyzer options
    pub fn from_options(options: &Value) -> Self {
        match options.get("releaseRules") {
            None | Some(Value::Null) => ReleaseRulesSetting::Absent,
            Some(Value::Array(entries)) => {
                ReleaseRulesSetting::Declared(RuleCascade::from_json(entries))
            }
            Some(_) => ReleaseRulesSetting::Malformed,
        }
    }

    /// The cascade to evaluate; empty unless rules were declared as a list
    pub fn cascade(&self) -> RuleCascade {
        match self {
            ReleaseRulesSetting::Declared(cascade) => cascade.clone(),
            _ => RuleCascade::default(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl ReleaseConfig {
    /// Wrap a configuration value; anything other than an object yields an empty configuration
    pub fn from_value(value: Value, source: Option<PathBuf>) -> Self {
        match value {
            Value::Object(settings) => ReleaseConfig { settings, source },
            _ => ReleaseConfig::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// File the configuration was read from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Plugin declarations, collapsed into uniform `{name, options}` records.
    ///
    /// Entries that are neither a name nor a `[name, ...]` list are dropped.
    pub fn plugins(&self) -> Vec<PluginSpec> {
        match self.settings.get("plugins") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(PluginEntry::from_json)
                .map(PluginEntry::into_spec)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Options registered for the commit analyzer, or `{}` when it is absent or bare
    pub fn analyzer_options(&self) -> Value {
        self.plugins()
            .into_iter()
            .find(|plugin| plugin.name == COMMIT_ANALYZER_PLUGIN)
            .map(|plugin| plugin.options)
            .unwrap_or_else(empty_object)
    }

    /// Release rules declared for the commit analyzer
    pub fn release_rules(&self) -> ReleaseRulesSetting {
        ReleaseRulesSetting::from_options(&self.analyzer_options())
    }

    /// Tag naming pattern (`tagFormat`), defaulting to `v${version}`
    pub fn tag_pattern(&self) -> TagPattern {
        self.settings
            .get("tagFormat")
            .and_then(Value::as_str)
            .map(TagPattern::new)
            .unwrap_or_default()
    }
}

/// Resolve the release configuration for a repository.
///
/// Resolution order:
/// 1. `explicit` file, when given
/// 2. the `release` object of `<repo_root>/package.json`
/// 3. a search from `repo_root` upward for a standalone configuration file
/// 4. an empty configuration
pub fn resolve(repo_root: &Path, explicit: Option<&Path>) -> ReleaseConfig {
    if let Some(path) = explicit {
        return match load_file(path) {
            Some(value) => ReleaseConfig::from_value(value, Some(path.to_path_buf())),
            None => {
                warn!(path = %path.display(), "release configuration unreadable, using empty configuration");
                ReleaseConfig::default()
            }
        };
    }

    if let Some(value) = manifest_release(repo_root) {
        return ReleaseConfig::from_value(value, Some(repo_root.join(MANIFEST_FILE)));
    }

    match search(repo_root) {
        Some((path, value)) => ReleaseConfig::from_value(value, Some(path)),
        None => {
            debug!(root = %repo_root.display(), "no release configuration found");
            ReleaseConfig::default()
        }
    }
}

fn manifest_release(dir: &Path) -> Option<Value> {
    let manifest = read_json(&dir.join(MANIFEST_FILE))?;
    manifest
        .get(MANIFEST_KEY)
        .filter(|release| is_truthy(release))
        .cloned()
}

fn search(start: &Path) -> Option<(PathBuf, Value)> {
    search_until(start, dirs::home_dir())
}

/// Upward search from `start`; stops at `home` when `start` lies inside it
fn search_until(start: &Path, home: Option<PathBuf>) -> Option<(PathBuf, Value)> {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let stop = home
        .map(|home| fs::canonicalize(&home).unwrap_or(home))
        .filter(|home| start.starts_with(home));

    for dir in start.ancestors() {
        if let Some(value) = manifest_release(dir) {
            return Some((dir.join(MANIFEST_FILE), value));
        }

        for place in SEARCH_PLACES {
            let path = dir.join(place);
            if !path.is_file() {
                continue;
            }
            match load_file(&path) {
                Some(value) if is_truthy(&value) => return Some((path, value)),
                _ => debug!(path = %path.display(), "skipping empty or unreadable release configuration"),
            }
        }

        for place in SCRIPT_PLACES {
            let path = dir.join(place);
            if path.is_file() {
                warn!(path = %path.display(), "JavaScript release configuration cannot be evaluated, skipping");
            }
        }

        if stop.as_deref() == Some(dir) {
            break;
        }
    }

    None
}

/// Read a configuration file as JSON or YAML depending on its extension.
///
/// Extensionless files are tried as JSON first, then YAML.
fn load_file(path: &Path) -> Option<Value> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => read_json(path),
        Some("yaml") | Some("yml") => read_yaml(path),
        _ => read_json(path).or_else(|| read_yaml(path)),
    }
}

fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "invalid JSON");
            None
        }
    }
}

fn read_yaml(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    match serde_yaml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "invalid YAML");
            None
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
