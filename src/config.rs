use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ReleaseImpactError, Result};

const LOCAL_CONFIG_FILE: &str = "./releaseimpact.toml";
const USER_CONFIG_FILE: &str = ".releaseimpact.toml";

/// Represents the complete configuration for release-impact.
///
/// Contains the section catalog used to group release notes and the two notes styles.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub sections: SectionsConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

/// One catalog entry: a commit type and the section title it renders under.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionEntry {
    #[serde(rename = "type")]
    pub r#type: String,
    pub title: String,
}

impl SectionEntry {
    fn new(r#type: &str, title: &str) -> Self {
        SectionEntry {
            r#type: r#type.to_string(),
            title: title.to_string(),
        }
    }
}

/// Returns the default section catalog, in rendering order.
fn default_catalog() -> Vec<SectionEntry> {
    vec![
        SectionEntry::new("feat", "✨ Features"),
        SectionEntry::new("fix", "🐛 Fixes"),
        SectionEntry::new("perf", "⚡ Performance"),
        SectionEntry::new("test", "✅ Tests"),
        SectionEntry::new("build", "📦 Build"),
        SectionEntry::new("ci", "🤖 CI / CD"),
        SectionEntry::new("chore", "🧹 Chores"),
        SectionEntry::new("style", "💄 Style"),
        SectionEntry::new("refactor", "♻️ Refactors"),
        SectionEntry::new("docs", "📝 Docs"),
        SectionEntry::new("post", "✉️ Posts"),
    ]
}

fn default_other_title() -> String {
    "🧩 Other".to_string()
}

/// Section catalog configuration.
///
/// Sections render in the order listed; commits with a missing or unknown type
/// land in the `other` section, which always renders last.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SectionsConfig {
    #[serde(default = "default_other_title")]
    pub other: String,

    #[serde(default = "default_catalog")]
    pub catalog: Vec<SectionEntry>,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        SectionsConfig {
            other: default_other_title(),
            catalog: default_catalog(),
        }
    }
}

/// Presentation settings for one notes variant.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesStyleConfig {
    /// Top-level heading; `{version}` is replaced with the version label
    pub heading: String,

    #[serde(default)]
    pub include_hash: bool,

    #[serde(default = "default_true")]
    pub include_scope_prefix: bool,
}

fn default_true() -> bool {
    true
}

fn default_changelog_style() -> NotesStyleConfig {
    NotesStyleConfig {
        heading: "## 📦 Release {version}".to_string(),
        include_hash: true,
        include_scope_prefix: true,
    }
}

fn default_github_style() -> NotesStyleConfig {
    NotesStyleConfig {
        heading: "## {version}".to_string(),
        include_hash: false,
        include_scope_prefix: true,
    }
}

/// The rich (changelog) and clean (release page) notes variants.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default = "default_changelog_style")]
    pub changelog: NotesStyleConfig,

    #[serde(default = "default_github_style")]
    pub github: NotesStyleConfig,
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            changelog: default_changelog_style(),
            github: default_github_style(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releaseimpact.toml` in current directory
/// 3. `.releaseimpact.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        Path::new(LOCAL_CONFIG_FILE).to_path_buf()
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            debug!("no releaseimpact.toml found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading tool configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseImpactError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
}

/// Parse a configuration document
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseImpactError::config(e.to_string()))
}
