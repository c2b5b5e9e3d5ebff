use regex::Regex;
use semver::Version;

use crate::error::{ReleaseImpactError, Result};

const VERSION_PLACEHOLDER: &str = "${version}";

/// Tag naming pattern (e.g., "v${version}", "release-${version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub pattern: String,
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v${version}")
    }
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v${version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &str) -> String {
        self.pattern.replace(VERSION_PLACEHOLDER, version)
    }

    fn regex(&self) -> Result<Regex> {
        if !self.pattern.contains(VERSION_PLACEHOLDER) {
            return Err(ReleaseImpactError::tag(format!(
                "Pattern '{}' must contain the ${{version}} placeholder",
                self.pattern
            )));
        }

        let escaped = regex::escape(&self.pattern);
        let regex_pattern = escaped.replace(&regex::escape(VERSION_PLACEHOLDER), r"(.+)");

        Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| ReleaseImpactError::tag(format!("Invalid pattern: {}", e)))
    }

    /// Extract the semantic version embedded in a tag, if the tag follows this pattern
    pub fn version_of(&self, tag: &str) -> Result<Option<Version>> {
        let re = self.regex()?;
        Ok(re
            .captures(tag)
            .and_then(|captures| captures.get(1))
            .and_then(|m| Version::parse(m.as_str()).ok()))
    }

    /// Highest-versioned tag following this pattern
    pub fn latest<'a, I>(&self, tags: I) -> Result<Option<(String, Version)>>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut latest: Option<(String, Version)> = None;
        for tag in tags {
            if let Some(version) = self.version_of(tag)? {
                if latest.as_ref().map_or(true, |(_, best)| version > *best) {
                    latest = Some((tag.clone(), version));
                }
            }
        }
        Ok(latest)
    }
}
