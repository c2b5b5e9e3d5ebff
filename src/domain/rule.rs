use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::domain::{CommitRecord, Impact};

/// Release declared by a rule: a bump level or an explicit `false` (no release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseValue {
    NoRelease,
    Patch,
    Minor,
    Major,
}

impl ReleaseValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(false) => Some(ReleaseValue::NoRelease),
            Value::String(s) => match s.as_str() {
                "major" => Some(ReleaseValue::Major),
                "minor" => Some(ReleaseValue::Minor),
                "patch" => Some(ReleaseValue::Patch),
                _ => None,
            },
            _ => None,
        }
    }

    /// Impact this release value produces when the rule fires
    pub fn impact(&self) -> Impact {
        match self {
            ReleaseValue::NoRelease => Impact::None,
            ReleaseValue::Patch => Impact::Patch,
            ReleaseValue::Minor => Impact::Minor,
            ReleaseValue::Major => Impact::Major,
        }
    }
}

impl fmt::Display for ReleaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseValue::NoRelease => f.write_str("false"),
            other => f.write_str(other.impact().as_str()),
        }
    }
}

/// A single matcher -> release rule.
///
/// Absent matchers are wildcards, so a rule without matchers matches every commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRule {
    /// Declared position in the configured `releaseRules` list
    pub position: usize,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub breaking: Option<bool>,
    pub revert: Option<bool>,
    pub release: ReleaseValue,
}

impl ReleaseRule {
    /// Build a rule without matchers; add them with the `with_*` helpers
    pub fn new(position: usize, release: ReleaseValue) -> Self {
        ReleaseRule {
            position,
            r#type: None,
            scope: None,
            breaking: None,
            revert: None,
            release,
        }
    }

    pub fn with_type(mut self, r#type: impl Into<String>) -> Self {
        self.r#type = Some(r#type.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = Some(breaking);
        self
    }

    pub fn with_revert(mut self, revert: bool) -> Self {
        self.revert = Some(revert);
        self
    }

    /// Read a rule from its JSON form; returns `None` for entries without a usable `release`
    pub fn from_json(position: usize, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let release = ReleaseValue::from_json(object.get("release")?)?;

        Some(ReleaseRule {
            position,
            r#type: object.get("type").and_then(string_matcher),
            scope: object.get("scope").and_then(string_matcher),
            breaking: object.get("breaking").and_then(bool_matcher),
            revert: object.get("revert").and_then(bool_matcher),
            release,
        })
    }

    /// Every matcher present on the rule must equal the corresponding commit field
    pub fn matches(&self, commit: &CommitRecord) -> bool {
        if let Some(ref t) = self.r#type {
            if commit.r#type.as_ref() != Some(t) {
                return false;
            }
        }
        if let Some(ref scope) = self.scope {
            if commit.scope.as_ref() != Some(scope) {
                return false;
            }
        }
        if let Some(breaking) = self.breaking {
            if breaking != commit.breaking {
                return false;
            }
        }
        if let Some(revert) = self.revert {
            if revert != commit.revert {
                return false;
            }
        }
        true
    }

    /// Configuration path of this rule, e.g. `releaseRules[2]`
    pub fn label(&self) -> String {
        format!("releaseRules[{}]", self.position)
    }

    /// Human-readable summary: `releaseRules[i] (type=feat, breaking=true) -> minor`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(t) = self.r#type.as_deref().filter(|t| !t.is_empty()) {
            parts.push(format!("type={}", single_line(t)));
        }
        if let Some(scope) = self.scope.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("scope={}", single_line(scope)));
        }
        if let Some(breaking) = self.breaking {
            parts.push(format!("breaking={}", breaking));
        }
        if let Some(revert) = self.revert {
            parts.push(format!("revert={}", revert));
        }
        let conditions = if parts.is_empty() {
            "any".to_string()
        } else {
            parts.join(", ")
        };
        format!("{} ({}) -> {}", self.label(), conditions, self.release)
    }
}

/// Escape control characters so a description always fits on one line
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_control() {
                c.escape_debug().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

fn string_matcher(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn bool_matcher(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(!s.is_empty()),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

/// Ordered list of release rules; earlier rules take precedence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCascade {
    rules: Vec<ReleaseRule>,
    declared: Vec<Value>,
}

impl RuleCascade {
    pub fn new(rules: Vec<ReleaseRule>) -> Self {
        RuleCascade {
            rules,
            declared: Vec::new(),
        }
    }

    /// Build a cascade from the configured `releaseRules` entries.
    ///
    /// Unusable entries are skipped; the remaining rules keep their declared index.
    pub fn from_json(entries: &[Value]) -> Self {
        let rules = entries
            .iter()
            .enumerate()
            .filter_map(|(position, value)| {
                let rule = ReleaseRule::from_json(position, value);
                if rule.is_none() {
                    debug!(position, "skipping release rule without a usable release value");
                }
                rule
            })
            .collect();

        RuleCascade {
            rules,
            declared: entries.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[ReleaseRule] {
        &self.rules
    }

    /// The entries as declared in configuration, for handing to external classifiers
    pub fn declared(&self) -> &[Value] {
        &self.declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_from_json() {
        let rule = ReleaseRule::from_json(3, &json!({"type": "feat", "release": "minor"})).unwrap();
        assert_eq!(rule.position, 3);
        assert_eq!(rule.r#type.as_deref(), Some("feat"));
        assert_eq!(rule.release, ReleaseValue::Minor);

        let rule = ReleaseRule::from_json(0, &json!({"type": "docs", "release": false})).unwrap();
        assert_eq!(rule.release, ReleaseValue::NoRelease);
    }

    #[test]
    fn test_rule_without_release_is_rejected() {
        assert!(ReleaseRule::from_json(0, &json!({"type": "feat"})).is_none());
        assert!(ReleaseRule::from_json(0, &json!({"release": "prerelease"})).is_none());
        assert!(ReleaseRule::from_json(0, &json!("feat")).is_none());
    }

    #[test]
    fn test_cascade_keeps_declared_positions() {
        let cascade = RuleCascade::from_json(&[
            json!({"type": "feat"}),
            json!(null),
            json!({"breaking": true, "release": "major"}),
        ]);
        assert_eq!(cascade.rules().len(), 1);
        assert_eq!(cascade.rules()[0].label(), "releaseRules[2]");
        assert_eq!(cascade.declared().len(), 3);
    }

    #[test]
    fn test_matching() {
        let commit = CommitRecord::parse("fix(api)!: tighten validation");

        assert!(ReleaseRule::new(0, ReleaseValue::Patch)
            .with_type("fix")
            .matches(&commit));
        assert!(ReleaseRule::new(0, ReleaseValue::Major)
            .with_breaking(true)
            .matches(&commit));
        assert!(!ReleaseRule::new(0, ReleaseValue::Patch)
            .with_type("fix")
            .with_scope("ui")
            .matches(&commit));
        assert!(!ReleaseRule::new(0, ReleaseValue::Patch)
            .with_revert(true)
            .matches(&commit));
        assert!(ReleaseRule::new(0, ReleaseValue::Patch).matches(&commit));
    }

    #[test]
    fn test_scope_matcher_never_matches_scopeless_commit() {
        let commit = CommitRecord::parse("fix: no scope");
        assert!(!ReleaseRule::new(0, ReleaseValue::Patch)
            .with_scope("api")
            .matches(&commit));
    }

    #[test]
    fn test_describe() {
        let rule = ReleaseRule::new(1, ReleaseValue::Major).with_breaking(true);
        assert_eq!(rule.describe(), "releaseRules[1] (breaking=true) -> major");

        let rule = ReleaseRule::new(4, ReleaseValue::NoRelease)
            .with_type("docs")
            .with_scope("readme");
        assert_eq!(
            rule.describe(),
            "releaseRules[4] (type=docs, scope=readme) -> false"
        );

        let rule = ReleaseRule::new(0, ReleaseValue::Patch);
        assert_eq!(rule.describe(), "releaseRules[0] (any) -> patch");
    }

    #[test]
    fn test_describe_stays_on_one_line() {
        let rule = ReleaseRule::from_json(
            4,
            &json!({"type": "fe\nat", "scope": "a\r\tb", "release": "minor"}),
        )
        .unwrap();
        let described = rule.describe();
        assert!(!described.contains('\n'));
        assert!(!described.contains('\r'));
        assert_eq!(
            described,
            "releaseRules[4] (type=fe\\nat, scope=a\\r\\tb) -> minor"
        );
    }
}
