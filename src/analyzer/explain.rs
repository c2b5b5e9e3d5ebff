use std::fmt;

use crate::domain::{CommitRecord, Impact, ReleaseRule, RuleCascade};
use crate::release_config::ReleaseRulesSetting;

/// Which rule (or default path) an impact is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleLabel {
    /// The analyzer's built-in rules
    Default,
    /// A configured rule, by declared position
    Rule(usize),
    /// Rules are configured but none matched the commit
    Unmatched,
    /// Rules are configured in a shape that cannot be inspected
    Unknown,
}

impl fmt::Display for RuleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleLabel::Default => f.write_str("default"),
            RuleLabel::Rule(position) => write!(f, "releaseRules[{}]", position),
            RuleLabel::Unmatched => f.write_str("releaseRules"),
            RuleLabel::Unknown => f.write_str("unknown"),
        }
    }
}

/// Impact plus the provenance explaining it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactResult {
    pub impact: Impact,
    pub rule_label: RuleLabel,
    pub rule_detail: String,
}

/// Explains an already-computed impact in terms of the configured release rules.
///
/// The explainer never recomputes the impact; it looks for the rule most
/// consistent with it. Explanation is pure: the same inputs always give the
/// same result.
pub struct RuleExplainer {
    setting: ReleaseRulesSetting,
}

impl RuleExplainer {
    /// Create a new explainer for the configured release rules
    pub fn new(setting: ReleaseRulesSetting) -> Self {
        RuleExplainer { setting }
    }

    /// Explain `impact` for `commit`
    pub fn explain(&self, commit: &CommitRecord, impact: Impact) -> ImpactResult {
        match &self.setting {
            ReleaseRulesSetting::Malformed => ImpactResult {
                impact,
                rule_label: RuleLabel::Unknown,
                rule_detail: "releaseRules is not a list; explanation unavailable".to_string(),
            },
            ReleaseRulesSetting::Absent => explain_cascade(commit, impact, &RuleCascade::default()),
            ReleaseRulesSetting::Declared(cascade) => explain_cascade(commit, impact, cascade),
        }
    }
}

/// Explain `impact` for `commit` against an explicit cascade.
///
/// A cascade with nothing declared falls back to the default-rule explanation.
/// Declared entries that were all unusable count as configured rules that
/// match nothing. Otherwise the
/// first matching rule whose release equals `impact` wins; failing that, the
/// first matching rule, even when its release disagrees with `impact`.
pub fn explain_cascade(commit: &CommitRecord, impact: Impact, cascade: &RuleCascade) -> ImpactResult {
    if cascade.is_empty() && cascade.declared().is_empty() {
        return ImpactResult {
            impact,
            rule_label: RuleLabel::Default,
            rule_detail: explain_default(commit, impact),
        };
    }

    match select_rule(commit, impact, cascade) {
        Some(rule) => ImpactResult {
            impact,
            rule_label: RuleLabel::Rule(rule.position),
            rule_detail: rule.describe(),
        },
        None => ImpactResult {
            impact,
            rule_label: RuleLabel::Unmatched,
            rule_detail: "no matching rule found (defaults applied)".to_string(),
        },
    }
}

fn select_rule<'a>(
    commit: &CommitRecord,
    impact: Impact,
    cascade: &'a RuleCascade,
) -> Option<&'a ReleaseRule> {
    let mut first_match: Option<&ReleaseRule> = None;

    for rule in cascade.rules().iter().filter(|rule| rule.matches(commit)) {
        if rule.release.impact() == impact {
            return Some(rule);
        }
        if first_match.is_none() {
            first_match = Some(rule);
        }
    }

    first_match
}

/// Best-effort explanation under the analyzer's built-in rules
pub fn explain_default(commit: &CommitRecord, impact: Impact) -> String {
    if impact == Impact::None {
        return "no release (classifier returned none)".to_string();
    }
    if commit.breaking {
        return "breaking change -> major".to_string();
    }
    match commit.commit_type() {
        Some("feat") => "type=feat -> minor".to_string(),
        Some(t @ ("fix" | "perf")) => format!("type={} -> patch", t),
        // Don't claim a causal default for types the built-in rules don't cover
        Some(t) => format!("type={} -> {} (default mapping)", t, impact),
        None => format!("{} (default rules)", impact),
    }
}
