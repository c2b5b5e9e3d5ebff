//! Analysis engine: impact classification and its provenance

pub mod classifier;
pub mod explain;

pub use classifier::{default_rules, CommandClassifier, ImpactClassifier, RuleCascadeClassifier};
pub use explain::{explain_cascade, explain_default, ImpactResult, RuleExplainer, RuleLabel};
