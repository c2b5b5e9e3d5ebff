//! Workflow orchestration
//!
//! Holds the impact and notes workflows so `main.rs` only deals with argument
//! parsing, logging setup and exit codes. Both workflows take their
//! collaborators (classifier, commit source, configuration) explicitly.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::analyzer::{ImpactClassifier, ImpactResult, RuleExplainer};
use crate::config::Config;
use crate::domain::{version, CommitRecord, Impact};
use crate::error::{ReleaseImpactError, Result};
use crate::git::{CommitInfo, CommitSource};
use crate::notes::{NotesGenerator, NotesVariant, SectionCatalog};
use crate::release_config;

/// Arguments for the impact workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactWorkflowArgs {
    /// Repository root used for release configuration discovery
    pub repo_root: PathBuf,

    /// File holding the commit message to classify
    pub message_file: Option<PathBuf>,

    /// Explicit release configuration file, bypassing discovery
    pub release_config: Option<PathBuf>,
}

/// Arguments for the notes workflow
#[derive(Debug, Clone, PartialEq)]
pub struct NotesWorkflowArgs {
    pub repo_root: PathBuf,

    /// Tag to start from; defaults to the latest tag following `tagFormat`
    pub from_tag: Option<String>,

    /// Version label for the heading; derived from the impact when absent
    pub label: Option<String>,

    pub variant: NotesVariant,

    pub release_config: Option<PathBuf>,
}

/// Result of the notes workflow
#[derive(Debug, Clone, PartialEq)]
pub struct NotesReport {
    /// Tag the notes start from, if any
    pub previous_tag: Option<String>,

    /// Version label used in the heading
    pub version: String,

    /// Impact of the window, when it had to be computed
    pub impact: Option<Impact>,

    pub commit_count: usize,

    /// Rendered Markdown document
    pub document: String,
}

/// Read the commit message file, stripping carriage returns
pub fn read_message_file(args: &ImpactWorkflowArgs) -> Result<String> {
    let path = args
        .message_file
        .as_ref()
        .ok_or_else(|| ReleaseImpactError::message_file("commit message file missing"))?;

    if !path.is_file() {
        return Err(ReleaseImpactError::message_file(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let message = fs::read_to_string(path).map_err(|e| {
        ReleaseImpactError::message_file(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(message.replace('\r', ""))
}

/// Impact workflow
///
/// 1. Read the commit message
/// 2. Resolve the release configuration and its rule cascade
/// 3. Ask the classifier for the impact
/// 4. Explain the impact against the cascade
pub fn run_impact_workflow(
    args: &ImpactWorkflowArgs,
    classifier: &dyn ImpactClassifier,
) -> Result<ImpactResult> {
    let message = read_message_file(args)?;

    let release_config =
        release_config::resolve(&args.repo_root, args.release_config.as_deref());
    if let Some(source) = release_config.source() {
        debug!(source = %source.display(), "using release configuration");
    }
    let rules = release_config.release_rules();

    let impact = classifier.classify(std::slice::from_ref(&message), &rules.cascade())?;
    let commit = CommitRecord::parse(&message);

    Ok(RuleExplainer::new(rules).explain(&commit, impact))
}

/// Notes workflow
///
/// 1. Resolve the starting tag and previous version
/// 2. Collect commits since that tag
/// 3. Derive the version label (explicit, or previous version bumped by impact)
/// 4. Render the requested notes variant
pub fn run_notes_workflow<R: CommitSource>(
    args: &NotesWorkflowArgs,
    repo: &R,
    config: &Config,
    classifier: &dyn ImpactClassifier,
) -> Result<NotesReport> {
    let release_config =
        release_config::resolve(&args.repo_root, args.release_config.as_deref());
    let pattern = release_config.tag_pattern();

    let (previous_tag, previous_version) = match &args.from_tag {
        Some(tag) => (Some(tag.clone()), pattern.version_of(tag)?),
        None => match pattern.latest(&repo.list_tags()?)? {
            Some((tag, version)) => (Some(tag), Some(version)),
            None => (None, None),
        },
    };

    let from_oid = match &previous_tag {
        Some(tag) => Some(
            repo.find_tag_oid(tag)?
                .ok_or_else(|| ReleaseImpactError::tag(format!("tag '{}' not found", tag)))?,
        ),
        None => None,
    };

    let commits = repo.commits_between(from_oid, repo.head_oid()?)?;
    info!(
        from = previous_tag.as_deref().unwrap_or("<root>"),
        commits = commits.len(),
        "collected commits for release notes"
    );

    let (version, impact) = match &args.label {
        Some(label) => (label.clone(), None),
        None => {
            if let (Some(tag), None) = (&previous_tag, &previous_version) {
                return Err(ReleaseImpactError::version(format!(
                    "tag '{}' carries no version under pattern '{}'; pass --label",
                    tag,
                    pattern.pattern
                )));
            }
            let messages: Vec<String> = commits.iter().map(|c| c.message.clone()).collect();
            let impact = classifier.classify(&messages, &release_config.release_rules().cascade())?;
            let next = version::next_version(previous_version.as_ref(), impact);
            (next.to_string(), Some(impact))
        }
    };

    let records: Vec<CommitRecord> = commits.iter().map(CommitInfo::to_record).collect();
    let generator = NotesGenerator::new(SectionCatalog::from_config(&config.sections));
    let document = generator.generate(&version, &records, &args.variant.style(&config.notes));

    Ok(NotesReport {
        previous_tag,
        version,
        impact,
        commit_count: records.len(),
        document,
    })
}
