use regex::Regex;
use std::sync::LazyLock;

use crate::domain::CommitRecord;
use crate::notes::SectionCatalog;

static MERGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Merge\b").expect("valid merge regex"));

const SHORT_HASH_LEN: usize = 7;

/// Display-ready commit, tagged with the section it renders under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCommit {
    pub title: String,
    pub scope: Option<String>,
    pub subject: String,
    /// Abbreviated hash; only carried by the rich variant
    pub short_hash: Option<String>,
}

/// Merge commits and commits without a subject never reach the notes
pub fn is_excluded(commit: &CommitRecord) -> bool {
    commit.merge
        || MERGE_PATTERN.is_match(&commit.header)
        || MERGE_PATTERN.is_match(&commit.subject)
        || commit.subject.trim().is_empty()
}

/// Map a commit onto its notes projection, or `None` when it is excluded.
///
/// `keep_hash` selects the rich projection; the clean one never carries a hash.
pub fn transform(
    commit: &CommitRecord,
    catalog: &SectionCatalog,
    keep_hash: bool,
) -> Option<NoteCommit> {
    if is_excluded(commit) {
        return None;
    }

    let short_hash = if keep_hash {
        short_hash(&commit.hash)
    } else {
        None
    };

    Some(NoteCommit {
        title: catalog.title_for(commit.commit_type()).to_string(),
        scope: commit.scope.clone(),
        subject: commit.subject.trim().to_string(),
        short_hash,
    })
}

fn short_hash(hash: &str) -> Option<String> {
    let hash = hash.trim();
    if hash.is_empty() {
        return None;
    }
    Some(hash.chars().take(SHORT_HASH_LEN).collect())
}
