use std::cmp::Ordering;

use crate::notes::{NoteCommit, SectionCatalog};

/// Commits sharing a section title, in rendering order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitGroup {
    pub title: String,
    pub commits: Vec<NoteCommit>,
}

/// Total order over section titles.
///
/// The other section sorts after everything. Cataloged titles follow catalog
/// order and precede uncataloged ones; uncataloged titles compare byte-wise.
pub fn compare_titles(a: &str, b: &str, catalog: &SectionCatalog) -> Ordering {
    match (catalog.is_other(a), catalog.is_other(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (catalog.ordinal_of_title(a), catalog.ordinal_of_title(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.as_bytes().cmp(b.as_bytes()),
    }
}

/// Order within a group: scope (absent first), then subject, byte-wise
pub fn compare_commits(a: &NoteCommit, b: &NoteCommit) -> Ordering {
    a.scope
        .as_deref()
        .map(str::as_bytes)
        .cmp(&b.scope.as_deref().map(str::as_bytes))
        .then_with(|| a.subject.as_bytes().cmp(b.subject.as_bytes()))
}

/// Stable sort of groups by title
pub fn sort_groups(groups: &mut [CommitGroup], catalog: &SectionCatalog) {
    groups.sort_by(|a, b| compare_titles(&a.title, &b.title, catalog));
}

/// Bucket commits by title, then order groups and the commits inside each group
pub fn group_commits(commits: Vec<NoteCommit>, catalog: &SectionCatalog) -> Vec<CommitGroup> {
    let mut groups: Vec<CommitGroup> = Vec::new();

    for commit in commits {
        match groups.iter_mut().find(|group| group.title == commit.title) {
            Some(group) => group.commits.push(commit),
            None => groups.push(CommitGroup {
                title: commit.title.clone(),
                commits: vec![commit],
            }),
        }
    }

    for group in &mut groups {
        group.commits.sort_by(compare_commits);
    }
    sort_groups(&mut groups, catalog);
    groups
}
