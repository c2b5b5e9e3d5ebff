use crate::error::{ReleaseImpactError, Result};
use crate::git::{CommitInfo, CommitSource};
use git2::Oid;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations.
///
/// History is linear: commits are stored in the order they were added.
pub struct MockRepository {
    commits: Vec<(Oid, CommitInfo)>,
    tags: HashMap<String, Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
        }
    }

    /// Append a commit to the history and return its object ID
    pub fn add_commit(&mut self, message: impl Into<String>) -> Oid {
        self.add_commit_with_parents(message, 1)
    }

    /// Append a commit with an explicit parent count (2+ for merges)
    pub fn add_commit_with_parents(&mut self, message: impl Into<String>, parent_count: usize) -> Oid {
        let index = self.commits.len() as u32 + 1;
        let mut bytes = [0u8; 20];
        bytes[..4].copy_from_slice(&index.to_le_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());
        self.commits.push((
            oid,
            CommitInfo {
                hash: oid.to_string(),
                message: message.into(),
                parent_count,
            },
        ));
        oid
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    fn position(&self, oid: Oid) -> Option<usize> {
        self.commits.iter().position(|(id, _)| *id == oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitSource for MockRepository {
    fn head_oid(&self) -> Result<Oid> {
        self.commits
            .last()
            .map(|(oid, _)| *oid)
            .ok_or_else(|| ReleaseImpactError::config("repository has no commits"))
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.get(tag_name).copied())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.keys().cloned().collect())
    }

    fn commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>> {
        let end = self
            .position(to_oid)
            .ok_or_else(|| ReleaseImpactError::config(format!("unknown commit {}", to_oid)))?;
        let start = from_oid
            .and_then(|oid| self.position(oid))
            .map(|pos| pos + 1)
            .unwrap_or(0);

        if start > end {
            return Ok(Vec::new());
        }
        Ok(self.commits[start..=end]
            .iter()
            .map(|(_, info)| info.clone())
            .collect())
    }
}
