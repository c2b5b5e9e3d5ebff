use crate::error::{ReleaseImpactError, Result};
use crate::git::CommitInfo;
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::CommitSource for Git2Repository {
    fn head_oid(&self) -> Result<Oid> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id())
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let oid = reference
                    .peel_to_commit()
                    .map_err(|e| ReleaseImpactError::tag(format!("Cannot peel tag: {}", e)))?
                    .id();

                Ok(Some(oid))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(ReleaseImpactError::tag(format!(
                "Cannot find tag '{}': {}",
                tag_name, e
            ))),
        }
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push(to_oid)?;
        if let Some(from) = from_oid {
            revwalk.hide(from)?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message: commit.message().unwrap_or_default().to_string(),
                parent_count: commit.parent_count(),
            });
        }

        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommitSource;
    use git2::Signature;
    use tempfile::TempDir;

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_commits_since_tag() {
        let dir = TempDir::new().unwrap();
        let raw = Git2Repo::init(dir.path()).unwrap();

        let first = commit(&raw, "chore: initial commit");
        raw.tag_lightweight("v1.0.0", &raw.find_object(first, None).unwrap(), false)
            .unwrap();
        commit(&raw, "feat(api): add retry support");
        commit(&raw, "fix: handle nulls");

        let repo = Git2Repository::from_git2(raw);
        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0".to_string()]);

        let tag_oid = repo.find_tag_oid("v1.0.0").unwrap();
        assert_eq!(tag_oid, Some(first));
        assert_eq!(repo.find_tag_oid("v9.9.9").unwrap(), None);

        let head = repo.head_oid().unwrap();
        let commits = repo.commits_between(tag_oid, head).unwrap();
        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["feat(api): add retry support", "fix: handle nulls"]);
        assert!(commits.iter().all(|c| c.parent_count == 1));

        let all = repo.commits_between(None, head).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].parent_count, 0);
    }
}
