//! Git history access
//!
//! This module provides a trait-based abstraction over the read-only Git
//! operations the notes command needs, allowing for a real implementation
//! and a mock for testing.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! ```rust
//! # use release_impact::git::CommitSource;
//! # fn example<R: CommitSource>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head_oid()?;
//! let commits = repo.commits_between(None, head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::CommitRecord;
use crate::error::Result;
use git2::Oid;

/// Commit information for release notes
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// Number of parents; more than one means a merge commit
    pub parent_count: usize,
}

impl CommitInfo {
    /// Parse the message into a record carrying this commit's hash and merge flag
    pub fn to_record(&self) -> CommitRecord {
        CommitRecord::parse(&self.message)
            .with_hash(self.hash.clone())
            .with_merge(self.parent_count > 1)
    }
}

/// Read-only view of a repository's history.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map underlying
/// errors (like `git2::Error`) to [crate::error::ReleaseImpactError] variants.
pub trait CommitSource {
    /// Object ID of the commit HEAD points at
    fn head_oid(&self) -> Result<Oid>;

    /// Find a tag by name and return the commit it points at.
    ///
    /// Handles both lightweight and annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Commit the tag resolves to
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a Git error
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// All tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commits reachable from `to_oid` but not from `from_oid`, oldest first.
    ///
    /// With `from_oid = None` the whole history up to `to_oid` is returned.
    fn commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>>;
}
