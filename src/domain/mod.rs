//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod impact;
pub mod rule;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use impact::Impact;
pub use rule::{ReleaseRule, ReleaseValue, RuleCascade};
pub use tag::TagPattern;
