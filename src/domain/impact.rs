use std::fmt;
use std::str::FromStr;

use crate::error::ReleaseImpactError;

/// Semantic-version bump implied by a set of commits.
///
/// Variants are declared in ascending order of significance so that `Ord`
/// picks the strongest impact across several commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Impact {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl Impact {
    /// Wire name used on stdout and by external classifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::None => "none",
            Impact::Patch => "patch",
            Impact::Minor => "minor",
            Impact::Major => "major",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Impact {
    type Err = ReleaseImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "major" => Ok(Impact::Major),
            "minor" => Ok(Impact::Minor),
            "patch" => Ok(Impact::Patch),
            "none" | "null" | "" => Ok(Impact::None),
            other => Err(ReleaseImpactError::classifier(format!(
                "unrecognised impact '{}'",
                other
            ))),
        }
    }
}
