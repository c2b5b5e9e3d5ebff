use thiserror::Error;

/// Unified error type for release-impact operations
#[derive(Error, Debug)]
pub enum ReleaseImpactError {
    #[error("Commit message file error: {0}")]
    MessageFile(String),

    #[error("Impact classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Impact classifier failed: {0}")]
    Classifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-impact
pub type Result<T> = std::result::Result<T, ReleaseImpactError>;

impl ReleaseImpactError {
    /// Create a message file error with context
    pub fn message_file(msg: impl Into<String>) -> Self {
        ReleaseImpactError::MessageFile(msg.into())
    }

    /// Create a classifier-unavailable error with context
    pub fn classifier_unavailable(msg: impl Into<String>) -> Self {
        ReleaseImpactError::ClassifierUnavailable(msg.into())
    }

    /// Create a classifier error with context
    pub fn classifier(msg: impl Into<String>) -> Self {
        ReleaseImpactError::Classifier(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseImpactError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseImpactError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseImpactError::Tag(msg.into())
    }

    /// Process exit code reported for this error.
    ///
    /// * `2` - the commit message file is missing or unreadable
    /// * `3` - the impact classifier cannot be reached; callers may fall back to a heuristic
    /// * `1` - anything else
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseImpactError::MessageFile(_) => 2,
            ReleaseImpactError::ClassifierUnavailable(_) => 3,
            _ => 1,
        }
    }
}
