use regex::Regex;
use std::sync::LazyLock;

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9]+)(\(([^)]+)\))?(!)?:\s+(.+)$").expect("valid header regex")
});

static REVERT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^Revert\s+""#).expect("valid revert regex"));

static BREAKING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^BREAKING[ -]CHANGE(:|\s)").expect("valid breaking-change regex")
});

/// Structured view of a single commit message.
///
/// Produced once per message and never mutated afterwards. Fields that cannot
/// be extracted stay `None`/`false`; parsing has no failure mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRecord {
    pub header: String,
    pub body: String,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub breaking: bool,
    pub revert: bool,
    pub subject: String,
    pub hash: String,
    /// Set by the commit source when the commit has more than one parent
    pub merge: bool,
}

impl CommitRecord {
    /// Parse a commit message according to the conventional commits header grammar
    /// Supports formats:
    /// - type(scope)!: subject
    /// - type(scope): subject
    /// - type!: subject
    /// - type: subject
    /// - non-conventional text (typeless, subject is the whole header)
    pub fn parse(message: &str) -> Self {
        let message = message.replace('\r', "");
        let (header, body) = match message.split_once('\n') {
            Some((header, body)) => (header.to_string(), body.to_string()),
            None => (message.clone(), String::new()),
        };

        let revert = REVERT_PATTERN.is_match(&header);

        let (r#type, scope, mut breaking, subject) = match HEADER_PATTERN.captures(&header) {
            Some(captures) => (
                captures.get(1).map(|m| m.as_str().to_lowercase()),
                captures.get(3).map(|m| m.as_str().to_string()),
                captures.get(4).is_some(),
                captures
                    .get(5)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            ),
            None => (None, None, false, header.trim().to_string()),
        };

        if BREAKING_PATTERN.is_match(&message) {
            breaking = true;
        }

        CommitRecord {
            header,
            body,
            r#type,
            scope,
            breaking,
            revert,
            subject,
            hash: String::new(),
            merge: false,
        }
    }

    /// Attach the commit hash reported by the commit source
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Mark the record as a merge commit
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Commit type as a string slice, if the header was conventional
    pub fn commit_type(&self) -> Option<&str> {
        self.r#type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_with_scope() {
        let commit = CommitRecord::parse("feat(api): add retry support");
        assert_eq!(commit.commit_type(), Some("feat"));
        assert_eq!(commit.scope, Some("api".to_string()));
        assert_eq!(commit.subject, "add retry support");
        assert!(!commit.breaking);
        assert!(!commit.revert);
    }

    #[test]
    fn test_parse_with_breaking_marker() {
        let commit = CommitRecord::parse("feat(auth)!: redesign login");
        assert_eq!(commit.commit_type(), Some("feat"));
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert!(commit.breaking);
    }

    #[test]
    fn test_parse_breaking_without_scope() {
        let commit = CommitRecord::parse("feat!: redesign");
        assert_eq!(commit.scope, None);
        assert!(commit.breaking);
    }

    #[test]
    fn test_type_is_lowercased() {
        let commit = CommitRecord::parse("FIX: handle nulls");
        assert_eq!(commit.commit_type(), Some("fix"));
    }

    #[test]
    fn test_parse_non_conventional() {
        let commit = CommitRecord::parse("Random commit message");
        assert_eq!(commit.r#type, None);
        assert_eq!(commit.scope, None);
        assert_eq!(commit.subject, "Random commit message");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_missing_space_after_colon_is_not_conventional() {
        let commit = CommitRecord::parse("feat:no space");
        assert_eq!(commit.r#type, None);
        assert_eq!(commit.subject, "feat:no space");
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let commit =
            CommitRecord::parse("fix!: correct auth bypass\n\nBREAKING CHANGE: tokens now expire");
        assert_eq!(commit.commit_type(), Some("fix"));
        assert!(commit.breaking);
        assert_eq!(commit.body, "\nBREAKING CHANGE: tokens now expire");
    }

    #[test]
    fn test_breaking_footer_is_case_insensitive_and_accepts_hyphen() {
        assert!(CommitRecord::parse("docs: x\n\nbreaking-change: y").breaking);
        assert!(CommitRecord::parse("Plain header\n\nBREAKING CHANGE: y").breaking);
    }

    #[test]
    fn test_breaking_footer_must_start_a_line() {
        let commit = CommitRecord::parse("docs: mention BREAKING CHANGE: in guide");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_revert_detection() {
        let commit = CommitRecord::parse("Revert \"feat: add login\"\n\nThis reverts commit abc.");
        assert!(commit.revert);
        assert_eq!(commit.r#type, None);

        assert!(!CommitRecord::parse("revert \"feat: add login\"").revert);
    }

    #[test]
    fn test_carriage_returns_are_stripped() {
        let commit = CommitRecord::parse("fix(db): pool size\r\n\r\nbody line\r\n");
        assert_eq!(commit.header, "fix(db): pool size");
        assert_eq!(commit.scope, Some("db".to_string()));
        assert_eq!(commit.body, "\nbody line\n");
    }

    #[test]
    fn test_empty_message() {
        let commit = CommitRecord::parse("");
        assert_eq!(commit, CommitRecord::default());
    }

    #[test]
    fn test_builders() {
        let commit = CommitRecord::parse("chore: tidy")
            .with_hash("0123456789abcdef")
            .with_merge(true);
        assert_eq!(commit.hash, "0123456789abcdef");
        assert!(commit.merge);
    }

    proptest! {
        #[test]
        fn conventional_headers_parse_exactly(
            t in "[a-z][a-z0-9]{0,8}",
            scope in "[a-z][a-z0-9-]{0,8}",
            subject in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}",
        ) {
            let commit = CommitRecord::parse(&format!("{t}({scope})!: {subject}"));
            prop_assert_eq!(commit.r#type.as_deref(), Some(t.as_str()));
            prop_assert_eq!(commit.scope.as_deref(), Some(scope.as_str()));
            prop_assert!(commit.breaking);
            prop_assert_eq!(commit.subject, subject.trim().to_string());
        }

        #[test]
        fn breaking_footer_always_marks_breaking(header in "[^\n\r]{0,40}", tail in "[^\n\r]{0,20}") {
            let commit = CommitRecord::parse(&format!("{header}\n\nBREAKING CHANGE: {tail}"));
            prop_assert!(commit.breaking);
        }

        #[test]
        fn revert_prefix_always_marks_revert(rest in "[^\n\r]{0,40}") {
            let commit = CommitRecord::parse(&format!("Revert \"{rest}"));
            prop_assert!(commit.revert);
        }
    }
}
