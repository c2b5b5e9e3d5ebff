use std::fmt::Write;

use crate::config::NotesStyleConfig;
use crate::notes::{CommitGroup, NoteCommit};

/// Presentation options shared by both notes variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesStyle {
    /// Top-level heading; `{version}` is replaced with the version label
    pub heading: String,
    pub include_hash: bool,
    pub include_scope_prefix: bool,
}

impl From<&NotesStyleConfig> for NotesStyle {
    fn from(config: &NotesStyleConfig) -> Self {
        NotesStyle {
            heading: config.heading.clone(),
            include_hash: config.include_hash,
            include_scope_prefix: config.include_scope_prefix,
        }
    }
}

/// One bullet: `- **scope:** subject (abc1234)`
pub fn render_bullet(commit: &NoteCommit, style: &NotesStyle) -> String {
    let mut line = String::from("- ");
    if style.include_scope_prefix {
        if let Some(scope) = commit.scope.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(line, "**{}:** ", scope);
        }
    }
    line.push_str(&commit.subject);
    if style.include_hash {
        if let Some(hash) = &commit.short_hash {
            let _ = write!(line, " ({})", hash);
        }
    }
    line
}

/// Render a Markdown notes document.
///
/// Groups are rendered in the order given; empty groups are skipped.
pub fn render(version: &str, groups: &[CommitGroup], style: &NotesStyle) -> String {
    let mut out = String::new();
    out.push_str(&style.heading.replace("{version}", version));
    out.push_str("\n\n");

    for group in groups.iter().filter(|group| !group.commits.is_empty()) {
        let _ = writeln!(out, "### {}", group.title);
        out.push('\n');
        for commit in &group.commits {
            out.push_str(&render_bullet(commit, style));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich() -> NotesStyle {
        NotesStyle {
            heading: "## 📦 Release {version}".to_string(),
            include_hash: true,
            include_scope_prefix: true,
        }
    }

    fn clean() -> NotesStyle {
        NotesStyle {
            heading: "## {version}".to_string(),
            include_hash: false,
            include_scope_prefix: true,
        }
    }

    fn note(scope: Option<&str>, subject: &str, hash: Option<&str>) -> NoteCommit {
        NoteCommit {
            title: "✨ Features".to_string(),
            scope: scope.map(str::to_string),
            subject: subject.to_string(),
            short_hash: hash.map(str::to_string),
        }
    }

    #[test]
    fn test_bullets() {
        let commit = note(Some("api"), "add retry support", Some("9f2c1e7"));
        assert_eq!(
            render_bullet(&commit, &rich()),
            "- **api:** add retry support (9f2c1e7)"
        );
        assert_eq!(render_bullet(&commit, &clean()), "- **api:** add retry support");

        let no_prefix = NotesStyle {
            include_scope_prefix: false,
            ..clean()
        };
        assert_eq!(render_bullet(&commit, &no_prefix), "- add retry support");

        let bare = note(None, "tidy", None);
        assert_eq!(render_bullet(&bare, &rich()), "- tidy");
    }

    #[test]
    fn test_document_layout() {
        let groups = vec![
            CommitGroup {
                title: "✨ Features".to_string(),
                commits: vec![note(Some("api"), "add retry support", Some("9f2c1e7"))],
            },
            CommitGroup {
                title: "🐛 Fixes".to_string(),
                commits: Vec::new(),
            },
            CommitGroup {
                title: "🧩 Other".to_string(),
                commits: vec![note(None, "tidy", Some("0a1b2c3"))],
            },
        ];

        let doc = render("1.4.0", &groups, &rich());
        assert_eq!(
            doc,
            "## 📦 Release 1.4.0\n\n\
             ### ✨ Features\n\n\
             - **api:** add retry support (9f2c1e7)\n\n\
             ### 🧩 Other\n\n\
             - tidy (0a1b2c3)\n\n"
        );
    }

    #[test]
    fn test_no_groups_renders_heading_only() {
        assert_eq!(render("2.0.0", &[], &clean()), "## 2.0.0\n\n");
    }
}
