//! Release notes generation
//!
//! One pipeline serves both notes variants:
//! - `transform` - drop noise commits and tag survivors with a section title
//! - `ordering` - group by title and impose a deterministic order
//! - `render` - write the Markdown document
//!
//! The variants differ only in their [`NotesStyle`].

pub mod catalog;
pub mod ordering;
pub mod render;
pub mod transform;

pub use catalog::{Section, SectionCatalog};
pub use ordering::{compare_commits, compare_titles, group_commits, sort_groups, CommitGroup};
pub use render::{render, render_bullet, NotesStyle};
pub use transform::{is_excluded, transform, NoteCommit};

use crate::config::NotesConfig;
use crate::domain::CommitRecord;

/// The two published forms of the notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NotesVariant {
    /// Rich notes for CHANGELOG.md, with short hashes
    Changelog,
    /// Clean notes for the release page
    Github,
}

impl NotesVariant {
    /// Style configured for this variant
    pub fn style(&self, config: &NotesConfig) -> NotesStyle {
        match self {
            NotesVariant::Changelog => NotesStyle::from(&config.changelog),
            NotesVariant::Github => NotesStyle::from(&config.github),
        }
    }
}

/// Filter -> classify -> order -> render, parameterised by a [`NotesStyle`]
pub struct NotesGenerator {
    catalog: SectionCatalog,
}

impl NotesGenerator {
    pub fn new(catalog: SectionCatalog) -> Self {
        NotesGenerator { catalog }
    }

    pub fn catalog(&self) -> &SectionCatalog {
        &self.catalog
    }

    /// Ordered groups for the given commits
    pub fn groups(&self, commits: &[CommitRecord], style: &NotesStyle) -> Vec<CommitGroup> {
        let notes = commits
            .iter()
            .filter_map(|commit| transform(commit, &self.catalog, style.include_hash))
            .collect();
        group_commits(notes, &self.catalog)
    }

    /// Complete notes document
    pub fn generate(&self, version: &str, commits: &[CommitRecord], style: &NotesStyle) -> String {
        render(version, &self.groups(commits, style), style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commits() -> Vec<CommitRecord> {
        vec![
            CommitRecord::parse("fix(auth): reject expired tokens").with_hash("1111111aaaa"),
            CommitRecord::parse("Merge branch 'main' into feature").with_hash("2222222bbbb"),
            CommitRecord::parse("feat(api): add retry support").with_hash("3333333cccc"),
            CommitRecord::parse("Tidy up scripts").with_hash("4444444dddd"),
            CommitRecord::parse("  \n\nbody without a header").with_hash("5555555eeee"),
            CommitRecord::parse("feat(api): add backoff").with_hash("6666666ffff"),
        ]
    }

    #[test]
    fn test_changelog_variant() {
        let generator = NotesGenerator::new(SectionCatalog::default());
        let style = NotesVariant::Changelog.style(&NotesConfig::default());
        let doc = generator.generate("1.3.0", &commits(), &style);

        assert_eq!(
            doc,
            "## 📦 Release 1.3.0\n\n\
             ### ✨ Features\n\n\
             - **api:** add backoff (6666666)\n\
             - **api:** add retry support (3333333)\n\n\
             ### 🐛 Fixes\n\n\
             - **auth:** reject expired tokens (1111111)\n\n\
             ### 🧩 Other\n\n\
             - Tidy up scripts (4444444)\n\n"
        );
    }

    #[test]
    fn test_github_variant_has_no_hashes() {
        let generator = NotesGenerator::new(SectionCatalog::default());
        let style = NotesVariant::Github.style(&NotesConfig::default());
        let doc = generator.generate("1.3.0", &commits(), &style);

        assert!(doc.starts_with("## 1.3.0\n\n### ✨ Features\n"));
        assert!(doc.contains("- **auth:** reject expired tokens\n"));
        assert!(!doc.contains("1111111"));
        assert!(!doc.contains("Merge branch"));
    }

    #[test]
    fn test_clean_groups_carry_no_hash() {
        let generator = NotesGenerator::new(SectionCatalog::default());
        let style = NotesVariant::Github.style(&NotesConfig::default());
        let groups = generator.groups(&commits(), &style);
        assert!(groups
            .iter()
            .flat_map(|g| &g.commits)
            .all(|c| c.short_hash.is_none()));
    }
}
