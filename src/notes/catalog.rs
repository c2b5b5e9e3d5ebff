use std::collections::HashMap;

use crate::config::SectionsConfig;

/// A cataloged section: commit type, display title and rendering position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub r#type: String,
    pub title: String,
    pub ordinal: usize,
}

/// Immutable lookup from commit type to section title and ordinal.
///
/// Built once from configuration and passed to the notes pipeline. Commits
/// whose type is absent or not cataloged belong to the `other` section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCatalog {
    sections: Vec<Section>,
    by_type: HashMap<String, usize>,
    by_title: HashMap<String, usize>,
    other: String,
}

impl SectionCatalog {
    /// Build a catalog from `(type, title)` pairs in rendering order.
    ///
    /// When a type is listed twice the first entry wins.
    pub fn new<I, T, S>(entries: I, other: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: Into<String>,
    {
        let mut sections = Vec::new();
        let mut by_type = HashMap::new();
        let mut by_title = HashMap::new();

        for (r#type, title) in entries {
            let r#type = r#type.into();
            if by_type.contains_key(&r#type) {
                continue;
            }
            let title = title.into();
            let ordinal = sections.len();
            by_type.insert(r#type.clone(), ordinal);
            by_title.entry(title.clone()).or_insert(ordinal);
            sections.push(Section {
                r#type,
                title,
                ordinal,
            });
        }

        SectionCatalog {
            sections,
            by_type,
            by_title,
            other: other.into(),
        }
    }

    pub fn from_config(config: &SectionsConfig) -> Self {
        SectionCatalog::new(
            config
                .catalog
                .iter()
                .map(|entry| (entry.r#type.clone(), entry.title.clone())),
            config.other.clone(),
        )
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Title of the catch-all section
    pub fn other_title(&self) -> &str {
        &self.other
    }

    pub fn is_other(&self, title: &str) -> bool {
        title == self.other
    }

    /// Section title for a commit type; unknown or missing types map to the other section
    pub fn title_for(&self, r#type: Option<&str>) -> &str {
        r#type
            .and_then(|t| self.by_type.get(t))
            .map(|&ordinal| self.sections[ordinal].title.as_str())
            .unwrap_or(self.other.as_str())
    }

    /// Rendering position of a cataloged title
    pub fn ordinal_of_title(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }
}

impl Default for SectionCatalog {
    fn default() -> Self {
        SectionCatalog::from_config(&SectionsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_titles() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.title_for(Some("feat")), "✨ Features");
        assert_eq!(catalog.title_for(Some("post")), "✉️ Posts");
        assert_eq!(catalog.title_for(Some("wip")), "🧩 Other");
        assert_eq!(catalog.title_for(None), "🧩 Other");
        assert_eq!(catalog.sections().len(), 11);
    }

    #[test]
    fn test_ordinals_follow_declaration_order() {
        let catalog = SectionCatalog::default();
        assert_eq!(catalog.ordinal_of_title("✨ Features"), Some(0));
        assert_eq!(catalog.ordinal_of_title("🐛 Fixes"), Some(1));
        assert_eq!(catalog.ordinal_of_title("📝 Docs"), Some(9));
        assert_eq!(catalog.ordinal_of_title("🧩 Other"), None);
    }

    #[test]
    fn test_duplicate_types_keep_first_entry() {
        let catalog = SectionCatalog::new(
            vec![("feat", "Features"), ("feat", "New"), ("fix", "Fixes")],
            "Other",
        );
        assert_eq!(catalog.title_for(Some("feat")), "Features");
        assert_eq!(catalog.ordinal_of_title("Fixes"), Some(1));
        assert_eq!(catalog.ordinal_of_title("New"), None);
    }
}
