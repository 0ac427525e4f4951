//! The glossary facade.
//!
//! `Glossary` bundles a term store with the matcher, searcher, and
//! validator derived from it, and exposes the whole query surface behind
//! one handle. Construction is the only expensive step; every operation
//! afterwards is a pure computation over the immutable store, so a
//! `Glossary` wrapped in an `Arc` is safe to share across threads without
//! locking. Picking up new terms means building a fresh `Glossary` and
//! swapping the `Arc` atomically.

use crate::matcher::{LinkFormat, TermMatcher};
use crate::search::TermSearcher;
use crate::store::TermStore;
use crate::types::{Category, Term, TermMatch, ValidationIssue};
use crate::validator::{IssueWithContext, TermValidator};
use std::sync::Arc;

/// A loaded glossary with its derived matching and validation engines.
pub struct Glossary {
    store: Arc<TermStore>,
    matcher: TermMatcher,
    searcher: TermSearcher,
    validator: TermValidator,
}

impl Glossary {
    /// Build a glossary (and all derived indices) from a store.
    pub fn new(store: TermStore) -> Self {
        let store = Arc::new(store);
        Glossary {
            matcher: TermMatcher::new(store.clone()),
            searcher: TermSearcher::new(store.clone()),
            validator: TermValidator::new(store.clone()),
            store,
        }
    }

    /// The underlying term store.
    pub fn store(&self) -> &Arc<TermStore> {
        &self.store
    }

    // === Lookup ===

    /// Look up a term by id.
    pub fn lookup(&self, id: &str) -> Option<Arc<Term>> {
        self.store.lookup(id)
    }

    /// Look up a term by any of its names (case-insensitive).
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<Term>> {
        self.store.lookup_by_name(name)
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.store.category(id)
    }

    // === Search and matching ===

    /// Fuzzy-search term names, best match first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<Term>> {
        self.searcher.search(query, limit)
    }

    /// Find every term occurrence in `text`.
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        self.matcher.find_all(text)
    }

    /// Link every matched term to its glossary page.
    pub fn annotate(&self, text: &str, format: LinkFormat, base_url: &str) -> String {
        self.matcher.annotate(text, format, base_url)
    }

    /// Wrap every matched term span in `<tag>…</tag>`.
    pub fn highlight(&self, text: &str, tag: &str) -> String {
        self.matcher.highlight(text, tag)
    }

    /// Rewrite `[[term_id]]` markers into Markdown links.
    pub fn process_markers(&self, text: &str) -> String {
        self.matcher.process_markers(text)
    }

    // === Validation ===

    /// Scan `text` for forbidden phrases.
    pub fn validate(&self, text: &str) -> Vec<ValidationIssue> {
        self.validator.validate(text)
    }

    /// Validate with surrounding lines of context per issue.
    pub fn validate_with_context(&self, text: &str, context_lines: usize) -> Vec<IssueWithContext> {
        self.validator.validate_with_context(text, context_lines)
    }

    /// Auto-fix forbidden phrases, returning the corrected text and the
    /// issues that were fixed.
    pub fn fix(&self, text: &str) -> (String, Vec<ValidationIssue>) {
        self.validator.fix(text)
    }

    /// Markdown validation report.
    pub fn report(&self, text: &str) -> String {
        self.validator.report(text)
    }

    /// Number of patterns in the matcher's index.
    pub fn pattern_count(&self) -> usize {
        self.matcher.index().len()
    }

    /// Number of validation rules.
    pub fn rule_count(&self) -> usize {
        self.validator.rule_count()
    }
}

impl std::fmt::Debug for Glossary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glossary")
            .field("terms", &self.store.len())
            .field("patterns", &self.pattern_count())
            .field("rules", &self.rule_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Aliases, Definitions, StyleRule, Usage};

    fn make_glossary() -> Glossary {
        let term = Term {
            id: "apt".to_string(),
            term_en: "APT".to_string(),
            term_zh: "進階持續性威脅".to_string(),
            full_name_en: Some("Advanced Persistent Threat".to_string()),
            full_name_zh: None,
            definitions: Definitions::brief("長期潛伏的針對性攻擊"),
            category: "attack".to_string(),
            subcategory: None,
            tags: Vec::new(),
            related_terms: Vec::new(),
            see_also: Vec::new(),
            aliases: Aliases::default(),
            usage: Usage {
                avoid: vec!["高級持續性威脅".to_string()],
                ..Default::default()
            },
            references: Default::default(),
            metadata: Default::default(),
        };
        let style = StyleRule {
            avoid: "黑客".to_string(),
            preferred: "駭客".to_string(),
            reason: None,
        };
        Glossary::new(TermStore::from_parts(vec![term], Vec::new(), vec![style]))
    }

    #[test]
    fn test_facade_wires_all_engines() {
        let glossary = make_glossary();

        assert!(glossary.lookup("apt").is_some());
        assert!(glossary.lookup_by_name("apt").is_some());
        assert_eq!(glossary.search("Advanced Persistent", 5).len(), 1);
        assert_eq!(glossary.find_all("APT 攻擊").len(), 1);
        assert_eq!(glossary.validate("黑客使用高級持續性威脅").len(), 2);

        let (fixed, applied) = glossary.fix("黑客");
        assert_eq!(fixed, "駭客");
        assert_eq!(applied.len(), 1);
    }

    #[test]
    fn test_counts() {
        let glossary = make_glossary();
        // Name surface: APT, 進階持續性威脅, Advanced Persistent Threat
        assert_eq!(glossary.pattern_count(), 3);
        // One style rule plus one avoid phrase
        assert_eq!(glossary.rule_count(), 2);
    }
}
