//! In-memory term store.
//!
//! The `TermStore` owns every loaded term, category, and style rule, plus
//! the derived lowercase name→id map used for exact lookups. It is built
//! once from in-memory collections (see `loader` for the YAML boundary)
//! and treated as read-only afterwards: concurrent readers need no
//! synchronization, and picking up new terms means building a fresh store
//! and swapping the `Arc` atomically.

use crate::index::fold;
use crate::types::{Category, StyleRule, Term};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable-after-load collection of terms and derived name indices.
#[derive(Debug, Default)]
pub struct TermStore {
    /// All terms, in load order
    terms: Vec<Arc<Term>>,

    /// Term id → position in `terms`
    id_to_index: HashMap<String, usize>,

    /// Case-folded name → term id.
    ///
    /// Built last-write-wins: if two terms share a literal name, the
    /// later-loaded term silently owns the lookup. This is a documented
    /// limitation of name lookup, not something the store papers over.
    name_to_id: HashMap<String, String>,

    /// All categories, in load order
    categories: Vec<Category>,

    /// Category id → position in `categories`
    category_index: HashMap<String, usize>,

    /// Style-guide rules, in load order
    style_rules: Vec<StyleRule>,
}

impl TermStore {
    /// Build a store from already-validated records.
    ///
    /// Duplicate term ids resolve last-write-wins with a warning; the
    /// replacement keeps the original load position so pattern ordering
    /// stays stable across reloads of the same data.
    pub fn from_parts(
        terms: Vec<Term>,
        categories: Vec<Category>,
        style_rules: Vec<StyleRule>,
    ) -> Self {
        let mut store = TermStore::default();

        for term in terms {
            store.insert_term(term);
        }

        for category in categories {
            if let Some(&idx) = store.category_index.get(&category.id) {
                warn!(id = %category.id, "Duplicate category id, replacing earlier entry");
                store.categories[idx] = category;
            } else {
                store
                    .category_index
                    .insert(category.id.clone(), store.categories.len());
                store.categories.push(category);
            }
        }

        store.style_rules = style_rules;

        debug!(
            terms = store.terms.len(),
            categories = store.categories.len(),
            style_rules = store.style_rules.len(),
            "Term store built"
        );

        store
    }

    fn insert_term(&mut self, term: Term) {
        let term = Arc::new(term);

        // Name map entries fold case so lookups are case-insensitive for
        // Latin names; CJK names pass through the fold untouched.
        for name in term.name_surface() {
            self.name_to_id.insert(fold(name), term.id.clone());
        }

        if let Some(&idx) = self.id_to_index.get(&term.id) {
            warn!(id = %term.id, "Duplicate term id, replacing earlier entry");
            self.terms[idx] = term;
        } else {
            self.id_to_index.insert(term.id.clone(), self.terms.len());
            self.terms.push(term);
        }
    }

    /// Look up a term by its id.
    pub fn lookup(&self, id: &str) -> Option<Arc<Term>> {
        self.id_to_index.get(id).map(|&idx| self.terms[idx].clone())
    }

    /// Look up a term by any of its names (case-insensitive exact match
    /// against the whole name surface).
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<Term>> {
        self.name_to_id
            .get(&fold(name))
            .and_then(|id| self.lookup(id))
    }

    /// All terms in load order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<Term>> {
        self.terms.iter()
    }

    /// Number of terms in the store.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the store holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The folded name → term id map (drives fuzzy-search candidates).
    pub fn name_index(&self) -> &HashMap<String, String> {
        &self.name_to_id
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index.get(id).map(|&idx| &self.categories[idx])
    }

    /// All categories in load order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Terms whose primary category matches `category_id`.
    pub fn terms_in_category(&self, category_id: &str) -> Vec<Arc<Term>> {
        self.terms
            .iter()
            .filter(|t| t.category == category_id)
            .cloned()
            .collect()
    }

    /// Style-guide rules in load order.
    pub fn style_rules(&self) -> &[StyleRule] {
        &self.style_rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Aliases, Definitions};

    fn make_term(id: &str, en: &str, zh: &str) -> Term {
        Term {
            id: id.to_string(),
            term_en: en.to_string(),
            term_zh: zh.to_string(),
            full_name_en: None,
            full_name_zh: None,
            definitions: Definitions::brief("def"),
            category: "attack".to_string(),
            subcategory: None,
            tags: Vec::new(),
            related_terms: Vec::new(),
            see_also: Vec::new(),
            aliases: Aliases::default(),
            usage: Default::default(),
            references: Default::default(),
            metadata: Default::default(),
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let store = TermStore::from_parts(
            vec![make_term("apt", "APT", "進階持續性威脅")],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(store.lookup("apt").unwrap().term_en, "APT");
        assert!(store.lookup("nope").is_none());
    }

    #[test]
    fn test_lookup_by_name_case_insensitive() {
        let store = TermStore::from_parts(
            vec![make_term("apt", "APT", "進階持續性威脅")],
            Vec::new(),
            Vec::new(),
        );
        assert!(store.lookup_by_name("apt").is_some());
        assert!(store.lookup_by_name("Apt").is_some());
        assert!(store.lookup_by_name("進階持續性威脅").is_some());
        assert!(store.lookup_by_name("unknown").is_none());
    }

    #[test]
    fn test_shared_name_last_write_wins() {
        let mut a = make_term("worm_a", "Worm", "蠕蟲A");
        a.aliases.en.push("Malware Worm".to_string());
        let b = make_term("worm_b", "Worm", "蠕蟲B");

        let store = TermStore::from_parts(vec![a, b], Vec::new(), Vec::new());

        // "Worm" is claimed by both; the later-loaded term owns the lookup.
        assert_eq!(store.lookup_by_name("worm").unwrap().id, "worm_b");
        // Names unique to the earlier term still resolve to it.
        assert_eq!(store.lookup_by_name("Malware Worm").unwrap().id, "worm_a");
    }

    #[test]
    fn test_duplicate_id_keeps_load_position() {
        let first = make_term("apt", "APT", "進階持續性威脅");
        let other = make_term("xss", "XSS", "跨站腳本攻擊");
        let replacement = make_term("apt", "APT", "高級持續性威脅");

        let store = TermStore::from_parts(vec![first, other, replacement], Vec::new(), Vec::new());

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("apt").unwrap().term_zh, "高級持續性威脅");
        // The replacement occupies the original slot, not the tail.
        assert_eq!(store.all().next().unwrap().id, "apt");
    }

    #[test]
    fn test_terms_in_category() {
        let mut web = make_term("xss", "XSS", "跨站腳本攻擊");
        web.category = "web_attack".to_string();
        let store = TermStore::from_parts(
            vec![make_term("apt", "APT", "進階持續性威脅"), web],
            vec![Category {
                id: "web_attack".to_string(),
                name_en: "Web Attacks".to_string(),
                name_zh: "網頁攻擊".to_string(),
                description: None,
                subcategories: Vec::new(),
                icon: None,
            }],
            Vec::new(),
        );

        let terms = store.terms_in_category("web_attack");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].id, "xss");
        assert!(store.category("web_attack").is_some());
        assert!(store.category("nope").is_none());
    }
}
