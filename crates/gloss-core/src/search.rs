//! Fuzzy term search.
//!
//! Ranks known term names against a free-text query. An exact name hit
//! short-circuits ranking entirely; otherwise every name-surface string is
//! scored with a weighted-ratio similarity built on `strsim`, scores below
//! the cutoff are discarded, and the survivors are walked best-first while
//! deduplicating by term id.
//!
//! The weighted ratio tolerates word reordering (token-sorted comparison)
//! and partial overlaps (containment), which plain edit distance does not.

use crate::index::fold;
use crate::store::TermStore;
use crate::types::Term;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Scores below this (out of 100) are considered noise and dropped.
const SCORE_CUTOFF: f64 = 60.0;

/// Fuzzy searcher over a store's name surface.
pub struct TermSearcher {
    store: Arc<TermStore>,

    /// (folded name, term id) candidates, one per distinct name string
    candidates: Vec<(String, String)>,
}

impl TermSearcher {
    /// Build a searcher over a store.
    pub fn new(store: Arc<TermStore>) -> Self {
        let mut candidates: Vec<(String, String)> = store
            .name_index()
            .iter()
            .map(|(name, id)| (name.clone(), id.clone()))
            .collect();
        // HashMap iteration order is arbitrary; sort so ranking ties are
        // deterministic across runs.
        candidates.sort();

        TermSearcher { store, candidates }
    }

    /// Search for terms matching `query`, best first, at most `limit`.
    ///
    /// An empty query returns an empty list. An exact (case-insensitive)
    /// name match returns that single term immediately.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Arc<Term>> {
        if query.trim().is_empty() || limit == 0 {
            return Vec::new();
        }

        if let Some(term) = self.store.lookup_by_name(query) {
            return vec![term];
        }

        let folded_query = fold(query);

        let mut scored: Vec<(f64, &str)> = self
            .candidates
            .par_iter()
            .filter_map(|(name, id)| {
                let score = weighted_ratio(&folded_query, name);
                (score >= SCORE_CUTOFF).then_some((score, id.as_str()))
            })
            .collect();

        // Descending score; candidate order breaks exact ties
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut results = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        for (_, id) in scored {
            if !seen.insert(id) {
                continue;
            }
            if let Some(term) = self.store.lookup(id) {
                results.push(term);
                if results.len() >= limit {
                    break;
                }
            }
        }

        debug!(query = %query, results = results.len(), "Fuzzy search complete");
        results
    }
}

impl std::fmt::Debug for TermSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermSearcher")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}

/// Weighted-ratio string similarity in `[0, 100]`.
///
/// Takes the best of three views of the pair:
/// - direct Jaro-Winkler,
/// - Jaro-Winkler over whitespace-token-sorted strings (slightly
///   discounted), so "persistent threat advanced" still ranks against
///   "advanced persistent threat",
/// - a containment score when one string is a substring of the other,
///   weighted by the length ratio so tiny fragments do not dominate.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let direct = strsim::jaro_winkler(a, b);
    let token_sorted = strsim::jaro_winkler(&sort_tokens(a), &sort_tokens(b)) * 0.95;

    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let containment = if long.contains(short) {
        let ratio = short.chars().count() as f64 / long.chars().count() as f64;
        0.9 * (0.85 + 0.15 * ratio)
    } else {
        0.0
    };

    100.0 * direct.max(token_sorted).max(containment)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Aliases, Definitions, Term};

    fn make_term(id: &str, en: &str, zh: &str, full_en: Option<&str>) -> Term {
        Term {
            id: id.to_string(),
            term_en: en.to_string(),
            term_zh: zh.to_string(),
            full_name_en: full_en.map(String::from),
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

    fn make_searcher() -> TermSearcher {
        let store = TermStore::from_parts(
            vec![
                make_term("apt", "APT", "進階持續性威脅", Some("Advanced Persistent Threat")),
                make_term("apt_group", "APT Group", "APT 組織", None),
                make_term("ransomware", "Ransomware", "勒索軟體", None),
                make_term("xss", "XSS", "跨站腳本攻擊", None),
            ],
            Vec::new(),
            Vec::new(),
        );
        TermSearcher::new(Arc::new(store))
    }

    #[test]
    fn test_empty_query_returns_empty() {
        let searcher = make_searcher();
        assert!(searcher.search("", 10).is_empty());
        assert!(searcher.search("   ", 10).is_empty());
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let searcher = make_searcher();
        // "APT" fuzzily resembles "APT Group" too, but an exact name hit
        // must return that single term only.
        let results = searcher.search("APT", 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "apt");
    }

    #[test]
    fn test_fuzzy_match_with_typo() {
        let searcher = make_searcher();
        let results = searcher.search("ransomwar", 10);
        assert!(!results.is_empty());
        assert_eq!(results[0].id, "ransomware");
    }

    #[test]
    fn test_word_reordering_tolerated() {
        let searcher = make_searcher();
        let results = searcher.search("persistent threat advanced", 10);
        assert!(results.iter().any(|t| t.id == "apt"));
    }

    #[test]
    fn test_nonsense_query_returns_nothing() {
        let searcher = make_searcher();
        let results = searcher.search("xyz_does_not_exist_at_all", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_deduplicates_by_term_id() {
        // "Advanced Persistent Threat" and "進階持續性威脅" both belong to
        // "apt"; a query near both must yield the term once.
        let searcher = make_searcher();
        let results = searcher.search("advanced persistent", 10);
        let apt_count = results.iter().filter(|t| t.id == "apt").count();
        assert!(apt_count <= 1);
    }

    #[test]
    fn test_limit_respected() {
        let searcher = make_searcher();
        let results = searcher.search("apt grou", 1);
        assert!(results.len() <= 1);
    }

    #[test]
    fn test_weighted_ratio_ranges() {
        assert_eq!(weighted_ratio("", "anything"), 0.0);
        assert_eq!(weighted_ratio("same", "same"), 100.0);
        assert!(weighted_ratio("advanced persistent threat", "persistent threat advanced") > 90.0);
        assert!(weighted_ratio("apt", "xss") < SCORE_CUTOFF);
    }
}
