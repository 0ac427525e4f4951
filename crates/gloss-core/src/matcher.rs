//! Term matching over free text.
//!
//! `TermMatcher` scans text against the pattern index and produces a
//! non-overlapping, position-sorted list of term occurrences. It is
//! effectively a greedy longest-match-first interval scheduler: patterns
//! are scanned in the index's longest-first order, and a candidate span is
//! rejected if it intersects any span already accepted by an earlier
//! pattern. When two terms' surface forms overlap in the source text, the
//! longer one therefore always wins regardless of output order.
//!
//! The matcher also powers link insertion and highlighting. Positional
//! rewrites are spliced in descending start order (right-to-left), because
//! an earlier replacement changes the string length and would invalidate
//! every offset to its right if applied left-to-right.

use crate::index::{fold_char, PatternIndex};
use crate::store::TermStore;
use crate::types::TermMatch;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Output format for [`TermMatcher::annotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFormat {
    /// `[text](url "tooltip")`
    Markdown,

    /// `<a href="url" class="term-link" title="tooltip">text</a>`
    Html,
}

impl std::str::FromStr for LinkFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(LinkFormat::Markdown),
            "html" => Ok(LinkFormat::Html),
            _ => Err(format!("unknown link format: {}", s)),
        }
    }
}

/// Scans text for known terms and rewrites matched spans.
pub struct TermMatcher {
    store: Arc<TermStore>,
    index: PatternIndex,
    marker: Regex,
}

impl TermMatcher {
    /// Build a matcher (and its pattern index) over a store.
    pub fn new(store: Arc<TermStore>) -> Self {
        let index = PatternIndex::build(&store);
        TermMatcher {
            store,
            index,
            // [[term_id]] markers emitted by drafting tools
            marker: Regex::new(r"\[\[([a-z_]+)\]\]").expect("marker pattern is valid"),
        }
    }

    /// The pattern index backing this matcher.
    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    /// Find every term occurrence in `text`.
    ///
    /// Returns matches with pairwise-disjoint `[start, end)` char spans,
    /// sorted by ascending start offset. Exact lexical matches always
    /// carry confidence 1.0.
    pub fn find_all(&self, text: &str) -> Vec<TermMatch> {
        let chars: Vec<char> = text.chars().collect();
        let folded: Vec<char> = chars.iter().copied().map(fold_char).collect();

        let mut matches: Vec<TermMatch> = Vec::new();
        let mut accepted: Vec<(usize, usize)> = Vec::new();

        for entry in self.index.entries() {
            for (start, end) in entry.occurrences(&folded) {
                let overlaps = accepted
                    .iter()
                    .any(|&(s, e)| !(end <= s || start >= e));
                if overlaps {
                    continue;
                }

                let Some(term) = self.store.lookup(&entry.term_id) else {
                    continue;
                };

                matches.push(TermMatch {
                    term_id: entry.term_id.clone(),
                    term,
                    matched_text: chars[start..end].iter().collect(),
                    start,
                    end,
                    confidence: 1.0,
                });
                accepted.push((start, end));
            }
        }

        matches.sort_by_key(|m| m.start);
        debug!(matches = matches.len(), "Text scan complete");
        matches
    }

    /// Rewrite `text` so that every matched term becomes a link to
    /// `{base_url}/glossary/{term_id}`, with the term's brief definition
    /// as the tooltip.
    ///
    /// When no terms are found the input is returned verbatim.
    pub fn annotate(&self, text: &str, format: LinkFormat, base_url: &str) -> String {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return text.to_string();
        }

        self.splice(text, &matches, |m| match format {
            LinkFormat::Markdown => format!(
                "[{}]({}/glossary/{} \"{}\")",
                m.matched_text, base_url, m.term_id, m.term.definitions.brief
            ),
            LinkFormat::Html => format!(
                "<a href=\"{}/glossary/{}\" class=\"term-link\" title=\"{}\">{}</a>",
                base_url, m.term_id, m.term.definitions.brief, m.matched_text
            ),
        })
    }

    /// Wrap every matched term span in `<tag>…</tag>`.
    pub fn highlight(&self, text: &str, tag: &str) -> String {
        let matches = self.find_all(text);
        if matches.is_empty() {
            return text.to_string();
        }

        self.splice(text, &matches, |m| {
            format!("<{}>{}</{}>", tag, m.matched_text, tag)
        })
    }

    /// Replace each matched span with `render(match)`, right-to-left so
    /// earlier offsets stay valid while later spans are rewritten.
    fn splice<F>(&self, text: &str, matches: &[TermMatch], render: F) -> String
    where
        F: Fn(&TermMatch) -> String,
    {
        let mut out: Vec<char> = text.chars().collect();
        for m in matches.iter().rev() {
            let replacement: Vec<char> = render(m).chars().collect();
            out.splice(m.start..m.end, replacement);
        }
        out.into_iter().collect()
    }

    /// Rewrite `[[term_id]]` markers into Markdown links.
    ///
    /// Drafting tools emit markers instead of literal links so that link
    /// targets stay under glossary control. Markers naming an unknown
    /// term are left verbatim.
    pub fn process_markers(&self, text: &str) -> String {
        self.marker
            .replace_all(text, |caps: &regex::Captures<'_>| {
                let term_id = &caps[1];
                match self.store.lookup(term_id) {
                    Some(term) => format!(
                        "[{}](/glossary/{} \"{}\")",
                        term.term_en, term_id, term.definitions.brief
                    ),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

impl std::fmt::Debug for TermMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermMatcher")
            .field("patterns", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Aliases, Definitions, Term};

    fn make_term(id: &str, en: &str, zh: &str, aliases_en: Vec<&str>) -> Term {
        Term {
            id: id.to_string(),
            term_en: en.to_string(),
            term_zh: zh.to_string(),
            full_name_en: None,
            full_name_zh: None,
            definitions: Definitions::brief(format!("{} 的定義", en)),
            category: "attack".to_string(),
            subcategory: None,
            tags: Vec::new(),
            related_terms: Vec::new(),
            see_also: Vec::new(),
            aliases: Aliases {
                en: aliases_en.into_iter().map(String::from).collect(),
                zh: Vec::new(),
            },
            usage: Default::default(),
            references: Default::default(),
            metadata: Default::default(),
        }
    }

    fn make_matcher(terms: Vec<Term>) -> TermMatcher {
        TermMatcher::new(Arc::new(TermStore::from_parts(terms, Vec::new(), Vec::new())))
    }

    fn default_matcher() -> TermMatcher {
        make_matcher(vec![
            make_term(
                "apt",
                "APT",
                "進階持續性威脅",
                vec!["Advanced Persistent Threat"],
            ),
            make_term("ransomware", "Ransomware", "勒索軟體", vec![]),
            make_term("xss", "XSS", "跨站腳本攻擊", vec![]),
        ])
    }

    #[test]
    fn test_find_all_basic() {
        let matcher = default_matcher();
        let matches = matcher.find_all("APT 組織發動攻擊");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term_id, "apt");
        assert_eq!(matches[0].matched_text, "APT");
        assert_eq!(matches[0].start, 0);
        assert_eq!(matches[0].end, 3);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn test_find_all_sorted_and_disjoint() {
        let matcher = default_matcher();
        let text = "勒索軟體與跨站腳本攻擊都是威脅，APT 也是";
        let matches = matcher.find_all(text);

        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end <= pair[1].start, "spans must be disjoint");
        }
    }

    #[test]
    fn test_longer_term_wins_over_embedded_shorter() {
        // "SQL" is a whole-token substring of "SQL Injection" at the same
        // location; the longer pattern is scanned first and the shorter
        // candidate is rejected by the overlap check.
        let matcher = make_matcher(vec![
            make_term("sql", "SQL", "結構化查詢語言", vec![]),
            make_term("sql_injection", "SQL Injection", "SQL注入", vec![]),
        ]);
        let matches = matcher.find_all("SQL Injection 威脅");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "SQL Injection");
        assert_eq!(matches[0].term_id, "sql_injection");
    }

    #[test]
    fn test_equal_length_tie_goes_to_earlier_loaded_term() {
        // Two different terms claim overlapping names of equal length.
        // The pattern order is stable on store load order, so the
        // earlier-loaded term wins the overlapping span.
        let matcher = make_matcher(vec![
            make_term("alpha", "AB", "甲乙", vec![]),
            make_term("beta", "BC", "乙丙", vec![]),
        ]);

        let matches = matcher.find_all("甲乙丙");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term_id, "alpha");
        assert_eq!(matches[0].matched_text, "甲乙");
    }

    #[test]
    fn test_find_all_empty_and_term_free_input() {
        let matcher = default_matcher();
        assert!(matcher.find_all("").is_empty());
        assert!(matcher.find_all("平安無事的一天").is_empty());
    }

    #[test]
    fn test_annotate_markdown() {
        let matcher = default_matcher();
        let out = matcher.annotate("APT 攻擊", LinkFormat::Markdown, "https://example.tw");
        assert_eq!(
            out,
            "[APT](https://example.tw/glossary/apt \"APT 的定義\") 攻擊"
        );
    }

    #[test]
    fn test_annotate_html() {
        let matcher = default_matcher();
        let out = matcher.annotate("APT 攻擊", LinkFormat::Html, "");
        assert_eq!(
            out,
            "<a href=\"/glossary/apt\" class=\"term-link\" title=\"APT 的定義\">APT</a> 攻擊"
        );
    }

    #[test]
    fn test_annotate_no_matches_returns_input_verbatim() {
        let matcher = default_matcher();
        let text = "平安無事的一天";
        assert_eq!(matcher.annotate(text, LinkFormat::Markdown, ""), text);
    }

    #[test]
    fn test_annotate_preserves_matched_text_across_multiple_splices() {
        let matcher = default_matcher();
        // Three matches at varying distances, including CJK-adjacent ones.
        let text = "APT 利用勒索軟體與跨站腳本攻擊";
        let matches = matcher.find_all(text);
        assert_eq!(matches.len(), 3);

        let out = matcher.annotate(text, LinkFormat::Markdown, "");
        for m in &matches {
            // Every inserted link's visible text equals the original span.
            assert!(out.contains(&format!("[{}](/glossary/{}", m.matched_text, m.term_id)));
        }
    }

    #[test]
    fn test_annotate_adjacent_matches() {
        let matcher = make_matcher(vec![
            make_term("alpha", "甲乙", "甲乙", vec![]),
            make_term("beta", "丙丁", "丙丁", vec![]),
        ]);
        let out = matcher.annotate("甲乙丙丁", LinkFormat::Markdown, "");
        assert!(out.starts_with("[甲乙](/glossary/alpha"));
        assert!(out.contains("[丙丁](/glossary/beta"));
    }

    #[test]
    fn test_highlight() {
        let matcher = default_matcher();
        let out = matcher.highlight("APT 攻擊", "mark");
        assert_eq!(out, "<mark>APT</mark> 攻擊");
    }

    #[test]
    fn test_process_markers() {
        let matcher = default_matcher();
        let out = matcher.process_markers("遭遇 [[apt]] 與 [[unknown_term]] 攻擊");
        assert!(out.contains("[APT](/glossary/apt \"APT 的定義\")"));
        // Unknown ids stay verbatim
        assert!(out.contains("[[unknown_term]]"));
    }
}
