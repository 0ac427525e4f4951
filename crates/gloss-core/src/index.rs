//! Pattern index for term scanning.
//!
//! The index derives, from every term's name surface, an ordered list of
//! matchable patterns. Ordering is the load-bearing invariant: entries are
//! sorted by descending name length (stable with respect to store load
//! order), so that during scanning longer, more specific terms are
//! attempted before shorter ones that might be embedded within them.
//!
//! ## Word boundaries
//!
//! Boundary detection is implemented explicitly over characters rather than
//! with a regex engine's `\b`, which is ASCII-biased and does not bound CJK
//! text reliably. The rule: a span edge whose pattern character is a
//! non-CJK alphanumeric (or `_`) must not adjoin a text character of the
//! same class; CJK characters are always boundary-safe and may adjoin a
//! match freely.

use crate::store::TermStore;
use tracing::debug;

/// One matchable pattern derived from a term name.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    /// The name as written in the glossary
    pub name: String,

    /// Case-folded characters used for scanning
    folded: Vec<char>,

    /// Id of the owning term
    pub term_id: String,
}

impl PatternEntry {
    /// Pattern length in characters.
    pub fn len(&self) -> usize {
        self.folded.len()
    }

    /// Whether the pattern is empty (never true for built indices).
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Find every non-overlapping occurrence of this pattern in `folded`
    /// (the case-folded text), returning `[start, end)` char spans.
    ///
    /// Scanning is left-to-right and advances past each hit, so two
    /// occurrences of the same pattern never overlap each other.
    pub fn occurrences(&self, folded: &[char]) -> Vec<(usize, usize)> {
        let n = self.folded.len();
        if n == 0 || folded.len() < n {
            return Vec::new();
        }

        let mut spans = Vec::new();
        let mut i = 0;
        while i + n <= folded.len() {
            if folded[i..i + n] == self.folded[..] && self.bounded(folded, i, i + n) {
                spans.push((i, i + n));
                i += n;
            } else {
                i += 1;
            }
        }
        spans
    }

    /// Check that the span `[start, end)` sits on word boundaries.
    fn bounded(&self, folded: &[char], start: usize, end: usize) -> bool {
        let first = self.folded[0];
        let last = self.folded[self.folded.len() - 1];

        if is_word_char(first) && start > 0 && is_word_char(folded[start - 1]) {
            return false;
        }
        if is_word_char(last) && end < folded.len() && is_word_char(folded[end]) {
            return false;
        }
        true
    }
}

/// The ordered set of matchable patterns derived from a term store.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    entries: Vec<PatternEntry>,
}

impl PatternIndex {
    /// Build the index from a store.
    ///
    /// Single-character names are excluded to avoid pathological
    /// over-matching. The resulting entries are sorted longest-first;
    /// equal-length entries keep the store's load order, so an
    /// equal-length overlap tie resolves to the earlier-loaded term.
    pub fn build(store: &TermStore) -> Self {
        let mut entries = Vec::new();

        for term in store.all() {
            for name in term.name_surface() {
                let folded: Vec<char> = name.chars().map(fold_char).collect();
                if folded.len() < 2 {
                    continue;
                }
                entries.push(PatternEntry {
                    name: name.to_string(),
                    folded,
                    term_id: term.id.clone(),
                });
            }
        }

        // Stable: ties keep load order
        entries.sort_by(|a, b| b.folded.len().cmp(&a.folded.len()));

        debug!(patterns = entries.len(), "Pattern index built");
        PatternIndex { entries }
    }

    /// Patterns in scan order (longest first).
    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    /// Number of patterns in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lowercase one character without changing the character count.
///
/// Some case folds expand to multiple characters (e.g., 'İ'); those keep
/// the original character so that char offsets into folded text always
/// line up with the source text. CJK characters are untouched by folding.
pub(crate) fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Case-fold a whole string, one stable char at a time.
pub(crate) fn fold(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Whether a character belongs to a CJK script.
///
/// CJK characters carry word meaning individually and are treated as
/// always boundary-safe: any CJK character may adjoin a match.
pub(crate) fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF       // Hiragana, Katakana
        | 0x31F0..=0x31FF     // Katakana phonetic extensions
        | 0x3400..=0x4DBF     // CJK Unified Ideographs Extension A
        | 0x4E00..=0x9FFF     // CJK Unified Ideographs
        | 0xAC00..=0xD7AF     // Hangul syllables
        | 0xF900..=0xFAFF     // CJK Compatibility Ideographs
        | 0x20000..=0x2FA1F   // Extensions B..F, supplement
    )
}

/// Whether a character continues a Latin/digit word run.
///
/// A match edge falling on one of these characters must not adjoin
/// another one, or the match would be a fragment of a larger word.
pub(crate) fn is_word_char(c: char) -> bool {
    c == '_' || (c.is_alphanumeric() && !is_cjk(c))
}
