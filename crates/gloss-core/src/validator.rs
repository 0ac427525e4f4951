//! Terminology validation and auto-fixing.
//!
//! The validator scans text line-by-line against forbidden-phrase rules
//! drawn from two sources: the style guide's explicit rules, and every
//! term's own `usage.avoid` list. Style rules are registered first, then
//! the per-term phrases in store load order, and rules are applied in that
//! construction order.
//!
//! Multiple rules may flag overlapping or identical spans on the same
//! line. No deduplication is performed: different rules can have
//! different rationales for flagging the same text, so every hit is
//! reported.

use crate::index::fold_char;
use crate::store::TermStore;
use crate::types::{IssueKind, Severity, ValidationIssue};
use std::sync::Arc;
use tracing::debug;

/// A validation issue paired with the surrounding lines of text.
#[derive(Debug, Clone)]
pub struct IssueWithContext {
    /// The underlying issue
    pub issue: ValidationIssue,

    /// The offending line with its neighbors, the offender marked
    pub context: String,
}

/// One forbidden-phrase rule.
#[derive(Debug, Clone)]
struct ForbiddenRule {
    /// The phrase as written in the rule source
    avoid: String,

    /// Case-folded phrase chars used for scanning
    folded: Vec<char>,

    /// The wording recommended instead
    preferred: String,
}

/// Checks text against forbidden-phrase rules and applies fixes.
pub struct TermValidator {
    rules: Vec<ForbiddenRule>,
}

impl TermValidator {
    /// Build the rule set from a store: style rules first, then each
    /// term's avoid-list phrases suggesting that term's own names.
    pub fn new(store: Arc<TermStore>) -> Self {
        let mut rules = Vec::new();

        for rule in store.style_rules() {
            if rule.avoid.is_empty() {
                continue;
            }
            rules.push(ForbiddenRule {
                avoid: rule.avoid.clone(),
                folded: rule.avoid.chars().map(fold_char).collect(),
                preferred: rule.preferred.clone(),
            });
        }

        for term in store.all() {
            for avoid in &term.usage.avoid {
                if avoid.is_empty() {
                    continue;
                }
                rules.push(ForbiddenRule {
                    avoid: avoid.clone(),
                    folded: avoid.chars().map(fold_char).collect(),
                    preferred: format!("{} ({})", term.term_zh, term.term_en),
                });
            }
        }

        debug!(rules = rules.len(), "Validation rules built");
        TermValidator { rules }
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Scan `text` for forbidden phrases.
    ///
    /// Issues carry a 1-based line number and a 1-based character column,
    /// in rule construction order within each line.
    pub fn validate(&self, text: &str) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (line_idx, line) in text.split('\n').enumerate() {
            let chars: Vec<char> = line.chars().collect();
            let folded: Vec<char> = chars.iter().copied().map(fold_char).collect();

            for rule in &self.rules {
                for (start, end) in find_occurrences(&folded, &rule.folded) {
                    issues.push(ValidationIssue {
                        line: line_idx + 1,
                        column: Some(start + 1),
                        text: chars[start..end].iter().collect(),
                        kind: IssueKind::ForbiddenTerm,
                        suggestion: format!("建議改為「{}」", rule.preferred),
                        severity: Severity::Warning,
                    });
                }
            }
        }

        issues
    }

    /// Validate and pair each issue with `context_lines` lines of
    /// surrounding text, the offending line marked with `>>>`.
    pub fn validate_with_context(&self, text: &str, context_lines: usize) -> Vec<IssueWithContext> {
        let issues = self.validate(text);
        let lines: Vec<&str> = text.split('\n').collect();

        issues
            .into_iter()
            .map(|issue| {
                let start = issue.line.saturating_sub(context_lines + 1);
                let end = (issue.line + context_lines).min(lines.len());

                let context = (start..end)
                    .map(|i| {
                        let prefix = if i == issue.line - 1 { ">>> " } else { "    " };
                        format!("{}{}: {}", prefix, i + 1, lines[i])
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                IssueWithContext { issue, context }
            })
            .collect()
    }

    /// Replace every fixable forbidden phrase with its preferred wording.
    ///
    /// Issues are applied in descending `(line, column)` order so that
    /// within a line, replacement proceeds right-to-left and earlier
    /// columns stay valid. An issue whose suggestion cannot be parsed
    /// back into a literal replacement is skipped, never an error.
    ///
    /// Returns the corrected text and the issues that were fixed.
    pub fn fix(&self, text: &str) -> (String, Vec<ValidationIssue>) {
        let issues = self.validate(text);
        if issues.is_empty() {
            return (text.to_string(), Vec::new());
        }

        let mut sorted = issues;
        sorted.sort_by(|a, b| {
            (b.line, b.column.unwrap_or(0)).cmp(&(a.line, a.column.unwrap_or(0)))
        });

        let mut lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();
        let mut fixed = Vec::new();

        for issue in sorted {
            let Some(replacement) = extract_replacement(&issue.suggestion) else {
                continue;
            };
            let line_idx = issue.line - 1;
            let col = issue.column.unwrap_or(1) - 1;
            let span_len = issue.text.chars().count();

            let Some(line) = lines.get_mut(line_idx) else {
                continue;
            };
            if col + span_len > line.len() {
                continue;
            }

            line.splice(col..col + span_len, replacement.chars());
            fixed.push(issue);
        }

        let result = lines
            .into_iter()
            .map(|l| l.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        (result, fixed)
    }

    /// Produce a human-readable Markdown validation report.
    pub fn report(&self, text: &str) -> String {
        let issues = self.validate(text);

        if issues.is_empty() {
            return "✅ 未發現用詞問題".to_string();
        }

        let mut lines = vec![
            "## 用詞驗證報告".to_string(),
            String::new(),
            format!("發現 {} 個問題：", issues.len()),
            String::new(),
        ];

        for (i, issue) in issues.iter().enumerate() {
            lines.push(format!(
                "{}. 第 {} 行：「{}」{}",
                i + 1,
                issue.line,
                issue.text,
                issue.suggestion
            ));
        }

        lines.join("\n")
    }
}

impl std::fmt::Debug for TermValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermValidator")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Every non-overlapping occurrence of `needle` in `haystack` as
/// `[start, end)` char spans. Plain substring scan: forbidden phrases are
/// flagged even inside larger runs, unlike term matching.
fn find_occurrences(haystack: &[char], needle: &[char]) -> Vec<(usize, usize)> {
    let n = needle.len();
    if n == 0 || haystack.len() < n {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut i = 0;
    while i + n <= haystack.len() {
        if haystack[i..i + n] == needle[..] {
            spans.push((i, i + n));
            i += n;
        } else {
            i += 1;
        }
    }
    spans
}

/// Parse the literal replacement back out of a suggestion string.
///
/// The suggestion template is `建議改為「preferred」`; when the preferred
/// wording carries a parenthetical (a term suggestion names both the
/// localized and English forms), only the text before the parenthesis is
/// the literal replacement. Returns `None` for unexpected formats.
fn extract_replacement(suggestion: &str) -> Option<String> {
    let inner = suggestion
        .strip_prefix("建議改為「")?
        .strip_suffix("」")?;

    let literal = inner
        .split(['(', '（'])
        .next()
        .unwrap_or(inner)
        .trim();

    (!literal.is_empty()).then(|| literal.to_string())
}
