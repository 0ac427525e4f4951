//! Core data types for Gloss.
//!
//! This module defines the fundamental data structures used throughout the
//! term store, matcher, and validator. These types are designed to be:
//!
//! - **Serializable**: Records are loaded from YAML glossary files
//! - **Immutable after load**: No component mutates a loaded record in place
//! - **Multilingual**: Every term carries English and localized names

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lifecycle status of a glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TermStatus {
    /// Reviewed and accepted into the glossary
    #[default]
    Approved,

    /// Submitted but not yet reviewed
    Pending,

    /// Superseded; kept for lookup but discouraged
    Deprecated,
}

impl fmt::Display for TermStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermStatus::Approved => write!(f, "approved"),
            TermStatus::Pending => write!(f, "pending"),
            TermStatus::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Three precision tiers of a term definition.
///
/// `brief` is bounded and always present (used for tooltips); `standard`
/// and `detailed` are optional longer forms for sidebars and term pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definitions {
    /// Short definition suitable for a tooltip
    pub brief: String,

    /// Medium-length definition
    #[serde(default)]
    pub standard: Option<String>,

    /// Unbounded definition for dedicated term pages
    #[serde(default)]
    pub detailed: Option<String>,
}

impl Definitions {
    /// Create definitions with only the brief tier filled in.
    pub fn brief(text: impl Into<String>) -> Self {
        Definitions {
            brief: text.into(),
            standard: None,
            detailed: None,
        }
    }
}

/// Alternate names for a term, per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Aliases {
    /// English aliases
    pub en: Vec<String>,

    /// Localized aliases
    pub zh: Vec<String>,
}

/// Usage guidance attached to a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Whether this term is the preferred wording
    pub preferred: bool,

    /// Free-text note on when to use the term
    pub context: Option<String>,

    /// Example sentences
    pub examples: Vec<String>,

    /// Phrases that should be avoided in favor of this term
    pub avoid: Vec<String>,
}

impl Default for Usage {
    fn default() -> Self {
        Usage {
            preferred: true,
            context: None,
            examples: Vec::new(),
            avoid: Vec::new(),
        }
    }
}

/// Links into external standard taxonomies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct References {
    pub mitre_attack: Option<String>,
    pub nist: Option<String>,
    pub cwe: Option<String>,
    pub owasp: Option<String>,
    pub wikipedia: Option<String>,

    /// Additional references keyed by taxonomy name
    pub other: HashMap<String, String>,
}

/// Lifecycle metadata for a term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Review status
    pub status: TermStatus,

    /// Date the term was created
    pub created: Option<NaiveDate>,

    /// Date of the last update
    pub updated: Option<NaiveDate>,

    /// Source attribution
    pub source: Option<String>,

    /// People who contributed to the entry
    pub contributors: Vec<String>,
}

/// A single glossary entry with multilingual names and metadata.
///
/// The `id` is unique across the whole store. The union of `term_en`,
/// `term_zh`, the full-form names, and all aliases forms the term's
/// **name surface**: the deduplicated set of strings that should resolve
/// back to this term during matching and lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Unique identifier, lowercase with underscores (e.g., "apt")
    pub id: String,

    /// Primary English name
    pub term_en: String,

    /// Primary localized name
    pub term_zh: String,

    /// Full-form English name (e.g., "Advanced Persistent Threat")
    #[serde(default)]
    pub full_name_en: Option<String>,

    /// Full-form localized name
    #[serde(default)]
    pub full_name_zh: Option<String>,

    /// Definition tiers
    pub definitions: Definitions,

    /// Primary category id (references a known `Category`)
    pub category: String,

    /// Optional subcategory id
    #[serde(default)]
    pub subcategory: Option<String>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Related term ids (dangling references are tolerated)
    #[serde(default)]
    pub related_terms: Vec<String>,

    /// See-also term ids (dangling references are tolerated)
    #[serde(default)]
    pub see_also: Vec<String>,

    /// Alternate names
    #[serde(default)]
    pub aliases: Aliases,

    /// Usage guidance
    #[serde(default)]
    pub usage: Usage,

    /// External taxonomy links
    #[serde(default)]
    pub references: References,

    /// Lifecycle metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Term {
    /// All strings that should resolve to this term, deduplicated while
    /// preserving first-occurrence order.
    ///
    /// The same literal string must not produce two index entries for one
    /// term, so duplicates across the primary names, full names, and
    /// aliases are dropped here.
    pub fn name_surface(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let candidates = [self.term_en.as_str(), self.term_zh.as_str()]
            .into_iter()
            .chain(self.full_name_en.as_deref())
            .chain(self.full_name_zh.as_deref())
            .chain(self.aliases.en.iter().map(String::as_str))
            .chain(self.aliases.zh.iter().map(String::as_str));
        for name in candidates {
            if seen.insert(name) {
                out.push(name);
            }
        }
        out
    }
}

/// A grouping of terms, referenced by `Term::category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique category id
    pub id: String,

    /// English display name
    pub name_en: String,

    /// Localized display name
    pub name_zh: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Subcategory ids
    #[serde(default)]
    pub subcategories: Vec<String>,

    /// Icon reference
    #[serde(default)]
    pub icon: Option<String>,
}

/// A discouraged wording mapped to a preferred replacement.
///
/// Style rules feed the validator independently of any specific term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleRule {
    /// The phrase to avoid (required, non-empty)
    pub avoid: String,

    /// The replacement phrase
    pub preferred: String,

    /// Optional rationale
    #[serde(default)]
    pub reason: Option<String>,
}

/// One occurrence of a known term inside scanned text.
///
/// Offsets are **character** offsets into the scanned text, half-open
/// `[start, end)`. Exact lexical matches always carry confidence 1.0.
#[derive(Debug, Clone)]
pub struct TermMatch {
    /// Id of the matched term
    pub term_id: String,

    /// The resolved term record
    pub term: Arc<Term>,

    /// The exact substring that matched
    pub matched_text: String,

    /// Start offset (inclusive, in chars)
    pub start: usize,

    /// End offset (exclusive, in chars)
    pub end: usize,

    /// Match confidence in `[0, 1]`
    pub confidence: f64,
}

/// Kind of problem reported by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A discouraged phrase was used
    ForbiddenTerm,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::ForbiddenTerm => write!(f, "forbidden_term"),
        }
    }
}

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A wording problem found in validated text.
///
/// `line` is 1-based; `column` is the 1-based **character** column of the
/// offending text within its line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based line number
    pub line: usize,

    /// 1-based character column
    pub column: Option<usize>,

    /// The offending text as it appeared
    pub text: String,

    /// Issue classification
    pub kind: IssueKind,

    /// Human-readable suggestion embedding the preferred replacement
    pub suggestion: String,

    /// Issue severity
    pub severity: Severity,
}
