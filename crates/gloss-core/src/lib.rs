//! # Gloss Core Library
//!
//! This crate provides the term store, matching, fuzzy search, and
//! terminology validation engine for the Gloss glossary tool. It is
//! designed to be testable with zero file-system or network access: the
//! store is built from in-memory collections, and the YAML loader is an
//! optional boundary module.
//!
//! ## Architecture
//!
//! - **Types** (`types`): Term records, categories, style rules, and
//!   derived match/issue results
//! - **Store** (`store`): Immutable-after-load term collection with
//!   id and name lookups
//! - **Index** (`index`): Longest-first pattern index with explicit
//!   Latin/CJK word-boundary handling
//! - **Matcher** (`matcher`): Non-overlapping term scanning, link
//!   insertion, and highlighting
//! - **Search** (`search`): Weighted-ratio fuzzy ranking over term names
//! - **Validator** (`validator`): Forbidden-phrase detection and auto-fix
//! - **Loader** (`loader`): Best-effort YAML glossary loading
//! - **Registry** (`registry`): Explicit, resettable process-wide handle
//!
//! ## Example
//!
//! ```rust
//! use gloss_core::{Glossary, TermStore};
//!
//! let glossary = Glossary::new(TermStore::from_parts(
//!     Vec::new(),
//!     Vec::new(),
//!     Vec::new(),
//! ));
//!
//! assert!(glossary.find_all("no known terms here").is_empty());
//! ```

pub mod error;
pub mod glossary;
pub mod index;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod search;
pub mod store;
pub mod types;
pub mod validator;

// Re-export commonly used types
pub use error::{GlossError, Result};
pub use glossary::Glossary;
pub use index::PatternIndex;
pub use loader::load_glossary;
pub use matcher::{LinkFormat, TermMatcher};
pub use search::TermSearcher;
pub use store::TermStore;
pub use types::{
    Category, IssueKind, Severity, StyleRule, Term, TermMatch, TermStatus, ValidationIssue,
};
pub use validator::{IssueWithContext, TermValidator};
