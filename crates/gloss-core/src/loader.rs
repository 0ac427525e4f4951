//! YAML glossary loading.
//!
//! This is the only module in the core that touches the file system; the
//! rest of the engine takes in-memory structures. Loading is best-effort:
//! glossary term files are community-contributed, so a file that fails to
//! parse — or a single malformed record inside an otherwise valid file —
//! is logged and skipped rather than taking down the whole glossary.
//!
//! Layout:
//! - `terms_dir/*.yaml` — each file holds a top-level list of terms, or a
//!   mapping with a `terms:` list
//! - `meta_dir/categories.yaml` — `categories:` list (optional)
//! - `meta_dir/style_guide.yaml` — `forbidden_terms:` list of
//!   `{term, preferred, reason}` entries (optional)

use crate::error::{GlossError, Result};
use crate::store::TermStore;
use crate::types::{Category, StyleRule, Term};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load a term store from glossary source directories.
///
/// Missing directories and malformed files are not fatal; the store is
/// built from whatever loaded successfully.
pub fn load_glossary(terms_dir: &Path, meta_dir: &Path) -> Result<TermStore> {
    let terms = load_terms(terms_dir)?;
    let categories = load_categories(meta_dir);
    let style_rules = load_style_rules(meta_dir);

    info!(
        terms = terms.len(),
        categories = categories.len(),
        style_rules = style_rules.len(),
        "Glossary loaded"
    );

    Ok(TermStore::from_parts(terms, categories, style_rules))
}

fn load_terms(dir: &Path) -> Result<Vec<Term>> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "Terms directory not found, starting empty");
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    // Deterministic load order regardless of directory enumeration order
    paths.sort();

    let mut terms = Vec::new();
    for path in paths {
        match parse_term_file(&path) {
            Ok(mut file_terms) => terms.append(&mut file_terms),
            Err(e) => warn!(error = %e, "Skipping unreadable term file"),
        }
    }

    Ok(terms)
}

/// Either a bare list of terms or a mapping with a `terms:` key.
#[derive(Deserialize)]
#[serde(untagged)]
enum TermFile {
    Wrapped { terms: Vec<serde_yaml::Value> },
    Bare(Vec<serde_yaml::Value>),
}

/// Strictly parse one term file.
///
/// The file must be valid YAML of the expected shape; individual records
/// inside it that fail schema validation are skipped with a warning, so
/// one broken community entry does not drop its siblings.
pub fn parse_term_file(path: &Path) -> Result<Vec<Term>> {
    let contents = fs::read_to_string(path)?;
    let file: TermFile = serde_yaml::from_str(&contents)
        .map_err(|e| GlossError::parse(path, e.to_string()))?;

    let raw = match file {
        TermFile::Wrapped { terms } => terms,
        TermFile::Bare(terms) => terms,
    };

    let mut terms = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_yaml::from_value::<Term>(value) {
            Ok(term) => terms.push(term),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping malformed term record");
            }
        }
    }
    Ok(terms)
}

#[derive(Deserialize)]
struct CategoriesFile {
    #[serde(default)]
    categories: Vec<serde_yaml::Value>,
}

fn load_categories(meta_dir: &Path) -> Vec<Category> {
    let path = meta_dir.join("categories.yaml");
    let Ok(contents) = fs::read_to_string(&path) else {
        return Vec::new();
    };

    let file: CategoriesFile = match serde_yaml::from_str(&contents) {
        Ok(file) => file,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unparseable categories file");
            return Vec::new();
        }
    };

    file.categories
        .into_iter()
        .filter_map(|value| match serde_yaml::from_value::<Category>(value) {
            Ok(category) => Some(category),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping malformed category");
                None
            }
        })
        .collect()
}

/// Style-guide entries use `term:` for the discouraged phrase.
#[derive(Deserialize)]
struct RawStyleRule {
    #[serde(alias = "avoid")]
    term: String,
    #[serde(default)]
    preferred: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
struct StyleGuideFile {
    #[serde(default)]
    forbidden_terms: Vec<serde_yaml::Value>,
}

fn load_style_rules(meta_dir: &Path) -> Vec<StyleRule> {
    let path = meta_dir.join("style_guide.yaml");
    let Ok(contents) = fs::read_to_string(&path) else {
        return Vec::new();
    };

    let file: StyleGuideFile = match serde_yaml::from_str(&contents) {
        Ok(file) => file,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unparseable style guide");
            return Vec::new();
        }
    };

    file.forbidden_terms
        .into_iter()
        .filter_map(|value| match serde_yaml::from_value::<RawStyleRule>(value) {
            Ok(raw) if !raw.term.is_empty() => Some(StyleRule {
                avoid: raw.term,
                preferred: raw.preferred,
                reason: raw.reason,
            }),
            Ok(_) => None,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping malformed style rule");
                None
            }
        })
        .collect()
}
