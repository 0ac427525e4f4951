//! Application state management.

use gloss_core::{load_glossary, Glossary};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Shared application state.
pub struct App {
    /// The loaded glossary
    pub glossary: Arc<Glossary>,
}

impl App {
    /// Load the glossary and build the derived engines.
    pub fn new(terms_dir: &Path, meta_dir: &Path) -> anyhow::Result<Self> {
        let store = load_glossary(terms_dir, meta_dir)?;
        let glossary = Arc::new(Glossary::new(store));

        info!(
            terms_dir = %terms_dir.display(),
            terms = glossary.store().len(),
            "Application initialized"
        );

        Ok(App { glossary })
    }
}

/// Read the input text from a file, or from stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
