//! Fix command - auto-correct discouraged wording.

use crate::app::{read_input, App};
use std::path::Path;
use tracing::info;

/// Run the fix command.
pub fn run(app: &App, file: Option<&Path>, write: bool) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let (fixed, applied) = app.glossary.fix(&text);

    if write {
        let Some(path) = file else {
            anyhow::bail!("--write requires a file argument (stdin cannot be rewritten)");
        };
        std::fs::write(path, &fixed)?;
        info!(path = %path.display(), fixed = applied.len(), "Fixes written");
    } else {
        print!("{}", fixed);
    }

    eprintln!("Fixed {} issues", applied.len());
    Ok(())
}
