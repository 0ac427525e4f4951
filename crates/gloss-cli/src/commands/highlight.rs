//! Highlight command - wrap matched terms in a markup tag.

use crate::app::{read_input, App};
use std::path::Path;

/// Run the highlight command.
pub fn run(app: &App, file: Option<&Path>, tag: &str) -> anyhow::Result<()> {
    let text = read_input(file)?;
    print!("{}", app.glossary.highlight(&text, tag));
    Ok(())
}
