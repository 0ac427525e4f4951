//! Annotate command - link matched terms to their glossary pages.

use crate::app::{read_input, App};
use gloss_core::LinkFormat;
use std::path::Path;

/// Run the annotate command.
pub fn run(app: &App, file: Option<&Path>, format: LinkFormat, base_url: &str) -> anyhow::Result<()> {
    let text = read_input(file)?;
    print!("{}", app.glossary.annotate(&text, format, base_url));
    Ok(())
}
