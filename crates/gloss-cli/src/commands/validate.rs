//! Validate command - flag discouraged wording.

use crate::app::{read_input, App};
use std::path::Path;

/// Run the validate command.
///
/// Exits with status 1 when issues were found, so the command can gate
/// CI pipelines on terminology.
pub fn run(app: &App, file: Option<&Path>, report: bool) -> anyhow::Result<()> {
    let text = read_input(file)?;

    if report {
        println!("{}", app.glossary.report(&text));
        if !app.glossary.validate(&text).is_empty() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let issues = app.glossary.validate(&text);
    if issues.is_empty() {
        eprintln!("No issues found");
        return Ok(());
    }

    for issue in &issues {
        println!(
            "{}:{} [{}] {} → {}",
            issue.line,
            issue.column.unwrap_or(1),
            issue.severity,
            issue.text,
            issue.suggestion
        );
    }
    eprintln!();
    eprintln!("Found {} issues", issues.len());
    std::process::exit(1);
}
