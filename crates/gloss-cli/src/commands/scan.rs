//! Scan command - list every term occurrence in a text.

use crate::app::{read_input, App};
use crate::OutputFormat;
use std::path::Path;

/// Run the scan command.
pub fn run(app: &App, file: Option<&Path>, output: OutputFormat) -> anyhow::Result<()> {
    let text = read_input(file)?;
    let matches = app.glossary.find_all(&text);

    match output {
        OutputFormat::Text => {
            for m in &matches {
                println!(
                    "[{}..{}] {} → {} ({})",
                    m.start, m.end, m.matched_text, m.term_id, m.term.term_zh
                );
            }
            eprintln!();
            eprintln!("Found {} term occurrences", matches.len());
        }
        OutputFormat::Json => {
            let json_matches: Vec<serde_json::Value> = matches
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "term_id": m.term_id,
                        "matched_text": m.matched_text,
                        "start": m.start,
                        "end": m.end,
                        "confidence": m.confidence,
                        "brief": m.term.definitions.brief,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_matches)?);
        }
    }

    Ok(())
}
