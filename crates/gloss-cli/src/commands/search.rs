//! Search command - fuzzy-search term names.

use crate::app::App;
use crate::OutputFormat;

/// Run the search command.
pub fn run(app: &App, query: &str, limit: usize, output: OutputFormat) -> anyhow::Result<()> {
    let results = app.glossary.search(query, limit);

    match output {
        OutputFormat::Text => {
            if results.is_empty() {
                eprintln!("No terms found for: {}", query);
                return Ok(());
            }
            for term in &results {
                println!(
                    "{:<20} {} ({}) — {}",
                    term.id, term.term_zh, term.term_en, term.definitions.brief
                );
            }
        }
        OutputFormat::Json => {
            let json_results: Vec<serde_json::Value> = results
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "term_en": t.term_en,
                        "term_zh": t.term_zh,
                        "brief": t.definitions.brief,
                        "category": t.category,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json_results)?);
        }
    }

    Ok(())
}
