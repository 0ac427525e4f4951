//! Lookup command - show a term record by id.

use crate::app::App;
use crate::OutputFormat;

/// Run the lookup command.
pub fn run(app: &App, id: &str, output: OutputFormat) -> anyhow::Result<()> {
    let Some(term) = app.glossary.lookup(id) else {
        eprintln!("Term not found: {}", id);
        std::process::exit(1);
    };

    match output {
        OutputFormat::Text => {
            println!("{} — {} ({})", term.id, term.term_zh, term.term_en);
            if let Some(ref full) = term.full_name_en {
                println!("Full name: {}", full);
            }
            println!("Category:  {}", term.category);
            println!("Brief:     {}", term.definitions.brief);
            if let Some(ref standard) = term.definitions.standard {
                println!("Standard:  {}", standard);
            }
            if !term.aliases.en.is_empty() || !term.aliases.zh.is_empty() {
                let mut aliases: Vec<&str> =
                    term.aliases.en.iter().map(String::as_str).collect();
                aliases.extend(term.aliases.zh.iter().map(String::as_str));
                println!("Aliases:   {}", aliases.join(", "));
            }
            if !term.related_terms.is_empty() {
                println!("Related:   {}", term.related_terms.join(", "));
            }
            println!("Status:    {}", term.metadata.status);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(term.as_ref())?);
        }
    }

    Ok(())
}
