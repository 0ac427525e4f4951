//! Status command - show store statistics.

use crate::app::App;

/// Run the status command.
pub fn run(app: &App) -> anyhow::Result<()> {
    let store = app.glossary.store();

    println!("Gloss Store Status");
    println!("==================");
    println!();

    if store.is_empty() {
        println!("Store is empty. Point --terms-dir at a glossary terms directory.");
        return Ok(());
    }

    println!("Terms:            {}", store.len());
    println!("Categories:       {}", store.categories().len());
    println!("Style rules:      {}", store.style_rules().len());
    println!("Scan patterns:    {}", app.glossary.pattern_count());
    println!("Validation rules: {}", app.glossary.rule_count());

    if !store.categories().is_empty() {
        println!();
        println!("Terms per category:");
        for category in store.categories() {
            let count = store.terms_in_category(&category.id).len();
            println!("  {:<20} {} ({})", category.id, category.name_zh, count);
        }
    }

    Ok(())
}
