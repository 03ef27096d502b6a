use super::{load_detector, print_json, OutputFormat};
use anyhow::Result;
use curate::config::Config;
use std::collections::BTreeMap;

pub fn show_stats(config: Config, format: OutputFormat) -> Result<()> {
    let (store, detector) = load_detector(&config)?;
    let stats = detector.index().stats();

    let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &store.catalog {
        let category = if record.category.is_empty() {
            "(none)"
        } else {
            record.category.as_str()
        };
        *categories.entry(category).or_insert(0) += 1;
    }

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "catalog": store.catalog.len(),
            "pending": store.pending.len(),
            "rejected": store.rejected.len(),
            "index": stats,
            "categories": categories,
        }));
    }

    println!("\nCuration Statistics");
    println!("===================");
    println!("Root:     {}", config.store.root.display());
    println!("Catalog:  {}", store.catalog.len());
    println!("Pending:  {}", store.pending.len());
    println!("Rejected: {}", store.rejected.len());

    println!("\nIndex:");
    println!("  Records:         {}", stats.total_records);
    println!("  URL keys:        {}", stats.url_keys);
    println!("  Repository keys: {}", stats.repository_keys);
    println!("  Name buckets:    {}", stats.name_buckets);

    // duplicate links already in the reference data collapse into one key
    let collapsed = stats.total_records.saturating_sub(stats.url_keys);
    if collapsed > 0 {
        println!("  Records sharing or missing a URL key: {}", collapsed);
    }

    if !categories.is_empty() {
        println!("\nCatalog by category:");
        for (category, count) in categories {
            println!("  {:<24} {}", category, count);
        }
    }

    Ok(())
}
