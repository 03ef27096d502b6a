use super::{load_detector, print_json, OutputFormat};
use anyhow::{Context, Result};
use chrono::Local;
use curate::{
    config::Config,
    dedup::{generate_report, BatchSummary, DuplicateCheckResult},
    ResourceRecord,
};
use std::path::PathBuf;
use tracing::info;

/// How many similar names `check-name` lists
const NAME_LISTING_LIMIT: usize = 5;

pub fn check_pending(
    config: Config,
    report: bool,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let (store, detector) = load_detector(&config)?;
    info!("Checking {} pending resources", store.pending.len());

    let results = detector.check_batch(&store.pending);

    match format {
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Text => print_batch(&results),
    }

    if report {
        let rendered = generate_report(&results, Local::now());
        match output {
            Some(path) => {
                std::fs::write(&path, rendered)
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                println!("\nReport saved: {}", path.display());
            }
            None => println!("\n{}", rendered),
        }
    }

    Ok(())
}

pub fn check_candidate(
    config: Config,
    url: Option<String>,
    name: Option<String>,
    description: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let (_, detector) = load_detector(&config)?;

    let candidate = ResourceRecord::new(name.unwrap_or_default(), url.unwrap_or_default())
        .with_description(description.unwrap_or_default());
    let result = detector.check(&candidate);

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => print_result(&result),
    }
    Ok(())
}

pub fn check_url(config: Config, url: String, format: OutputFormat) -> Result<()> {
    let (_, detector) = load_detector(&config)?;
    let index = detector.index();

    let by_url = index.lookup_url(&url);
    let by_repo = index.lookup_repo(&url);

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "url": url,
            "url_match": by_url.map(|e| &e.record),
            "repository_match": by_repo.map(|e| &e.record),
        }));
    }

    println!("Checking URL: {}", url);
    match by_url {
        Some(entry) => println!(
            "  Duplicate: {} ({}, {})",
            entry.record.display_name, entry.record.id, entry.origin
        ),
        None => println!("  No URL duplicate"),
    }
    if let Some(entry) = by_repo {
        println!(
            "  Same repository: {} ({}, {})",
            entry.record.display_name, entry.record.id, entry.origin
        );
    }
    Ok(())
}

pub fn check_name(config: Config, name: String, format: OutputFormat) -> Result<()> {
    let (_, detector) = load_detector(&config)?;
    let similar = detector.similar_names(&name);

    if format == OutputFormat::Json {
        let listed: Vec<serde_json::Value> = similar
            .iter()
            .take(NAME_LISTING_LIMIT)
            .map(|(entry, score)| {
                serde_json::json!({
                    "name": entry.record.display_name,
                    "id": entry.record.id,
                    "origin": entry.origin,
                    "score": score,
                })
            })
            .collect();
        return print_json(&listed);
    }

    println!("Checking name: {}", name);
    if similar.is_empty() {
        println!("  No similar resources");
        return Ok(());
    }
    println!("  Similar resources:");
    for (entry, score) in similar.iter().take(NAME_LISTING_LIMIT) {
        println!(
            "  - {} (similarity: {:.2}, {})",
            entry.record.display_name, score, entry.origin
        );
    }
    Ok(())
}

fn print_batch(results: &[DuplicateCheckResult]) {
    let summary = BatchSummary::from_results(results);

    println!("\nDuplicate Check");
    println!("===============");
    println!("Checked:      {}", summary.checked);
    println!("Duplicates:   {}", summary.duplicates);
    println!("Passed:       {}", summary.passed);
    println!("Needs review: {}", summary.advisory);

    let duplicates: Vec<&DuplicateCheckResult> = results.iter().filter(|r| r.is_duplicate).collect();
    if !duplicates.is_empty() {
        println!("\nDuplicates:");
        for r in duplicates {
            println!(
                "  - {} ({})",
                r.resource_name,
                r.duplicate_type.map(|t| t.as_str()).unwrap_or("unknown")
            );
            println!("    matches: {}", r.matched_name().unwrap_or("Unknown"));
        }
    }

    let advisory: Vec<&DuplicateCheckResult> = results.iter().filter(|r| r.is_advisory()).collect();
    if !advisory.is_empty() {
        println!("\nNear matches:");
        for r in advisory {
            println!("  - {}", r.resource_name);
            for (check, m) in r.advisory_matches() {
                println!("    {} ({}: {:.2})", m.name, check, m.score);
            }
        }
    }
}

fn print_result(result: &DuplicateCheckResult) {
    if result.is_duplicate {
        println!(
            "Duplicate ({}) of {} [similarity {:.2}]",
            result.duplicate_type.map(|t| t.as_str()).unwrap_or("unknown"),
            result.matched_name().unwrap_or("Unknown"),
            result.similarity_score
        );
        return;
    }

    if result.is_advisory() {
        println!("No duplicate, but similar resources exist:");
        for (check, m) in result.advisory_matches() {
            println!("  - {} ({}: {:.2})", m.name, check, m.score);
        }
    } else {
        println!("No duplicate found");
    }
}
