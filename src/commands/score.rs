use super::{print_json, OutputFormat};
use anyhow::Result;
use curate::{
    config::Config,
    scoring::{infer_category, RelevanceFields, RelevanceScorer},
};

pub fn score_candidate(
    config: Config,
    name: String,
    description: String,
    url: String,
    signal: i64,
    format: OutputFormat,
) -> Result<()> {
    let scorer = RelevanceScorer::new(config.relevance.clone());
    let assessment = scorer.assess(&RelevanceFields::new(&name, &description, &url), signal);
    let category = infer_category(&name, &description, &config.categories);

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "score": assessment.score,
            "level": assessment.level,
            "passes": scorer.passes(assessment.score),
            "category": category,
            "matched_keywords": assessment.matched_keywords,
            "repository_bonus": assessment.repository_bonus,
            "signal_bonus": assessment.signal_bonus,
        }));
    }

    println!("Relevance: {}/{} ({})", assessment.score, config.relevance.max_score, assessment.level);
    if assessment.matched_keywords.is_empty() {
        println!("Keywords:  none");
    } else {
        println!("Keywords:  {}", assessment.matched_keywords.join(", "));
    }
    println!("Repository bonus: {}", assessment.repository_bonus);
    println!("Signal bonus:     {}", assessment.signal_bonus);
    println!("Category:  {}", category);
    if !scorer.passes(assessment.score) {
        println!(
            "Below the ranking cut-off of {}",
            config.relevance.min_score
        );
    }
    Ok(())
}
