//! Relevance scoring and category inference for discovered candidates

mod category;
mod relevance;

pub use category::infer_category;
pub use relevance::{
    score_relevance, RelevanceAssessment, RelevanceFields, RelevanceLevel, RelevanceScorer,
};
