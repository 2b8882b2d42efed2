pub mod pipeline;
pub mod scoring;
pub mod ranker;
pub mod rules;

pub use pipeline::{LoyaltyPipeline, PipelineError, PurchaseAggregate};
pub use ranker::LoyaltyRanker;
pub use rules::RecommendationEngine;
