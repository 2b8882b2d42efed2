use chrono::{DateTime, Utc};

use retail_catalog::Customer;
use retail_store::app_config::RankingConfig;

use crate::pipeline::PurchaseAggregate;
use crate::rules::{get_default_rules, RecommendationEngine};
use crate::scoring::{loyalty_score, CustomerFeatures};

/// Scores aggregates, attaches a recommended offer, and returns the ranked
/// customer list: highest score first, capped at the configured maximum.
pub struct LoyaltyRanker {
    config: RankingConfig,
    rules: RecommendationEngine,
}

impl LoyaltyRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            config,
            rules: RecommendationEngine::new(get_default_rules()),
        }
    }

    pub fn rank(&self, aggregates: Vec<PurchaseAggregate>, as_of: DateTime<Utc>) -> Vec<Customer> {
        let mut customers: Vec<Customer> = aggregates
            .iter()
            .map(|aggregate| {
                let features = CustomerFeatures::extract(aggregate, as_of);
                let score = loyalty_score(&features, &self.config);
                let offer = self.rules.recommend(&features, score);

                Customer {
                    id: aggregate.customer_id.clone(),
                    name: aggregate.name.clone(),
                    email: aggregate.email.clone(),
                    loyalty_score: Some(score),
                    top_purchased_product: Some(features.top_product),
                    recommended_offer: Some(offer),
                    total_purchases: Some(aggregate.purchase_count),
                    average_order_value: Some(round_cents(aggregate.average_order_value())),
                }
            })
            .collect();

        // Stable sort: ties keep aggregation (first-seen) order.
        customers.sort_by(|a, b| b.loyalty_score.cmp(&a.loyalty_score));
        customers.truncate(self.config.max_customers);
        customers
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
