use chrono::{DateTime, Utc};

use retail_store::app_config::RankingConfig;

use crate::pipeline::PurchaseAggregate;

/// Purchase count at which the frequency component saturates.
pub const FREQUENCY_SATURATION: f64 = 50.0;
/// Average order value at which the monetary component saturates.
pub const MONETARY_SATURATION: f64 = 250.0;
/// Days after which the recency component bottoms out at zero.
pub const RECENCY_HORIZON_DAYS: f64 = 90.0;

/// Signals extracted from a customer's purchase history.
pub struct CustomerFeatures {
    pub purchase_count: u32,
    pub average_order_value: f64,
    pub days_since_last_purchase: i64,
    pub top_product: String,
}

impl CustomerFeatures {
    pub fn extract(aggregate: &PurchaseAggregate, as_of: DateTime<Utc>) -> Self {
        let days_since_last_purchase = (as_of - aggregate.last_purchase_at).num_days().max(0);

        Self {
            purchase_count: aggregate.purchase_count,
            average_order_value: aggregate.average_order_value(),
            days_since_last_purchase,
            top_product: aggregate.top_product().to_string(),
        }
    }
}

/// Blend frequency, monetary value and recency into a 0-100 score.
///
/// Each component is normalized to [0, 1] against a fixed saturation point,
/// then weighted. Weights come from `[ranking]` configuration.
pub fn loyalty_score(features: &CustomerFeatures, config: &RankingConfig) -> u8 {
    let frequency = (features.purchase_count as f64 / FREQUENCY_SATURATION).min(1.0);
    let monetary = (features.average_order_value / MONETARY_SATURATION).min(1.0);
    let recency =
        (1.0 - features.days_since_last_purchase as f64 / RECENCY_HORIZON_DAYS).clamp(0.0, 1.0);

    let blended = frequency * config.frequency_weight
        + monetary * config.monetary_weight
        + recency * config.recency_weight;

    (blended * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(count: u32, avg: f64, days: i64) -> CustomerFeatures {
        CustomerFeatures {
            purchase_count: count,
            average_order_value: avg,
            days_since_last_purchase: days,
            top_product: "Premium Skincare Set".to_string(),
        }
    }

    #[test]
    fn saturated_components_score_at_the_cap() {
        let config = RankingConfig::default();
        // 50 purchases, 250 average, bought today: every component at 1.0.
        assert_eq!(loyalty_score(&features(50, 250.0, 0), &config), 100);
        // Saturation means going further changes nothing.
        assert_eq!(loyalty_score(&features(80, 900.0, 0), &config), 100);
    }

    #[test]
    fn recency_decays_linearly_to_zero() {
        let config = RankingConfig::default();
        // Frequency and monetary saturated; 18 idle days cost 0.2 of the
        // 25-point recency share: 40 + 35 + 20 = 95.
        assert_eq!(loyalty_score(&features(50, 250.0, 18), &config), 95);
        // Past the horizon the component is simply gone.
        assert_eq!(loyalty_score(&features(50, 250.0, 90), &config), 75);
        assert_eq!(loyalty_score(&features(50, 250.0, 365), &config), 75);
    }

    #[test]
    fn an_idle_low_spender_scores_near_zero() {
        let config = RankingConfig::default();
        let score = loyalty_score(&features(1, 5.0, 400), &config);
        assert!(score < 5, "got {}", score);
    }
}
