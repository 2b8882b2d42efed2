use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::CustomerFeatures;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub id: Uuid,
    pub name: String,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    pub priority: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleCondition {
    /// Top purchased product contains the keyword (case-insensitive).
    ProductKeyword(String),
    MinScore(u8),
    MinAverageOrderValue(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleAction {
    Recommend(String),
}

/// Picks the offer text attached to each ranked customer.
pub struct RecommendationEngine {
    rules: Vec<RecommendationRule>,
}

impl RecommendationEngine {
    pub fn new(rules: Vec<RecommendationRule>) -> Self {
        let mut rules = rules;
        rules.sort_by_key(|r| -r.priority);
        Self { rules }
    }

    /// First matching rule wins; the score-tier fallback guarantees the
    /// result is never empty.
    pub fn recommend(&self, features: &CustomerFeatures, score: u8) -> String {
        for rule in &self.rules {
            if !rule.is_active {
                continue;
            }

            if self.matches(rule, features, score) {
                for action in &rule.actions {
                    let RuleAction::Recommend(offer) = action;
                    return offer.clone();
                }
            }
        }

        fallback_for_score(score)
    }

    fn matches(&self, rule: &RecommendationRule, features: &CustomerFeatures, score: u8) -> bool {
        for condition in &rule.conditions {
            match condition {
                RuleCondition::ProductKeyword(keyword) => {
                    if !features
                        .top_product
                        .to_lowercase()
                        .contains(&keyword.to_lowercase())
                    {
                        return false;
                    }
                }
                RuleCondition::MinScore(min) => {
                    if score < *min {
                        return false;
                    }
                }
                RuleCondition::MinAverageOrderValue(min) => {
                    if features.average_order_value < *min {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Score-tier fallback for customers no keyword rule covers.
fn fallback_for_score(score: u8) -> String {
    if score >= 90 {
        "25% off next purchase + Free shipping".to_string()
    } else if score >= 80 {
        "Buy 2 Get 1 Free on accessories".to_string()
    } else if score >= 70 {
        "Free premium membership upgrade".to_string()
    } else {
        "10% off your next order".to_string()
    }
}

pub fn get_default_rules() -> Vec<RecommendationRule> {
    let recommend = |name: &str, keyword: &str, offer: &str, priority: i32| RecommendationRule {
        id: Uuid::new_v4(),
        name: name.to_string(),
        priority,
        is_active: true,
        conditions: vec![RuleCondition::ProductKeyword(keyword.to_string())],
        actions: vec![RuleAction::Recommend(offer.to_string())],
    };

    vec![
        recommend(
            "Skincare Repeat Buyer",
            "skincare",
            "25% off next purchase + Free shipping",
            100,
        ),
        recommend(
            "Wearables Upsell",
            "watch",
            "Buy 2 Get 1 Free on accessories",
            95,
        ),
        recommend(
            "Coffee Subscriber",
            "coffee",
            "Free premium membership upgrade",
            90,
        ),
        recommend(
            "Fitness Cross-sell",
            "fitness",
            "30% off fitness accessories",
            85,
        ),
        recommend(
            "Fashion Early Access",
            "handbag",
            "Exclusive early access to new collection",
            80,
        ),
        recommend(
            "Gaming Cross-sell",
            "gaming",
            "20% off gaming accessories",
            75,
        ),
        recommend(
            "Home Consultation",
            "decor",
            "Free interior consultation",
            70,
        ),
        recommend(
            "Gourmet Subscription",
            "food",
            "Monthly subscription discount",
            65,
        ),
        recommend("Yoga Bundle", "yoga", "Free yoga class bundle", 60),
        recommend(
            "Electronics Warranty",
            "gadget",
            "Extended warranty package",
            55,
        ),
    ]
}
