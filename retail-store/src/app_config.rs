use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub referral: ReferralConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Weights for the loyalty scoring blend. Components are normalized to
/// [0, 1] before weighting, so the weights should sum to 1.0.
#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    pub frequency_weight: f64,
    pub monetary_weight: f64,
    pub recency_weight: f64,
    #[serde(default = "default_max_customers")]
    pub max_customers: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            frequency_weight: 0.40,
            monetary_weight: 0.35,
            recency_weight: 0.25,
            max_customers: default_max_customers(),
        }
    }
}

fn default_max_customers() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReferralConfig {
    pub base_url: String,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            base_url: "https://smartretailer.com".to_string(),
        }
    }
}

/// Simulated outbound latency. The console has no real transport; the
/// delay is the only thing standing in for the network.
#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    pub simulated_delay_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_display_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of RETAIL)
            // Eg.. `RETAIL_SERVER__PORT=1` would set the `server.port` key
            .add_source(config::Environment::with_prefix("RETAIL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_defaults_sum_to_one() {
        let ranking = RankingConfig::default();
        let total = ranking.frequency_weight + ranking.monetary_weight + ranking.recency_weight;
        assert!((total - 1.0).abs() < f64::EPSILON);
        assert_eq!(ranking.max_customers, 10);
    }

    #[test]
    fn referral_default_points_at_the_console_domain() {
        assert_eq!(ReferralConfig::default().base_url, "https://smartretailer.com");
    }
}
