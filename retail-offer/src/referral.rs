use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

use retail_core::notification::ReferralClick;
use retail_core::repository::ReferralClickRepository;
use retail_shared::models::events::ReferralClickedEvent;
use retail_store::app_config::ReferralConfig;

use crate::dispatch::DispatchError;
use crate::events::OfferTelemetry;

const SUFFIX_LEN: usize = 13;
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Builds referral links of the form
/// `<base>/refer/<customer_id>/<epoch-millis>[/<base36-suffix>]`.
///
/// Uniqueness is only probabilistic (timestamp plus optional randomness);
/// nothing enforces it.
pub struct ReferralLinkGenerator {
    base_url: String,
}

impl ReferralLinkGenerator {
    pub fn new(config: ReferralConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The suffix-less form used on the per-offer dispatch paths.
    pub fn quick(&self, customer_id: &str, at: DateTime<Utc>) -> String {
        format!(
            "{}/refer/{}/{}",
            self.base_url,
            customer_id,
            at.timestamp_millis()
        )
    }

    /// The directory-level form with a random base-36 suffix.
    pub fn unique(&self, customer_id: &str, at: DateTime<Utc>) -> String {
        format!("{}/{}", self.quick(customer_id, at), random_suffix())
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// A referral link decomposed into its parts. Both the quick and the
/// suffixed form parse; callers must tolerate either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReferral {
    pub customer_id: String,
    pub timestamp_millis: i64,
    pub suffix: Option<String>,
}

pub fn parse(link: &str) -> Option<ParsedReferral> {
    let (_, rest) = link.split_once("/refer/")?;
    let mut parts = rest.split('/');

    let customer_id = parts.next().filter(|p| !p.is_empty())?.to_string();
    let timestamp_millis: i64 = parts.next()?.parse().ok()?;
    let suffix = parts.next().filter(|p| !p.is_empty()).map(str::to_string);
    if parts.next().is_some() {
        return None;
    }

    Some(ParsedReferral {
        customer_id,
        timestamp_millis,
        suffix,
    })
}

/// Records clicks on referral links into the shared click log.
pub struct ClickTracker {
    clicks: Arc<dyn ReferralClickRepository>,
    telemetry: OfferTelemetry,
}

impl ClickTracker {
    pub fn new(clicks: Arc<dyn ReferralClickRepository>) -> Self {
        Self {
            clicks,
            telemetry: OfferTelemetry::new(),
        }
    }

    pub async fn track(
        &self,
        referral_link: &str,
        customer_id: &str,
    ) -> Result<ReferralClick, DispatchError> {
        // Links are tracked verbatim; an unrecognized shape is still logged.
        if parse(referral_link).is_none() {
            tracing::warn!(link = %referral_link, "tracking click on unrecognized referral link form");
        }

        let now = Utc::now();
        let click = ReferralClick {
            id: now.timestamp_millis().to_string(),
            referral_link: referral_link.to_string(),
            customer_id: customer_id.to_string(),
            clicked_at: now,
            // Reserved: a purchase event outside this system would flip it.
            converted: false,
        };

        self.clicks
            .append(&click)
            .await
            .map_err(|e| DispatchError::Store(e.to_string()))?;

        self.telemetry.log_referral_clicked(ReferralClickedEvent {
            click_id: click.id.clone(),
            customer_id: click.customer_id.clone(),
            referral_link: click.referral_link.clone(),
            timestamp: now.timestamp(),
        });

        Ok(click)
    }
}
