use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, warn};

use retail_catalog::Customer;
use retail_shared::models::events::CustomersRankedEvent;
use retail_store::app_config::RankingConfig;

use crate::ranker::LoyaltyRanker;

/// One purchase row of an uploaded CSV file.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRow {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub product: String,
    pub amount: f64,
    pub purchased_at: String,
}

/// Per-customer rollup of the parsed purchase rows.
#[derive(Debug, Clone)]
pub struct PurchaseAggregate {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub purchase_count: u32,
    pub total_amount: f64,
    pub last_purchase_at: DateTime<Utc>,
    /// Product tallies in encounter order, so ties resolve deterministically.
    pub products: Vec<(String, u32)>,
}

impl PurchaseAggregate {
    fn record(&mut self, product: &str, amount: f64, purchased_at: DateTime<Utc>) {
        self.purchase_count += 1;
        self.total_amount += amount;
        if purchased_at > self.last_purchase_at {
            self.last_purchase_at = purchased_at;
        }
        match self.products.iter_mut().find(|(name, _)| name == product) {
            Some((_, count)) => *count += 1,
            None => self.products.push((product.to_string(), 1)),
        }
    }

    pub fn average_order_value(&self) -> f64 {
        if self.purchase_count == 0 {
            return 0.0;
        }
        self.total_amount / self.purchase_count as f64
    }

    /// Most frequently purchased product; earliest-seen wins a tie.
    pub fn top_product(&self) -> &str {
        self.products
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(name, _)| name.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The upload is rejected before any parsing happens.
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// Anything that goes wrong once processing has started. Surfaced to the
    /// operator as a generic advisory; no partial results escape.
    #[error("Failed to process purchase data: {0}")]
    Processing(String),
}

/// The loyalty ranking pipeline: CSV text in, ranked customers out.
///
/// Side-effect free; never touches the persisted store.
pub struct LoyaltyPipeline {
    ranker: LoyaltyRanker,
}

impl LoyaltyPipeline {
    pub fn new(config: RankingConfig) -> Self {
        Self {
            ranker: LoyaltyRanker::new(config),
        }
    }

    /// Process an uploaded file against the current instant.
    pub fn process(&self, filename: &str, content: &str) -> Result<Vec<Customer>, PipelineError> {
        self.process_as_of(filename, content, Utc::now())
    }

    /// Process with an explicit ranking instant, so scores are reproducible.
    pub fn process_as_of(
        &self,
        filename: &str,
        content: &str,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<Customer>, PipelineError> {
        if !filename.ends_with(".csv") {
            return Err(PipelineError::InvalidFileType(filename.to_string()));
        }

        let rows = parse_purchases(content)?;
        let aggregates = aggregate(rows);
        if aggregates.is_empty() {
            return Err(PipelineError::Processing(
                "no valid purchase rows".to_string(),
            ));
        }

        let ranked = self.ranker.rank(aggregates, as_of);

        let event = CustomersRankedEvent {
            source_file: filename.to_string(),
            customer_count: ranked.len(),
            top_score: ranked.first().and_then(|c| c.loyalty_score),
            timestamp: as_of.timestamp(),
        };
        info!(
            source_file = %event.source_file,
            customer_count = event.customer_count,
            top_score = ?event.top_score,
            "customers ranked"
        );

        Ok(ranked)
    }
}

/// Parse purchase rows, collecting row-level problems. A file that yields no
/// valid row at all is a processing error.
fn parse_purchases(content: &str) -> Result<Vec<PurchaseRow>, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in reader.deserialize::<PurchaseRow>().enumerate() {
        let row_num = row_idx + 2; // 1-based, header skipped

        match result {
            Ok(row) => {
                if row.customer_id.is_empty() {
                    errors.push(format!("Row {}: empty customer id", row_num));
                    continue;
                }
                rows.push(row);
            }
            Err(e) => {
                errors.push(format!("Row {}: CSV parse error: {}", row_num, e));
            }
        }
    }

    if rows.is_empty() && !errors.is_empty() {
        return Err(PipelineError::Processing(errors.join("\n")));
    }

    if !errors.is_empty() {
        warn!("CSV upload warnings:\n{}", errors.join("\n"));
    }

    Ok(rows)
}

fn aggregate(rows: Vec<PurchaseRow>) -> Vec<PurchaseAggregate> {
    let mut by_customer: HashMap<String, usize> = HashMap::new();
    let mut aggregates: Vec<PurchaseAggregate> = Vec::new();

    for row in rows {
        let purchased_at = match DateTime::parse_from_rfc3339(&row.purchased_at) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                warn!(customer_id = %row.customer_id, "skipping row with bad timestamp: {}", e);
                continue;
            }
        };

        let idx = *by_customer.entry(row.customer_id.clone()).or_insert_with(|| {
            aggregates.push(PurchaseAggregate {
                customer_id: row.customer_id.clone(),
                name: row.name.clone(),
                email: row.email.clone(),
                purchase_count: 0,
                total_amount: 0.0,
                last_purchase_at: purchased_at,
                products: Vec::new(),
            });
            aggregates.len() - 1
        });

        aggregates[idx].record(&row.product, row.amount, purchased_at);
    }

    aggregates.retain(|a| a.purchase_count > 0);
    aggregates
}
