//! Catalog snapshot loading with bounded retry. The WhatsApp channel can be
//! opened before the store has answered; offers wait for the catalog with a
//! fixed backoff and give up after a hard cap rather than crashing the
//! conversation.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use shopmate_core::domain::product::Product;
use shopmate_db::ProductRepository;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogRetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl CatalogRetryPolicy {
    pub fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self { max_attempts: max_attempts.max(1), backoff: Duration::from_millis(backoff_ms) }
    }
}

impl Default for CatalogRetryPolicy {
    fn default() -> Self {
        Self::new(10, 1000)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogLoadError {
    #[error("catalog unavailable after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

pub struct CatalogLoader {
    products: Arc<dyn ProductRepository>,
    policy: CatalogRetryPolicy,
}

impl CatalogLoader {
    pub fn new(products: Arc<dyn ProductRepository>, policy: CatalogRetryPolicy) -> Self {
        Self { products, policy }
    }

    /// Fetch the catalog, retrying on errors and on empty results. Returns
    /// the snapshot on the first non-empty read; stops after the cap.
    pub async fn load(&self) -> Result<Vec<Product>, CatalogLoadError> {
        for attempt in 1..=self.policy.max_attempts {
            match self.products.list_all().await {
                Ok(products) if !products.is_empty() => {
                    info!(attempt, count = products.len(), "catalog snapshot loaded");
                    return Ok(products);
                }
                Ok(_) => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        "catalog is empty, retrying"
                    );
                }
                Err(error) => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        error = %error,
                        "catalog fetch failed, retrying"
                    );
                }
            }

            if attempt < self.policy.max_attempts && !self.policy.backoff.is_zero() {
                tokio::time::sleep(self.policy.backoff).await;
            }
        }

        warn!(
            max_attempts = self.policy.max_attempts,
            "catalog retries exhausted, giving up without crashing the conversation"
        );
        Err(CatalogLoadError::RetriesExhausted { attempts: self.policy.max_attempts })
    }
}
