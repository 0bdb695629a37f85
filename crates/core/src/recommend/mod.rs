pub mod brands;
pub mod engine;
pub mod scenarios;
pub mod segment;

use serde::{Deserialize, Serialize};

pub use brands::collaborative_brands;
pub use engine::{baseline_picks, recommendation_reason, RecommendationEngine};
pub use scenarios::{is_scripted_shopper, scripted_recommendations};
pub use segment::{filter_by_segment, infer_segment, Segment};

/// Per-request knobs for the engine. Built per recommendation call, never
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub cross_brand: bool,
    pub time_limited: bool,
    pub discount_percent: Option<u8>,
    pub expires_in_minutes: Option<u32>,
}

impl RecommendationConfig {
    /// Time-limited cross-brand offer with the given discount and expiry.
    pub fn time_limited_offer(discount_percent: u8, expires_in_minutes: u32) -> Self {
        Self {
            cross_brand: true,
            time_limited: true,
            discount_percent: Some(discount_percent),
            expires_in_minutes: Some(expires_in_minutes),
        }
    }

    /// Reason-only suggestions with no urgency attached.
    pub fn plain() -> Self {
        Self { cross_brand: true, time_limited: false, discount_percent: None, expires_in_minutes: None }
    }
}
