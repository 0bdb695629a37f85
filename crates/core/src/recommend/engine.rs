use std::collections::HashSet;

use crate::domain::product::{Product, ProductId, RecommendedProduct};
use crate::domain::shopper::{LoyaltyTier, Shopper};
use crate::recommend::brands::collaborative_brands;
use crate::recommend::scenarios::scripted_recommendations;
use crate::recommend::segment::{filter_by_segment, infer_segment};
use crate::recommend::RecommendationConfig;

const MAX_RECOMMENDATIONS: usize = 3;

/// Category pairs treated as complementary for cross-brand matching, matched
/// by lowercase substring on (source, candidate).
const COMPLEMENTARY_CATEGORIES: &[(&str, &str)] =
    &[("tee", "pant"), ("shirt", "pant"), ("top", "bottom"), ("kurta", "palazzo")];

/// Selects and ranks upsell candidates for a shopper. Scripted scenarios win
/// over the general cross-brand algorithm; nothing here errors, an empty
/// result means nothing qualified.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(
        &self,
        source: &Product,
        catalog: &[Product],
        shopper: &Shopper,
        config: &RecommendationConfig,
    ) -> Vec<RecommendedProduct> {
        let scripted = scripted_recommendations(source, catalog, shopper);
        if !scripted.is_empty() {
            return scripted;
        }

        self.cross_brand(source, catalog, shopper, config)
    }

    fn cross_brand(
        &self,
        source: &Product,
        catalog: &[Product],
        shopper: &Shopper,
        config: &RecommendationConfig,
    ) -> Vec<RecommendedProduct> {
        let segment = infer_segment(&shopper.name);
        let filtered = filter_by_segment(catalog, segment);
        let cluster = collaborative_brands(&source.brand);

        let candidates: Vec<&Product> = filtered
            .iter()
            .filter(|candidate| {
                candidate.id != source.id
                    && cluster.iter().any(|brand| brand.eq_ignore_ascii_case(&candidate.brand))
                    && !candidate.brand.eq_ignore_ascii_case(&source.brand)
                    && self.categories_compatible(source, candidate, shopper.loyalty_tier)
            })
            .collect();

        let preferred: Vec<&Product> = candidates
            .iter()
            .copied()
            .filter(|candidate| shopper.favors_brand(&candidate.brand))
            .collect();
        let pool = if preferred.is_empty() { candidates } else { preferred };

        let reason = format!("Perfect pair with your {} style!", source.brand);
        pool.into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|candidate| self.stamp(candidate.clone(), config, &reason))
            .collect()
    }

    fn categories_compatible(&self, source: &Product, candidate: &Product, tier: LoyaltyTier) -> bool {
        let source_category = source.category_lower();
        let candidate_category = candidate.category_lower();

        if source.category.is_some() && source.category == candidate.category {
            return true;
        }
        let complementary = COMPLEMENTARY_CATEGORIES.iter().any(|(from, to)| {
            source_category.contains(from) && candidate_category.contains(to)
        });
        if complementary {
            return true;
        }
        // Gold shoppers also see accessories regardless of the source category.
        tier == LoyaltyTier::Gold && candidate_category.contains("accessor")
    }

    fn stamp(
        &self,
        product: Product,
        config: &RecommendationConfig,
        reason: &str,
    ) -> RecommendedProduct {
        match (config.discount_percent, config.expires_in_minutes) {
            (Some(percent), Some(minutes)) if config.time_limited => {
                RecommendedProduct::discounted(product, percent, minutes, reason)
            }
            _ => RecommendedProduct::plain(product, reason),
        }
    }
}

/// Baseline picks for greetings and "show more": favorite-brand matches after
/// segment filtering, else the top catalog entries, excluding anything
/// already shown. At most two.
pub fn baseline_picks(
    shopper: &Shopper,
    catalog: &[Product],
    shown: &HashSet<ProductId>,
) -> Vec<Product> {
    let filtered = filter_by_segment(catalog, infer_segment(&shopper.name));

    let brand_matches: Vec<Product> = filtered
        .iter()
        .filter(|product| shopper.favors_brand(&product.brand) && !shown.contains(&product.id))
        .cloned()
        .collect();
    if brand_matches.len() >= 2 {
        return brand_matches.into_iter().take(2).collect();
    }

    filtered.into_iter().filter(|product| !shown.contains(&product.id)).take(2).collect()
}

/// Display reason fallback chain when a recommendation arrives without one.
pub fn recommendation_reason(
    recommended: &RecommendedProduct,
    shopper: &Shopper,
    source: Option<&Product>,
) -> String {
    if !recommended.reason.is_empty() {
        return recommended.reason.clone();
    }
    if shopper.favors_brand(&recommended.product.brand) {
        return format!("Matches your {} favorites", recommended.product.brand);
    }
    if let Some(source) = source {
        if !recommended.product.brand.eq_ignore_ascii_case(&source.brand) {
            return format!("Perfect pair with your {} style", source.brand);
        }
    }
    if let (Some(percent), Some(_)) =
        (recommended.discount_percent, recommended.expires_in_minutes)
    {
        return format!("{percent}% OFF - Limited time!");
    }
    "AI Recommended".to_owned()
}
