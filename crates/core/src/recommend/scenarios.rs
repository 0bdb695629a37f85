//! Curated shopper/product pairings, kept as a prioritized rule list ahead of
//! the general cross-brand algorithm. Rules search the unfiltered catalog:
//! these pairings are hand-authored and may cross the segment heuristic.

use crate::domain::product::{Product, RecommendedProduct};
use crate::domain::shopper::Shopper;

/// One curated target item. Every fragment group is an any-of match; an empty
/// group is unconstrained. `brand_fragments` match brand or name, the detail
/// groups match the name only.
struct ScenarioPairing {
    brand_fragments: &'static [&'static str],
    detail_fragments: &'static [&'static str],
    extra_fragments: &'static [&'static str],
    discount_percent: u8,
    expires_in_minutes: u32,
    reason: &'static str,
}

/// One scripted scenario: who it applies to and which source products arm it.
/// Source fragments match the source product's name or brand.
struct ScenarioRule {
    shopper_fragment: &'static str,
    source_fragments: &'static [&'static str],
    pairings: &'static [ScenarioPairing],
}

const RULES: &[ScenarioRule] = &[
    // Streetwear tee buyers get the partner streetwear label.
    ScenarioRule {
        shopper_fragment: "aarav",
        source_fragments: &["bewakoof", "oversized", "graphic"],
        pairings: &[ScenarioPairing {
            brand_fragments: &["souled"],
            detail_fragments: &[],
            extra_fragments: &[],
            discount_percent: 20,
            expires_in_minutes: 120,
            reason: "Perfect pair with your Bewakoof style!",
        }],
    },
    // Formal shirt buyers get the matching trouser.
    ScenarioRule {
        shopper_fragment: "rohan",
        source_fragments: &["allen solly"],
        pairings: &[ScenarioPairing {
            brand_fragments: &["louis philippe"],
            detail_fragments: &["black", "trouser", "pant"],
            extra_fragments: &["slim", "fit", "trouser"],
            discount_percent: 20,
            expires_in_minutes: 120,
            reason: "Perfect pair with your Allen Solly shirt!",
        }],
    },
    // Ethnic top buyers get an accessory plus an apparel item together.
    ScenarioRule {
        shopper_fragment: "priya",
        source_fragments: &["w white floral", "white floral"],
        pairings: &[
            ScenarioPairing {
                brand_fragments: &["forever glam"],
                detail_fragments: &["bag", "shoulder", "off-white", "white"],
                extra_fragments: &[],
                discount_percent: 30,
                expires_in_minutes: 240,
                reason: "Perfect accessory to complete your look!",
            },
            ScenarioPairing {
                brand_fragments: &["aurelia"],
                detail_fragments: &["kurta", "floral", "embroidered"],
                extra_fragments: &[],
                discount_percent: 30,
                expires_in_minutes: 240,
                reason: "Perfect pair with your ethnic style!",
            },
        ],
    },
];

pub fn is_scripted_shopper(name: &str) -> bool {
    let name = name.to_lowercase();
    RULES.iter().any(|rule| name.contains(rule.shopper_fragment))
}

/// First rule matching (shopper, source) resolved against the catalog.
/// Returns every pairing the scenario defines that is present in the catalog;
/// empty when no rule arms or no target product exists.
pub fn scripted_recommendations(
    source: &Product,
    catalog: &[Product],
    shopper: &Shopper,
) -> Vec<RecommendedProduct> {
    let shopper_name = shopper.name_lower();
    let source_name = source.name_lower();
    let source_brand = source.brand_lower();

    for rule in RULES {
        if !shopper_name.contains(rule.shopper_fragment) {
            continue;
        }
        let armed = rule
            .source_fragments
            .iter()
            .any(|fragment| source_name.contains(fragment) || source_brand.contains(fragment));
        if !armed {
            continue;
        }

        let matched: Vec<RecommendedProduct> = rule
            .pairings
            .iter()
            .filter_map(|pairing| {
                catalog.iter().find(|candidate| pairing_matches(pairing, candidate)).map(
                    |candidate| {
                        RecommendedProduct::discounted(
                            candidate.clone(),
                            pairing.discount_percent,
                            pairing.expires_in_minutes,
                            pairing.reason,
                        )
                    },
                )
            })
            .collect();

        if !matched.is_empty() {
            return matched;
        }
    }

    Vec::new()
}

fn pairing_matches(pairing: &ScenarioPairing, candidate: &Product) -> bool {
    let brand = candidate.brand_lower();
    let name = candidate.name_lower();

    let brand_hit = pairing
        .brand_fragments
        .iter()
        .any(|fragment| brand.contains(fragment) || name.contains(fragment));
    let detail_hit = pairing.detail_fragments.is_empty()
        || pairing.detail_fragments.iter().any(|fragment| name.contains(fragment));
    let extra_hit = pairing.extra_fragments.is_empty()
        || pairing.extra_fragments.iter().any(|fragment| name.contains(fragment));

    brand_hit && detail_hit && extra_hit
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{is_scripted_shopper, scripted_recommendations};
    use crate::domain::product::{Product, ProductId};
    use crate::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

    fn product(id: &str, brand: &str, name: &str) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            brand: brand.to_owned(),
            name: name.to_owned(),
            price: Decimal::from(1999),
            image_url: None,
            category: None,
            sizes: vec![],
            stock_count: 8,
        }
    }

    fn shopper(name: &str) -> Shopper {
        Shopper {
            id: ShopperId("u-1".to_owned()),
            name: name.to_owned(),
            style_preference: None,
            favorite_brands: vec![],
            size: None,
            loyalty_tier: LoyaltyTier::Bronze,
            loyalty_points: 0,
        }
    }

    #[test]
    fn rohan_allen_solly_source_returns_louis_philippe_trouser() {
        let source = product("p-src", "Allen Solly", "Allen Solly Blue Shirt");
        let catalog = vec![
            product("p-1", "Van Heusen", "White Shirt"),
            product("p-2", "Louis Philippe", "Black Slim Fit Trousers"),
        ];
        let recommended = scripted_recommendations(&source, &catalog, &shopper("Rohan Mehta"));
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].product.id.0, "p-2");
        assert_eq!(recommended[0].discount_percent, Some(20));
        assert_eq!(recommended[0].expires_in_minutes, Some(120));
    }

    #[test]
    fn source_brand_alone_arms_the_rule() {
        // The source name carries no brand fragment; the brand field does.
        let source = product("p-src", "Allen Solly", "Blue Shirt");
        let catalog = vec![product("p-2", "Louis Philippe", "Black Slim Fit Trousers")];
        let recommended = scripted_recommendations(&source, &catalog, &shopper("Rohan"));
        assert_eq!(recommended.len(), 1);
    }

    #[test]
    fn priya_scenario_returns_bag_and_kurta_together() {
        let source = product("p-src", "W", "W White Floral Printed Top");
        let catalog = vec![
            product("p-1", "Forever Glam", "Off-White Shoulder Bag"),
            product("p-2", "Aurelia", "Embroidered Floral Kurta"),
            product("p-3", "Bewakoof", "Graphic Tee"),
        ];
        let recommended = scripted_recommendations(&source, &catalog, &shopper("Priya"));
        assert_eq!(recommended.len(), 2);
        assert_eq!(recommended[0].product.id.0, "p-1");
        assert_eq!(recommended[1].product.id.0, "p-2");
        assert_ne!(recommended[0].reason, recommended[1].reason);
        assert!(recommended.iter().all(|r| r.discount_percent == Some(30)));
    }

    #[test]
    fn unmatched_shopper_or_source_yields_nothing() {
        let source = product("p-src", "Allen Solly", "Allen Solly Blue Shirt");
        let catalog = vec![product("p-2", "Louis Philippe", "Black Slim Fit Trousers")];
        assert!(scripted_recommendations(&source, &catalog, &shopper("Meera")).is_empty());

        let off_script = product("p-src", "Bewakoof", "Plain Hoodie");
        assert!(scripted_recommendations(&off_script, &catalog, &shopper("Rohan")).is_empty());
    }

    #[test]
    fn scripted_shopper_detection() {
        assert!(is_scripted_shopper("Aarav Kumar"));
        assert!(is_scripted_shopper("priya"));
        assert!(!is_scripted_shopper("Meera"));
    }
}
