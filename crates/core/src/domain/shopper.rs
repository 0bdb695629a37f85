use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopperId(pub String);

/// Loyalty tier with its points-redemption ceiling. Unknown tier strings
/// degrade to Bronze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoyaltyTier {
    Gold,
    Silver,
    #[default]
    Bronze,
}

impl LoyaltyTier {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("gold") => Self::Gold,
            v if v.eq_ignore_ascii_case("silver") => Self::Silver,
            _ => Self::Bronze,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
        }
    }

    /// Maximum fraction of a cart total this tier may discount via points.
    pub fn max_discount_rate(&self) -> Decimal {
        match self {
            Self::Gold => Decimal::new(30, 2),
            Self::Silver => Decimal::new(20, 2),
            Self::Bronze => Decimal::new(10, 2),
        }
    }
}

/// Shopper profile, selected once per session and read-only to the decision
/// layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shopper {
    pub id: ShopperId,
    pub name: String,
    pub style_preference: Option<String>,
    pub favorite_brands: Vec<String>,
    pub size: Option<String>,
    pub loyalty_tier: LoyaltyTier,
    pub loyalty_points: u32,
}

impl Shopper {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    /// True when any favorite brand is a case-insensitive substring of the
    /// given brand name.
    pub fn favors_brand(&self, brand: &str) -> bool {
        let brand = brand.to_lowercase();
        self.favorite_brands.iter().any(|favorite| brand.contains(&favorite.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{LoyaltyTier, Shopper, ShopperId};

    #[test]
    fn unknown_tier_strings_default_to_bronze() {
        assert_eq!(LoyaltyTier::parse("Gold"), LoyaltyTier::Gold);
        assert_eq!(LoyaltyTier::parse("silver"), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::parse("Platinum"), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::parse(""), LoyaltyTier::Bronze);
    }

    #[test]
    fn tier_rates_match_ceilings() {
        assert_eq!(LoyaltyTier::Gold.max_discount_rate(), Decimal::new(30, 2));
        assert_eq!(LoyaltyTier::Silver.max_discount_rate(), Decimal::new(20, 2));
        assert_eq!(LoyaltyTier::Bronze.max_discount_rate(), Decimal::new(10, 2));
    }

    #[test]
    fn first_name_takes_leading_token() {
        let shopper = Shopper {
            id: ShopperId("u-1".to_owned()),
            name: "Rohan Mehta".to_owned(),
            style_preference: Some("formal".to_owned()),
            favorite_brands: vec!["Allen Solly".to_owned()],
            size: Some("40".to_owned()),
            loyalty_tier: LoyaltyTier::Silver,
            loyalty_points: 450,
        };
        assert_eq!(shopper.first_name(), "Rohan");
        assert!(shopper.favors_brand("Allen Solly Prime"));
        assert!(!shopper.favors_brand("Bewakoof"));
    }
}
