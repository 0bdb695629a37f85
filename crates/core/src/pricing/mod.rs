//! Loyalty points pricing. Points act as a currency-equivalent budget capped
//! by the tier's percentage ceiling; recomputed on every cart mutation and
//! never cached.

use rust_decimal::Decimal;

use crate::domain::shopper::LoyaltyTier;

/// `min(points, cart_total * tier_rate)`, never negative. The ceiling is a
/// fraction of the total, so the discount cannot exceed the cart total.
pub fn loyalty_discount(tier: LoyaltyTier, points: u32, cart_total: Decimal) -> Decimal {
    let ceiling = cart_total * tier.max_discount_rate();
    Decimal::from(points).min(ceiling).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::loyalty_discount;
    use crate::domain::shopper::LoyaltyTier;

    #[test]
    fn gold_discount_is_capped_by_tier_ceiling() {
        // points 1000 vs ceiling 2000 * 0.30 = 600
        let discount = loyalty_discount(LoyaltyTier::Gold, 1000, Decimal::from(2000));
        assert_eq!(discount, Decimal::from(600));
    }

    #[test]
    fn low_points_bound_the_discount() {
        let discount = loyalty_discount(LoyaltyTier::Gold, 100, Decimal::from(2000));
        assert_eq!(discount, Decimal::from(100));
    }

    #[test]
    fn discount_stays_within_tier_range() {
        for tier in [LoyaltyTier::Gold, LoyaltyTier::Silver, LoyaltyTier::Bronze] {
            for points in [0u32, 50, 500, 5000] {
                let total = Decimal::from(1800);
                let discount = loyalty_discount(tier, points, total);
                assert!(discount >= Decimal::ZERO);
                assert!(discount <= total * tier.max_discount_rate());
                assert_eq!(discount, Decimal::from(points).min(total * tier.max_discount_rate()));
            }
        }
    }

    #[test]
    fn empty_cart_yields_zero() {
        assert_eq!(loyalty_discount(LoyaltyTier::Silver, 900, Decimal::ZERO), Decimal::ZERO);
    }
}
