//! Agent message copy for both channels: greeting pools, order and shipping
//! notices, offer and payment texts. Templates interpolate the shopper's
//! first name, brands, and style preference.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopmate_core::domain::product::{Product, RecommendedProduct};
use shopmate_core::domain::shopper::{LoyaltyTier, Shopper};

pub const STOREFRONT_NAME: &str = "Shopmate";

pub const CATALOG_UNAVAILABLE_NOTICE: &str =
    "Unable to load product recommendations right now. Please try again in a moment.";
pub const CART_WRITE_FAILED_NOTICE: &str =
    "We couldn't update your cart just now. Please try that again.";
pub const PAYMENT_FAILED_NOTICE: &str =
    "Sorry, there was an error processing your payment. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: &'static [PaymentMethod] =
        &[PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::Wallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::Wallet => "Wallet",
        }
    }
}

/// Tier-aware greeting. Gold members draw from a distinct pool.
pub fn greeting(shopper: &Shopper) -> String {
    let first_name = shopper.first_name();
    let brands = if shopper.favorite_brands.is_empty() {
        "fashion".to_owned()
    } else {
        shopper.favorite_brands.join(" and ")
    };
    let style = shopper.style_preference.as_deref().unwrap_or("style");

    let pool: Vec<String> = if shopper.loyalty_tier == LoyaltyTier::Gold {
        vec![
            format!(
                "Hi {first_name}! As a valued Gold member, we've curated some exclusive pieces \
                 just for you. Your premium style deserves the best!"
            ),
            format!(
                "Welcome back, {first_name}! Your Gold membership unlocks premium selections. \
                 Let me show you what's perfect for your elegant taste."
            ),
            format!(
                "{first_name}! As our Gold member, you get up to 30% off on all items. Here are \
                 some handpicked {brands} pieces that match your sophisticated style."
            ),
        ]
    } else {
        vec![
            format!(
                "Hey {first_name}! Just dropped some fresh {brands} pieces, totally your {style} \
                 vibe. Want to see them?"
            ),
            format!(
                "Hi {first_name}! I've got some {brands} items that match your {style} \
                 perfectly. Ready to check them out?"
            ),
            format!(
                "{first_name}! Your favorite {brands} just got some new arrivals. Perfect for \
                 your {style} aesthetic!"
            ),
        ]
    };

    let index = rand::thread_rng().gen_range(0..pool.len());
    pool[index].clone()
}

pub fn order_confirmation(order_id: &str) -> String {
    format!(
        "Thank you for shopping at {STOREFRONT_NAME}!\n\nYour order {order_id} has been \
         confirmed.\n\nWe hope you love your purchase!"
    )
}

pub fn tracking_status(order_id: &str) -> String {
    format!(
        "Order Status: {order_id}\n\nConfirmed\nProcessing\nPacked\nOut for Delivery\n\n\
         Expected delivery: Tomorrow by 6 PM\n\nYour order is being prepared!"
    )
}

/// Upsell copy for one offered product, personalised per shopper.
pub fn offer_message(
    recommended: &RecommendedProduct,
    source: &Product,
    shopper_name: &str,
    reason: &str,
) -> String {
    let brand = &recommended.product.brand;
    let source_brand = &source.brand;
    let name = &recommended.product.name;
    let price = format_price(recommended.discounted_price());
    let percent = recommended.discount_percent.unwrap_or(0);
    let shopper_name = shopper_name.to_lowercase();

    let closer = if shopper_name.contains("rohan") {
        "\n\nComplete your look with this perfect pair!"
    } else if shopper_name.contains("aarav") {
        "\n\nWant to complete your streetwear look?"
    } else {
        ""
    };

    format!(
        "BTW, these {brand} items go great with your new {source_brand} style!\n\n{name}\n\
         {reason}\n\nSpecial Price: {price} ({percent}% OFF)\nLimited time offer - expires \
         soon!{closer}"
    )
}

pub fn cart_confirmation(recommended: &RecommendedProduct) -> String {
    let name = &recommended.product.name;
    let list_price = format_price(recommended.product.price);
    let final_price = format_price(recommended.discounted_price());
    let percent = recommended.discount_percent.unwrap_or(0);
    format!(
        "Awesome! Added to cart\n\n{name}\nPrice: {list_price}\nDiscount: {percent}% OFF\n\
         Final: {final_price}\n\nWant to checkout now?"
    )
}

pub fn payment_prompt(recommended: &RecommendedProduct, method: PaymentMethod) -> String {
    format!(
        "Paying with {} for {}.\nAmount due: {}\n\nTap Pay to confirm.",
        method.as_str(),
        recommended.product.name,
        format_price(recommended.discounted_price()),
    )
}

pub fn payment_success(order_id: &str, amount: Decimal) -> String {
    format!(
        "Payment successful!\n\nOrder ID: {order_id}\nAmount: {}\nSame delivery (tomorrow \
         6 PM)\n\nThanks for shopping with {STOREFRONT_NAME}!",
        format_price(amount),
    )
}

pub fn format_price(amount: Decimal) -> String {
    format!("\u{20B9}{}", amount.round_dp(0))
}
