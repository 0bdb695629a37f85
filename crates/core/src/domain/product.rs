use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// Catalog entry. Immutable within a conversation turn; the catalog snapshot
/// handed to the decision layer is never mutated in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub sizes: Vec<String>,
    pub stock_count: u32,
}

impl Product {
    pub fn brand_lower(&self) -> String {
        self.brand.to_lowercase()
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn category_lower(&self) -> String {
        self.category.as_deref().unwrap_or("").to_lowercase()
    }
}

/// A product surfaced to a shopper, optionally carrying a time-limited
/// discount. A discount never appears without an expiry; a reason-only
/// recommendation carries neither.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub product: Product,
    pub discount_percent: Option<u8>,
    pub expires_in_minutes: Option<u32>,
    pub reason: String,
}

impl RecommendedProduct {
    pub fn plain(product: Product, reason: impl Into<String>) -> Self {
        Self { product, discount_percent: None, expires_in_minutes: None, reason: reason.into() }
    }

    pub fn discounted(
        product: Product,
        discount_percent: u8,
        expires_in_minutes: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            product,
            discount_percent: Some(discount_percent),
            expires_in_minutes: Some(expires_in_minutes),
            reason: reason.into(),
        }
    }

    /// Price after the attached discount, unchanged when no discount is set.
    pub fn discounted_price(&self) -> Decimal {
        match self.discount_percent {
            Some(percent) => {
                let fraction = Decimal::from(percent) / Decimal::from(100);
                self.product.price - self.product.price * fraction
            }
            None => self.product.price,
        }
    }
}
