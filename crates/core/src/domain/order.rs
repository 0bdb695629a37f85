use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductId;
use crate::domain::session::SessionId;
use crate::domain::shopper::ShopperId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Shopper-facing short form, e.g. `ORD-1A2B3C4D`.
    pub fn display(&self) -> String {
        let simple = self.0.simple().to_string();
        format!("ORD-{}", simple[..8].to_uppercase())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Confirmed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub shopper_id: ShopperId,
    pub total_amount: Decimal,
    pub discount_applied: Decimal,
    pub status: OrderStatus,
    pub session_id: Option<SessionId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::{OrderId, OrderStatus};

    #[test]
    fn display_form_is_short_and_prefixed() {
        let id = OrderId::generate();
        let display = id.display();
        assert!(display.starts_with("ORD-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("returned"), None);
    }
}
