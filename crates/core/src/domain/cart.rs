use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::{Product, ProductId};
use crate::domain::session::SessionId;
use crate::domain::shopper::ShopperId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartItemId(pub Uuid);

impl CartItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A cart row, scoped to one (shopper, session) pair. Quantity is always at
/// least 1; an update that would drop it to 0 or below removes the row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub shopper_id: ShopperId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub session_id: SessionId,
}

impl CartItem {
    pub fn new(shopper_id: ShopperId, product_id: ProductId, session_id: SessionId) -> Self {
        Self { id: CartItemId::generate(), shopper_id, product_id, quantity: 1, session_id }
    }
}

/// Cart row joined with its product, as read back from the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.item.quantity)
    }
}

pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}
