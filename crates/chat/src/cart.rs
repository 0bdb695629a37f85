//! Cart policy over the primitive store operations: add is insert-or-
//! increment, a quantity update at or below zero removes the row, and totals
//! (with the loyalty discount) are recomputed on every read.

use std::sync::Arc;

use rust_decimal::Decimal;

use shopmate_core::domain::cart::{cart_total, CartItem, CartItemId, CartLine};
use shopmate_core::domain::product::ProductId;
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::{Shopper, ShopperId};
use shopmate_core::pricing::loyalty_discount;
use shopmate_db::repositories::RepositoryError;
use shopmate_db::{CartRepository, ProductRepository};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartMutation {
    Inserted,
    Incremented,
    Updated,
    Removed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartTotals {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub loyalty_discount: Decimal,
    pub payable: Decimal,
}

#[derive(Clone)]
pub struct CartService {
    cart: Arc<dyn CartRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CartService {
    pub fn new(cart: Arc<dyn CartRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { cart, products }
    }

    /// Insert the product, or bump the quantity when the (shopper, session)
    /// pair already carries it.
    pub async fn add(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
        product_id: &ProductId,
    ) -> Result<CartMutation, RepositoryError> {
        match self.cart.find_item(shopper_id, session_id, product_id).await? {
            Some(existing) => {
                self.cart.update_quantity(&existing.id, existing.quantity + 1).await?;
                Ok(CartMutation::Incremented)
            }
            None => {
                self.cart
                    .insert(CartItem::new(
                        shopper_id.clone(),
                        product_id.clone(),
                        session_id.clone(),
                    ))
                    .await?;
                Ok(CartMutation::Inserted)
            }
        }
    }

    /// Set a row's quantity; zero or below removes the row.
    pub async fn set_quantity(
        &self,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<CartMutation, RepositoryError> {
        if quantity <= 0 {
            self.cart.remove(item_id).await?;
            return Ok(CartMutation::Removed);
        }
        self.cart.update_quantity(item_id, quantity as u32).await?;
        Ok(CartMutation::Updated)
    }

    pub async fn remove(&self, item_id: &CartItemId) -> Result<(), RepositoryError> {
        self.cart.remove(item_id).await
    }

    pub async fn clear(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<(), RepositoryError> {
        self.cart.clear(shopper_id, session_id).await
    }

    /// Cart rows joined with their products. Rows whose product has vanished
    /// from the catalog are skipped rather than failing the read.
    pub async fn lines(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<Vec<CartLine>, RepositoryError> {
        let items = self.cart.items_for(shopper_id, session_id).await?;
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            if let Some(product) = self.products.find_by_id(&item.product_id).await? {
                lines.push(CartLine { item, product });
            }
        }
        Ok(lines)
    }

    pub async fn totals(
        &self,
        shopper: &Shopper,
        session_id: &SessionId,
    ) -> Result<CartTotals, RepositoryError> {
        let lines = self.lines(&shopper.id, session_id).await?;
        let total = cart_total(&lines);
        let discount = loyalty_discount(shopper.loyalty_tier, shopper.loyalty_points, total);
        Ok(CartTotals { lines, total, loyalty_discount: discount, payable: total - discount })
    }
}
