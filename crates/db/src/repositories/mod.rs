use async_trait::async_trait;
use rust_decimal::Decimal;
use shopmate_core::chrono::{DateTime, Utc};
use thiserror::Error;

use shopmate_core::domain::cart::{CartItem, CartItemId};
use shopmate_core::domain::order::{Order, OrderId, OrderLine};
use shopmate_core::domain::product::{Product, ProductId};
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::{Shopper, ShopperId};

pub mod cart;
pub mod memory;
pub mod order;
pub mod product;
pub mod shopper;

pub use cart::SqlCartRepository;
pub use memory::{
    InMemoryCartRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryShopperRepository,
};
pub use order::SqlOrderRepository;
pub use product::SqlProductRepository;
pub use shopper::SqlShopperRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Catalog reads plus the writes the seed/demo tooling needs.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
    /// First product whose name contains `fragment`, case-insensitive.
    async fn find_by_name_like(&self, fragment: &str)
        -> Result<Option<Product>, RepositoryError>;
    async fn save(&self, product: Product) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ShopperRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Shopper>, RepositoryError>;
    async fn find_by_id(&self, id: &ShopperId) -> Result<Option<Shopper>, RepositoryError>;
    async fn find_by_name_like(&self, fragment: &str)
        -> Result<Option<Shopper>, RepositoryError>;
    async fn save(&self, shopper: Shopper) -> Result<(), RepositoryError>;
}

/// Cart rows scoped by (shopper, session). Primitive operations only; the
/// insert-or-increment and remove-on-zero policies live in the chat layer.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn items_for(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<Vec<CartItem>, RepositoryError>;

    async fn find_item(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, RepositoryError>;

    async fn insert(&self, item: CartItem) -> Result<(), RepositoryError>;
    async fn update_quantity(&self, id: &CartItemId, quantity: u32)
        -> Result<(), RepositoryError>;
    async fn remove(&self, id: &CartItemId) -> Result<(), RepositoryError>;
    async fn clear(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order, lines: Vec<OrderLine>) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;
    async fn list_for_shopper(&self, shopper_id: &ShopperId)
        -> Result<Vec<Order>, RepositoryError>;
    async fn lines_for_order(&self, id: &OrderId) -> Result<Vec<OrderLine>, RepositoryError>;
}

pub(crate) fn parse_decimal(column: &str, raw: String) -> Result<Decimal, RepositoryError> {
    raw.parse::<Decimal>()
        .map_err(|_| RepositoryError::Decode(format!("invalid decimal in `{column}`: `{raw}`")))
}

pub(crate) fn parse_u32(column: &str, raw: i64) -> Result<u32, RepositoryError> {
    u32::try_from(raw)
        .map_err(|_| RepositoryError::Decode(format!("out-of-range value in `{column}`: {raw}")))
}

pub(crate) fn parse_timestamp(
    column: &str,
    raw: String,
) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| RepositoryError::Decode(format!("invalid timestamp in `{column}`: `{raw}`")))
}

pub(crate) fn parse_string_list(column: &str, raw: String) -> Result<Vec<String>, RepositoryError> {
    serde_json::from_str(&raw)
        .map_err(|_| RepositoryError::Decode(format!("invalid JSON list in `{column}`: `{raw}`")))
}
