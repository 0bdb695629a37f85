//! External store for the shopping assistant: SQLite-backed repositories for
//! shoppers, the product catalog, session-scoped carts, and orders, plus
//! in-memory doubles for store-free tests.

pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_ephemeral, connect_with_settings, DbPool};
pub use fixtures::{DemoSeedDataset, SeedCheck, SeedVerification};
pub use repositories::{
    CartRepository, InMemoryCartRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryShopperRepository, OrderRepository, ProductRepository, RepositoryError,
    ShopperRepository, SqlCartRepository, SqlOrderRepository, SqlProductRepository,
    SqlShopperRepository,
};
