//! Store-free repository implementations for deterministic tests and the
//! scripted demo. Same contracts as the SQL repositories, backed by
//! `RwLock<HashMap>`.

use std::collections::HashMap;

use tokio::sync::RwLock;

use shopmate_core::domain::cart::{CartItem, CartItemId};
use shopmate_core::domain::order::{Order, OrderId, OrderLine};
use shopmate_core::domain::product::{Product, ProductId};
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::{Shopper, ShopperId};

use super::{
    CartRepository, OrderRepository, ProductRepository, RepositoryError, ShopperRepository,
};

#[derive(Default)]
pub struct InMemoryProductRepository {
    // Insertion order is the catalog order candidates are taken in.
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn find_by_name_like(
        &self,
        fragment: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let fragment = fragment.to_lowercase();
        let products = self.products.read().await;
        Ok(products.iter().find(|product| product.name_lower().contains(&fragment)).cloned())
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|existing| existing.id == product.id) {
            Some(existing) => *existing = product,
            None => products.push(product),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryShopperRepository {
    shoppers: RwLock<Vec<Shopper>>,
}

impl InMemoryShopperRepository {
    pub fn with_shoppers(shoppers: Vec<Shopper>) -> Self {
        Self { shoppers: RwLock::new(shoppers) }
    }
}

#[async_trait::async_trait]
impl ShopperRepository for InMemoryShopperRepository {
    async fn list_all(&self) -> Result<Vec<Shopper>, RepositoryError> {
        Ok(self.shoppers.read().await.clone())
    }

    async fn find_by_id(&self, id: &ShopperId) -> Result<Option<Shopper>, RepositoryError> {
        let shoppers = self.shoppers.read().await;
        Ok(shoppers.iter().find(|shopper| &shopper.id == id).cloned())
    }

    async fn find_by_name_like(
        &self,
        fragment: &str,
    ) -> Result<Option<Shopper>, RepositoryError> {
        let fragment = fragment.to_lowercase();
        let shoppers = self.shoppers.read().await;
        Ok(shoppers.iter().find(|shopper| shopper.name_lower().contains(&fragment)).cloned())
    }

    async fn save(&self, shopper: Shopper) -> Result<(), RepositoryError> {
        let mut shoppers = self.shoppers.write().await;
        match shoppers.iter_mut().find(|existing| existing.id == shopper.id) {
            Some(existing) => *existing = shopper,
            None => shoppers.push(shopper),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    items: RwLock<Vec<CartItem>>,
}

#[async_trait::async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn items_for(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| &item.shopper_id == shopper_id && &item.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn find_item(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .find(|item| {
                &item.shopper_id == shopper_id
                    && &item.session_id == session_id
                    && &item.product_id == product_id
            })
            .cloned())
    }

    async fn insert(&self, item: CartItem) -> Result<(), RepositoryError> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        if let Some(item) = items.iter_mut().find(|item| &item.id == id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn remove(&self, id: &CartItemId) -> Result<(), RepositoryError> {
        self.items.write().await.retain(|item| &item.id != id);
        Ok(())
    }

    async fn clear(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<(), RepositoryError> {
        self.items
            .write()
            .await
            .retain(|item| !(&item.shopper_id == shopper_id && &item.session_id == session_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<OrderId, (Order, Vec<OrderLine>)>>,
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order, lines: Vec<OrderLine>) -> Result<(), RepositoryError> {
        self.orders.write().await.insert(order.id.clone(), (order, lines));
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.read().await.get(id).map(|(order, _)| order.clone()))
    }

    async fn list_for_shopper(
        &self,
        shopper_id: &ShopperId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let orders = self.orders.read().await;
        let mut found: Vec<Order> = orders
            .values()
            .filter(|(order, _)| &order.shopper_id == shopper_id)
            .map(|(order, _)| order.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn lines_for_order(&self, id: &OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        Ok(self.orders.read().await.get(id).map(|(_, lines)| lines.clone()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopmate_core::chrono::Utc;

    use shopmate_core::domain::cart::CartItem;
    use shopmate_core::domain::order::{Order, OrderId, OrderStatus};
    use shopmate_core::domain::product::{Product, ProductId};
    use shopmate_core::domain::session::SessionId;
    use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

    use super::{
        InMemoryCartRepository, InMemoryOrderRepository, InMemoryProductRepository,
        InMemoryShopperRepository,
    };
    use crate::repositories::{
        CartRepository, OrderRepository, ProductRepository, ShopperRepository,
    };

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            brand: "W".to_owned(),
            name: name.to_owned(),
            price: Decimal::from(1299),
            image_url: None,
            category: None,
            sizes: vec![],
            stock_count: 3,
        }
    }

    #[tokio::test]
    async fn product_repo_preserves_catalog_order() {
        let repo = InMemoryProductRepository::with_products(vec![
            product("p-1", "First Top"),
            product("p-2", "Second Top"),
        ]);
        repo.save(product("p-3", "Third Top")).await.expect("save");

        let all = repo.list_all().await.expect("list");
        let ids: Vec<&str> = all.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-2", "p-3"]);

        let found = repo.find_by_name_like("SECOND").await.expect("search");
        assert_eq!(found.map(|p| p.id.0), Some("p-2".to_owned()));
    }

    #[tokio::test]
    async fn shopper_repo_round_trip() {
        let repo = InMemoryShopperRepository::default();
        repo.save(Shopper {
            id: ShopperId("u-1".to_owned()),
            name: "Priya Sharma".to_owned(),
            style_preference: None,
            favorite_brands: vec![],
            size: None,
            loyalty_tier: LoyaltyTier::Gold,
            loyalty_points: 1000,
        })
        .await
        .expect("save");

        let found = repo.find_by_name_like("priya").await.expect("search");
        assert_eq!(found.map(|s| s.loyalty_tier), Some(LoyaltyTier::Gold));
    }

    #[tokio::test]
    async fn cart_repo_scopes_by_session() {
        let repo = InMemoryCartRepository::default();
        let shopper_id = ShopperId("u-1".to_owned());
        let session = SessionId("SES-A".to_owned());
        let other = SessionId("SES-B".to_owned());

        repo.insert(CartItem::new(shopper_id.clone(), ProductId("p-1".to_owned()), session.clone()))
            .await
            .expect("insert");
        assert_eq!(repo.items_for(&shopper_id, &session).await.expect("items").len(), 1);
        assert!(repo.items_for(&shopper_id, &other).await.expect("items").is_empty());
    }

    #[tokio::test]
    async fn order_repo_round_trip() {
        let repo = InMemoryOrderRepository::default();
        let order = Order {
            id: OrderId::generate(),
            shopper_id: ShopperId("u-1".to_owned()),
            total_amount: Decimal::from(999),
            discount_applied: Decimal::ZERO,
            status: OrderStatus::Confirmed,
            session_id: None,
            created_at: Utc::now(),
        };
        repo.create(order.clone(), vec![]).await.expect("create");
        assert_eq!(repo.find_by_id(&order.id).await.expect("find").map(|o| o.id), Some(order.id));
    }
}
