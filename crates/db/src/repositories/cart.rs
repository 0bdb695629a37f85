use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use shopmate_core::domain::cart::{CartItem, CartItemId};
use shopmate_core::domain::product::ProductId;
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::ShopperId;

use super::{parse_u32, CartRepository, RepositoryError};
use crate::DbPool;

const SELECT_COLUMNS: &str = "id, shopper_id, product_id, quantity, session_id";

pub struct SqlCartRepository {
    pool: DbPool,
}

impl SqlCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CartRepository for SqlCartRepository {
    async fn items_for(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM cart_item WHERE shopper_id = ? AND session_id = ? ORDER BY rowid"
        ))
        .bind(&shopper_id.0)
        .bind(&session_id.0)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(item_from_row).collect()
    }

    async fn find_item(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM cart_item
             WHERE shopper_id = ? AND session_id = ? AND product_id = ?"
        ))
        .bind(&shopper_id.0)
        .bind(&session_id.0)
        .bind(&product_id.0)
        .fetch_optional(&self.pool)
        .await?;
        row.map(item_from_row).transpose()
    }

    async fn insert(&self, item: CartItem) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO cart_item (id, shopper_id, product_id, quantity, session_id)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(item.id.0.to_string())
        .bind(&item.shopper_id.0)
        .bind(&item.product_id.0)
        .bind(i64::from(item.quantity))
        .bind(&item.session_id.0)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_quantity(
        &self,
        id: &CartItemId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE cart_item SET quantity = ? WHERE id = ?")
            .bind(i64::from(quantity))
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove(&self, id: &CartItemId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE id = ?")
            .bind(id.0.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear(
        &self,
        shopper_id: &ShopperId,
        session_id: &SessionId,
    ) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE shopper_id = ? AND session_id = ?")
            .bind(&shopper_id.0)
            .bind(&session_id.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn item_from_row(row: SqliteRow) -> Result<CartItem, RepositoryError> {
    let id_raw = row.try_get::<String, _>("id")?;
    let id = Uuid::parse_str(&id_raw)
        .map_err(|_| RepositoryError::Decode(format!("invalid cart item id `{id_raw}`")))?;
    Ok(CartItem {
        id: CartItemId(id),
        shopper_id: ShopperId(row.try_get("shopper_id")?),
        product_id: ProductId(row.try_get("product_id")?),
        quantity: parse_u32("quantity", row.try_get("quantity")?)?,
        session_id: SessionId(row.try_get("session_id")?),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use shopmate_core::domain::cart::CartItem;
    use shopmate_core::domain::product::{Product, ProductId};
    use shopmate_core::domain::session::SessionId;
    use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

    use super::SqlCartRepository;
    use crate::connection::connect_ephemeral;
    use crate::migrations::run_pending;
    use crate::repositories::{
        CartRepository, ProductRepository, ShopperRepository, SqlProductRepository,
        SqlShopperRepository,
    };
    use crate::DbPool;

    async fn seeded_pool() -> DbPool {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");

        SqlShopperRepository::new(pool.clone())
            .save(Shopper {
                id: ShopperId("u-1".to_owned()),
                name: "Aarav Kumar".to_owned(),
                style_preference: None,
                favorite_brands: vec![],
                size: None,
                loyalty_tier: LoyaltyTier::Bronze,
                loyalty_points: 0,
            })
            .await
            .expect("seed shopper");
        SqlProductRepository::new(pool.clone())
            .save(Product {
                id: ProductId("p-1".to_owned()),
                brand: "Bewakoof".to_owned(),
                name: "Graphic Tee".to_owned(),
                price: Decimal::from(999),
                image_url: None,
                category: Some("Tees".to_owned()),
                sizes: vec![],
                stock_count: 10,
            })
            .await
            .expect("seed product");
        pool
    }

    #[tokio::test]
    async fn insert_update_remove_round_trips() {
        let pool = seeded_pool().await;
        let repo = SqlCartRepository::new(pool);
        let shopper_id = ShopperId("u-1".to_owned());
        let session_id = SessionId("SES-TEST".to_owned());

        let item =
            CartItem::new(shopper_id.clone(), ProductId("p-1".to_owned()), session_id.clone());
        repo.insert(item.clone()).await.expect("insert");

        let found = repo
            .find_item(&shopper_id, &session_id, &item.product_id)
            .await
            .expect("find");
        assert_eq!(found.as_ref().map(|i| i.quantity), Some(1));

        repo.update_quantity(&item.id, 3).await.expect("update");
        let items = repo.items_for(&shopper_id, &session_id).await.expect("list");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);

        repo.remove(&item.id).await.expect("remove");
        assert!(repo.items_for(&shopper_id, &session_id).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn clear_only_touches_the_given_session() {
        let pool = seeded_pool().await;
        let repo = SqlCartRepository::new(pool);
        let shopper_id = ShopperId("u-1".to_owned());
        let kiosk = SessionId("SES-KIOSK".to_owned());
        let mobile = SessionId("SES-MOBILE".to_owned());

        repo.insert(CartItem::new(shopper_id.clone(), ProductId("p-1".to_owned()), kiosk.clone()))
            .await
            .expect("insert kiosk");
        repo.insert(CartItem::new(shopper_id.clone(), ProductId("p-1".to_owned()), mobile.clone()))
            .await
            .expect("insert mobile");

        repo.clear(&shopper_id, &kiosk).await.expect("clear kiosk");
        assert!(repo.items_for(&shopper_id, &kiosk).await.expect("kiosk").is_empty());
        assert_eq!(repo.items_for(&shopper_id, &mobile).await.expect("mobile").len(), 1);
    }
}
