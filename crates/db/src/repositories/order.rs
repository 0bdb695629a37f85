use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

use shopmate_core::domain::order::{Order, OrderId, OrderLine, OrderStatus};
use shopmate_core::domain::product::ProductId;
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::ShopperId;

use super::{parse_decimal, parse_timestamp, OrderRepository, RepositoryError};
use crate::DbPool;

const SELECT_COLUMNS: &str =
    "id, shopper_id, total_amount, discount_applied, status, session_id, created_at";

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn create(&self, order: Order, lines: Vec<OrderLine>) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO shop_order (id, shopper_id, total_amount, discount_applied, status, session_id, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id.0.to_string())
        .bind(&order.shopper_id.0)
        .bind(order.total_amount.to_string())
        .bind(order.discount_applied.to_string())
        .bind(order.status.as_str())
        .bind(order.session_id.as_ref().map(|session| session.0.clone()))
        .bind(order.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                "INSERT INTO shop_order_line (order_id, product_id, quantity, unit_price)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(line.order_id.0.to_string())
            .bind(&line.product_id.0)
            .bind(i64::from(line.quantity))
            .bind(line.unit_price.to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM shop_order WHERE id = ?"))
            .bind(id.0.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(order_from_row).transpose()
    }

    async fn list_for_shopper(
        &self,
        shopper_id: &ShopperId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM shop_order WHERE shopper_id = ? ORDER BY created_at DESC"
        ))
        .bind(&shopper_id.0)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(order_from_row).collect()
    }

    async fn lines_for_order(&self, id: &OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT order_id, product_id, quantity, unit_price
             FROM shop_order_line WHERE order_id = ? ORDER BY rowid",
        )
        .bind(id.0.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(line_from_row).collect()
    }
}

fn order_from_row(row: SqliteRow) -> Result<Order, RepositoryError> {
    let id_raw = row.try_get::<String, _>("id")?;
    let id = Uuid::parse_str(&id_raw)
        .map_err(|_| RepositoryError::Decode(format!("invalid order id `{id_raw}`")))?;
    let status_raw = row.try_get::<String, _>("status")?;
    let status = OrderStatus::parse(&status_raw)
        .ok_or_else(|| RepositoryError::Decode(format!("unknown order status `{status_raw}`")))?;

    Ok(Order {
        id: OrderId(id),
        shopper_id: ShopperId(row.try_get("shopper_id")?),
        total_amount: parse_decimal("total_amount", row.try_get("total_amount")?)?,
        discount_applied: parse_decimal("discount_applied", row.try_get("discount_applied")?)?,
        status,
        session_id: row.try_get::<Option<String>, _>("session_id")?.map(SessionId),
        created_at: parse_timestamp("created_at", row.try_get("created_at")?)?,
    })
}

fn line_from_row(row: SqliteRow) -> Result<OrderLine, RepositoryError> {
    let order_id_raw = row.try_get::<String, _>("order_id")?;
    let order_id = Uuid::parse_str(&order_id_raw)
        .map_err(|_| RepositoryError::Decode(format!("invalid order id `{order_id_raw}`")))?;
    Ok(OrderLine {
        order_id: OrderId(order_id),
        product_id: ProductId(row.try_get("product_id")?),
        quantity: super::parse_u32("quantity", row.try_get("quantity")?)?,
        unit_price: parse_decimal("unit_price", row.try_get("unit_price")?)?,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopmate_core::chrono::Utc;

    use shopmate_core::domain::order::{Order, OrderId, OrderLine, OrderStatus};
    use shopmate_core::domain::product::ProductId;
    use shopmate_core::domain::session::SessionId;
    use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

    use super::SqlOrderRepository;
    use crate::connection::connect_ephemeral;
    use crate::migrations::run_pending;
    use crate::repositories::{OrderRepository, ShopperRepository, SqlShopperRepository};

    #[tokio::test]
    async fn create_and_read_back_with_lines() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");

        SqlShopperRepository::new(pool.clone())
            .save(Shopper {
                id: ShopperId("u-1".to_owned()),
                name: "Rohan Mehta".to_owned(),
                style_preference: None,
                favorite_brands: vec![],
                size: None,
                loyalty_tier: LoyaltyTier::Silver,
                loyalty_points: 450,
            })
            .await
            .expect("seed shopper");

        let repo = SqlOrderRepository::new(pool);
        let order = Order {
            id: OrderId::generate(),
            shopper_id: ShopperId("u-1".to_owned()),
            total_amount: Decimal::from(1839),
            discount_applied: Decimal::from(460),
            status: OrderStatus::Confirmed,
            session_id: Some(SessionId("SES-TEST".to_owned())),
            created_at: Utc::now(),
        };
        let line = OrderLine {
            order_id: order.id.clone(),
            product_id: ProductId("p-lp-trousers".to_owned()),
            quantity: 1,
            unit_price: Decimal::from(2299),
        };

        repo.create(order.clone(), vec![line]).await.expect("create order");

        let found = repo.find_by_id(&order.id).await.expect("find").expect("present");
        assert_eq!(found.total_amount, order.total_amount);
        assert_eq!(found.status, OrderStatus::Confirmed);
        assert_eq!(found.session_id, order.session_id);

        let listed = repo.list_for_shopper(&order.shopper_id).await.expect("list");
        assert_eq!(listed.len(), 1);

        let lines = repo.lines_for_order(&order.id).await.expect("lines");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price, Decimal::from(2299));
    }
}
