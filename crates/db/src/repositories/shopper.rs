use sqlx::{sqlite::SqliteRow, Row};

use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

use super::{parse_string_list, parse_u32, RepositoryError, ShopperRepository};
use crate::DbPool;

const SELECT_COLUMNS: &str =
    "id, name, style_preference, favorite_brands, size, loyalty_tier, loyalty_points";

pub struct SqlShopperRepository {
    pool: DbPool,
}

impl SqlShopperRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ShopperRepository for SqlShopperRepository {
    async fn list_all(&self) -> Result<Vec<Shopper>, RepositoryError> {
        let rows =
            sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM shopper ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(shopper_from_row).collect()
    }

    async fn find_by_id(&self, id: &ShopperId) -> Result<Option<Shopper>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM shopper WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.map(shopper_from_row).transpose()
    }

    async fn find_by_name_like(
        &self,
        fragment: &str,
    ) -> Result<Option<Shopper>, RepositoryError> {
        let pattern = format!("%{fragment}%");
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM shopper WHERE name LIKE ? COLLATE NOCASE ORDER BY rowid LIMIT 1"
        ))
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await?;
        row.map(shopper_from_row).transpose()
    }

    async fn save(&self, shopper: Shopper) -> Result<(), RepositoryError> {
        let favorites = serde_json::to_string(&shopper.favorite_brands)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;
        sqlx::query(
            "INSERT INTO shopper (id, name, style_preference, favorite_brands, size, loyalty_tier, loyalty_points)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                style_preference = excluded.style_preference,
                favorite_brands = excluded.favorite_brands,
                size = excluded.size,
                loyalty_tier = excluded.loyalty_tier,
                loyalty_points = excluded.loyalty_points",
        )
        .bind(&shopper.id.0)
        .bind(&shopper.name)
        .bind(&shopper.style_preference)
        .bind(favorites)
        .bind(&shopper.size)
        .bind(shopper.loyalty_tier.as_str())
        .bind(i64::from(shopper.loyalty_points))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn shopper_from_row(row: SqliteRow) -> Result<Shopper, RepositoryError> {
    let tier_raw = row.try_get::<String, _>("loyalty_tier")?;
    Ok(Shopper {
        id: ShopperId(row.try_get("id")?),
        name: row.try_get("name")?,
        style_preference: row.try_get("style_preference")?,
        favorite_brands: parse_string_list("favorite_brands", row.try_get("favorite_brands")?)?,
        size: row.try_get("size")?,
        // Unknown tier strings degrade to Bronze rather than failing the read.
        loyalty_tier: LoyaltyTier::parse(&tier_raw),
        loyalty_points: parse_u32("loyalty_points", row.try_get("loyalty_points")?)?,
    })
}

#[cfg(test)]
mod tests {
    use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};

    use super::SqlShopperRepository;
    use crate::connection::connect_ephemeral;
    use crate::migrations::run_pending;
    use crate::repositories::ShopperRepository;

    fn fixture() -> Shopper {
        Shopper {
            id: ShopperId("u-test".to_owned()),
            name: "Priya Sharma".to_owned(),
            style_preference: Some("ethnic".to_owned()),
            favorite_brands: vec!["W".to_owned(), "Aurelia".to_owned()],
            size: Some("S".to_owned()),
            loyalty_tier: LoyaltyTier::Gold,
            loyalty_points: 1000,
        }
    }

    #[tokio::test]
    async fn save_and_lookup_round_trips() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");
        let repo = SqlShopperRepository::new(pool);

        let shopper = fixture();
        repo.save(shopper.clone()).await.expect("save");

        assert_eq!(repo.find_by_id(&shopper.id).await.expect("by id"), Some(shopper.clone()));
        let by_name = repo.find_by_name_like("priya").await.expect("by name");
        assert_eq!(by_name.map(|s| s.id), Some(shopper.id));
        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn missing_shopper_reads_as_none() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");
        let repo = SqlShopperRepository::new(pool);
        assert_eq!(repo.find_by_name_like("nobody").await.expect("search"), None);
    }
}
