use sqlx::{Executor, Row};

use crate::repositories::RepositoryError;
use crate::DbPool;

/// Shopper ids the conversation scenarios depend on.
const SEED_SHOPPER_IDS: &[&str] = &["u-aarav", "u-rohan", "u-priya"];

/// Products the scripted pairings resolve against. If any of these are
/// missing, the curated scenarios silently fall back to the general
/// algorithm, which makes the demo look broken.
const SCENARIO_PRODUCT_IDS: &[&str] =
    &["p-bwk-tee", "p-tss-tee", "p-as-shirt", "p-lp-trousers", "p-w-top", "p-aur-kurta", "p-fg-bag"];

const EXPECTED_PRODUCT_COUNT: i64 = 14;

/// Demo seed dataset: three named shoppers plus the fashion catalog.
pub struct DemoSeedDataset;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedCheck {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedVerification {
    pub checks: Vec<SeedCheck>,
}

impl SeedVerification {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }
}

impl DemoSeedDataset {
    pub const SQL: &'static str = include_str!("../../../config/fixtures/demo_seed.sql");

    pub async fn load(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;
        tx.execute(sqlx::raw_sql(Self::SQL)).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Verify the seed contract: every named shopper and scenario product is
    /// present and the catalog has its expected size.
    pub async fn verify(pool: &DbPool) -> Result<SeedVerification, RepositoryError> {
        let mut checks = Vec::new();

        for shopper_id in SEED_SHOPPER_IDS {
            let row = sqlx::query("SELECT COUNT(*) AS n FROM shopper WHERE id = ?")
                .bind(shopper_id)
                .fetch_one(pool)
                .await?;
            let count: i64 = row.try_get("n")?;
            checks.push(SeedCheck {
                name: format!("shopper:{shopper_id}"),
                passed: count == 1,
                detail: format!("expected 1 row, found {count}"),
            });
        }

        for product_id in SCENARIO_PRODUCT_IDS {
            let row = sqlx::query("SELECT COUNT(*) AS n FROM product WHERE id = ?")
                .bind(product_id)
                .fetch_one(pool)
                .await?;
            let count: i64 = row.try_get("n")?;
            checks.push(SeedCheck {
                name: format!("product:{product_id}"),
                passed: count == 1,
                detail: format!("expected 1 row, found {count}"),
            });
        }

        let row = sqlx::query("SELECT COUNT(*) AS n FROM product").fetch_one(pool).await?;
        let total: i64 = row.try_get("n")?;
        checks.push(SeedCheck {
            name: "product:count".to_owned(),
            passed: total == EXPECTED_PRODUCT_COUNT,
            detail: format!("expected {EXPECTED_PRODUCT_COUNT} products, found {total}"),
        });

        Ok(SeedVerification { checks })
    }
}

#[cfg(test)]
mod tests {
    use super::DemoSeedDataset;
    use crate::connection::connect_ephemeral;
    use crate::migrations::run_pending;
    use crate::repositories::{ProductRepository, ShopperRepository, SqlProductRepository, SqlShopperRepository};

    #[tokio::test]
    async fn seed_loads_and_verifies() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");
        DemoSeedDataset::load(&pool).await.expect("load seed");

        let verification = DemoSeedDataset::verify(&pool).await.expect("verify");
        assert!(verification.passed(), "failed checks: {:?}", verification.checks);
    }

    #[tokio::test]
    async fn seed_is_idempotent() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");
        DemoSeedDataset::load(&pool).await.expect("first load");
        DemoSeedDataset::load(&pool).await.expect("second load");
        assert!(DemoSeedDataset::verify(&pool).await.expect("verify").passed());
    }

    #[tokio::test]
    async fn seeded_rows_decode_through_repositories() {
        let pool = connect_ephemeral().await.expect("open db");
        run_pending(&pool).await.expect("migrate");
        DemoSeedDataset::load(&pool).await.expect("load seed");

        let products = SqlProductRepository::new(pool.clone()).list_all().await.expect("products");
        assert_eq!(products.len(), 14);

        let priya = SqlShopperRepository::new(pool)
            .find_by_name_like("priya")
            .await
            .expect("lookup")
            .expect("seeded");
        assert_eq!(priya.favorite_brands, vec!["W", "Aurelia", "Forever Glam"]);
    }
}
