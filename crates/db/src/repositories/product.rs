use sqlx::{sqlite::SqliteRow, Row};

use shopmate_core::domain::product::{Product, ProductId};

use super::{parse_decimal, parse_string_list, parse_u32, ProductRepository, RepositoryError};
use crate::DbPool;

const SELECT_COLUMNS: &str =
    "id, brand, name, price, image_url, category, sizes, stock_count";

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows =
            sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM product ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(product_from_row).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM product WHERE id = ?"))
            .bind(&id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.map(product_from_row).transpose()
    }

    async fn find_by_name_like(
        &self,
        fragment: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let pattern = format!("%{fragment}%");
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM product WHERE name LIKE ? COLLATE NOCASE ORDER BY rowid LIMIT 1"
        ))
        .bind(pattern)
        .fetch_optional(&self.pool)
        .await?;
        row.map(product_from_row).transpose()
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let sizes = serde_json::to_string(&product.sizes)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;
        sqlx::query(
            "INSERT INTO product (id, brand, name, price, image_url, category, sizes, stock_count)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                brand = excluded.brand,
                name = excluded.name,
                price = excluded.price,
                image_url = excluded.image_url,
                category = excluded.category,
                sizes = excluded.sizes,
                stock_count = excluded.stock_count",
        )
        .bind(&product.id.0)
        .bind(&product.brand)
        .bind(&product.name)
        .bind(product.price.to_string())
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(sizes)
        .bind(i64::from(product.stock_count))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn product_from_row(row: SqliteRow) -> Result<Product, RepositoryError> {
    Ok(Product {
        id: ProductId(row.try_get("id")?),
        brand: row.try_get("brand")?,
        name: row.try_get("name")?,
        price: parse_decimal("price", row.try_get("price")?)?,
        image_url: row.try_get("image_url")?,
        category: row.try_get("category")?,
        sizes: parse_string_list("sizes", row.try_get("sizes")?)?,
        stock_count: parse_u32("stock_count", row.try_get("stock_count")?)?,
    })
}
