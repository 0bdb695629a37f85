use serde_json::json;

use shopmate_core::{RecommendationConfig, RecommendationEngine};
use shopmate_db::{
    ProductRepository, ShopperRepository, SqlProductRepository, SqlShopperRepository,
};

use super::CommandResult;

pub async fn run(shopper_fragment: &str, product_fragment: &str) -> CommandResult {
    let (config, pool) = match super::open_store().await {
        Ok(opened) => opened,
        Err(error) => return CommandResult::failed(error),
    };

    let shoppers = SqlShopperRepository::new(pool.clone());
    let products = SqlProductRepository::new(pool);

    let shopper = match shoppers.find_by_name_like(shopper_fragment).await {
        Ok(Some(shopper)) => shopper,
        Ok(None) => {
            return CommandResult::failed(format!("no shopper matches `{shopper_fragment}`"))
        }
        Err(error) => return CommandResult::failed(format!("shopper lookup failed: {error}")),
    };
    let source = match products.find_by_name_like(product_fragment).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return CommandResult::failed(format!("no product matches `{product_fragment}`"))
        }
        Err(error) => return CommandResult::failed(format!("product lookup failed: {error}")),
    };
    let catalog = match products.list_all().await {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::failed(format!("catalog read failed: {error}")),
    };

    let recommendations = RecommendationEngine::new().recommend(
        &source,
        &catalog,
        &shopper,
        &RecommendationConfig::time_limited_offer(
            config.recommendation.discount_percent,
            config.recommendation.expires_in_minutes,
        ),
    );

    let rendered: Vec<_> = recommendations
        .iter()
        .map(|recommended| {
            json!({
                "product_id": recommended.product.id.0,
                "brand": recommended.product.brand,
                "name": recommended.product.name,
                "price": recommended.product.price.to_string(),
                "discounted_price": recommended.discounted_price().to_string(),
                "discount_percent": recommended.discount_percent,
                "expires_in_minutes": recommended.expires_in_minutes,
                "reason": recommended.reason,
            })
        })
        .collect();

    let output = json!({
        "shopper": shopper.name,
        "source_product": source.name,
        "recommendations": rendered,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(rendered) => CommandResult::ok(rendered),
        Err(error) => CommandResult::failed(format!("render failed: {error}")),
    }
}
