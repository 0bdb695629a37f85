use shopmate_core::{AppConfig, LoadOptions};

pub fn run() -> String {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            let mut lines = Vec::new();
            lines.push(format!("database.url = {}", config.database.url));
            lines.push(format!("database.max_connections = {}", config.database.max_connections));
            lines.push(format!("database.timeout_secs = {}", config.database.timeout_secs));
            lines.push(format!("chat.typing_delay_ms = {}", config.chat.typing_delay_ms));
            lines.push(format!("chat.offer_gap_ms = {}", config.chat.offer_gap_ms));
            lines.push(format!("chat.payment_delay_ms = {}", config.chat.payment_delay_ms));
            lines.push(format!("chat.catalog_retry_max = {}", config.chat.catalog_retry_max));
            lines.push(format!(
                "chat.catalog_retry_backoff_ms = {}",
                config.chat.catalog_retry_backoff_ms
            ));
            lines.push(format!(
                "recommendation.discount_percent = {}",
                config.recommendation.discount_percent
            ));
            lines.push(format!(
                "recommendation.gold_discount_percent = {}",
                config.recommendation.gold_discount_percent
            ));
            lines.push(format!(
                "recommendation.expires_in_minutes = {}",
                config.recommendation.expires_in_minutes
            ));
            lines.push(format!("logging.level = {}", config.logging.level));
            lines.push(format!("logging.format = {:?}", config.logging.format));
            lines.join("\n")
        }
        Err(error) => format!("config error: {error}"),
    }
}
