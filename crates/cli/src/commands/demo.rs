//! Scripted conversation demo: seeds an in-memory store, opens the chosen
//! channel for the chosen shopper, and prints the transcript.

use std::sync::Arc;

use shopmate_chat::{
    CartService, CatalogLoader, CatalogRetryPolicy, HandoffPayload, WebChatSession,
    WhatsAppSession,
};
use shopmate_core::domain::message::{Author, ConversationMessage, MessageAction};
use shopmate_core::domain::session::SessionId;
use shopmate_core::{AppConfig, LoadOptions};
use shopmate_db::{
    DemoSeedDataset, ShopperRepository, SqlCartRepository, SqlOrderRepository,
    SqlProductRepository, SqlShopperRepository,
};

use super::CommandResult;

pub async fn run(shopper_fragment: &str, channel: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::failed(format!("config error: {error}")),
    };

    // The demo always runs on a fresh ephemeral store.
    let pool = match shopmate_db::connect_ephemeral().await {
        Ok(pool) => pool,
        Err(error) => return CommandResult::failed(format!("database error: {error}")),
    };
    if let Err(error) = shopmate_db::migrations::run_pending(&pool).await {
        return CommandResult::failed(format!("migration error: {error}"));
    }
    if let Err(error) = DemoSeedDataset::load(&pool).await {
        return CommandResult::failed(format!("seed error: {error}"));
    }

    let shoppers = Arc::new(SqlShopperRepository::new(pool.clone()));
    let products = Arc::new(SqlProductRepository::new(pool.clone()));

    let shopper = match shoppers.find_by_name_like(shopper_fragment).await {
        Ok(Some(shopper)) => shopper,
        Ok(None) => return CommandResult::failed(format!("no shopper matches `{shopper_fragment}`")),
        Err(error) => return CommandResult::failed(format!("shopper lookup failed: {error}")),
    };
    let session_id = SessionId::generate();

    match channel {
        "web" => {
            let mut session =
                WebChatSession::new(shopper.clone(), session_id, config.chat.clone());
            let mut lines = Vec::new();
            if let Some(greeting) = session.open(products).await {
                render(&mut lines, &greeting);
            }
            for utterance in ["show me formal wear", "show me more", "help"] {
                render_shopper(&mut lines, utterance);
                match session.handle_utterance(utterance).await {
                    Ok(outcome) => render(&mut lines, &outcome.reply),
                    Err(error) => lines.push(format!("-- turn rejected: {error}")),
                }
            }
            CommandResult::ok(lines.join("\n"))
        }
        "whatsapp" => {
            let orders = Arc::new(SqlOrderRepository::new(pool.clone()));
            let cart =
                CartService::new(Arc::new(SqlCartRepository::new(pool)), products.clone());
            let loader = CatalogLoader::new(
                products,
                CatalogRetryPolicy::new(
                    config.chat.catalog_retry_max,
                    config.chat.catalog_retry_backoff_ms,
                ),
            );
            let mut session = WhatsAppSession::new(
                session_id,
                shoppers,
                orders,
                cart,
                loader,
                config.chat.clone(),
                config.recommendation.clone(),
            );
            session
                .open(HandoffPayload {
                    order_id: Some("ORD-2025-5678".to_owned()),
                    product_name: None,
                    shopper_name: Some(shopper.name.clone()),
                    shopper_id: Some(shopper.id.0.clone()),
                    session_id: None,
                })
                .await;
            if session.selected_offer().is_some() {
                session.handle_action(MessageAction::AddToCart).await;
                session.handle_action(MessageAction::Checkout).await;
                session.handle_action(MessageAction::Pay).await;
            }

            let mut lines = Vec::new();
            for message in session.transcript().messages() {
                render(&mut lines, message);
            }
            CommandResult::ok(lines.join("\n"))
        }
        other => CommandResult::failed(format!("unknown channel `{other}` (use web or whatsapp)")),
    }
}

fn render(lines: &mut Vec<String>, message: &ConversationMessage) {
    let speaker = match message.author {
        Author::Agent => "agent",
        Author::Shopper => "shopper",
    };
    lines.push(format!("[{speaker}] {}", message.text.replace('\n', " / ")));
    for recommended in &message.products {
        lines.push(format!(
            "         product: {} ({}) - {}",
            recommended.product.name, recommended.product.brand, recommended.reason
        ));
    }
    if !message.buttons.is_empty() {
        let labels: Vec<&str> =
            message.buttons.iter().map(|button| button.label.as_str()).collect();
        lines.push(format!("         actions: {}", labels.join(" | ")));
    }
}

fn render_shopper(lines: &mut Vec<String>, text: &str) {
    lines.push(format!("[shopper] {text}"));
}
