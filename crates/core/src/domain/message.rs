use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::{ProductId, RecommendedProduct};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    Agent,
    Shopper,
}

/// Tap targets attached to an agent message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageAction {
    TrackOrder,
    AddToCart,
    Checkout,
    BrowseMore,
    Pay,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageButton {
    pub label: String,
    pub action: MessageAction,
}

impl MessageButton {
    pub fn new(label: impl Into<String>, action: MessageAction) -> Self {
        Self { label: label.into(), action }
    }
}

/// Read state used by the WhatsApp channel; absent on web chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    Sent,
    Delivered,
    Read,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub products: Vec<RecommendedProduct>,
    pub buttons: Vec<MessageButton>,
    pub sent_at: DateTime<Utc>,
    pub delivery: Option<DeliveryState>,
}

impl ConversationMessage {
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: Author::Agent,
            text: text.into(),
            products: Vec::new(),
            buttons: Vec::new(),
            sent_at: Utc::now(),
            delivery: None,
        }
    }

    pub fn shopper(text: impl Into<String>) -> Self {
        Self { author: Author::Shopper, ..Self::agent(text) }
    }

    pub fn with_products(mut self, products: Vec<RecommendedProduct>) -> Self {
        self.products = products;
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<MessageButton>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryState) -> Self {
        self.delivery = Some(delivery);
        self
    }
}

/// Append-only message log for one channel. The sequence is never mutated,
/// only extended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Ids of every product already surfaced in this conversation; new
    /// suggestions exclude these.
    pub fn shown_product_ids(&self) -> HashSet<ProductId> {
        self.messages
            .iter()
            .flat_map(|message| message.products.iter())
            .map(|recommended| recommended.product.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Author, ConversationMessage, MessageAction, MessageButton, Transcript};
    use crate::domain::product::{Product, ProductId, RecommendedProduct};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            brand: "Aurelia".to_owned(),
            name: "Embroidered Kurta".to_owned(),
            price: Decimal::from(1499),
            image_url: None,
            category: Some("Ethnic Wear".to_owned()),
            sizes: vec![],
            stock_count: 4,
        }
    }

    #[test]
    fn transcript_tracks_shown_products_across_messages() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationMessage::shopper("show me ethnic wear"));
        transcript.push(
            ConversationMessage::agent("here you go").with_products(vec![
                RecommendedProduct::plain(product("p-1"), "trending"),
                RecommendedProduct::plain(product("p-2"), "trending"),
            ]),
        );
        transcript.push(
            ConversationMessage::agent("and one more")
                .with_products(vec![RecommendedProduct::plain(product("p-3"), "new arrival")]),
        );

        let shown = transcript.shown_product_ids();
        assert_eq!(shown.len(), 3);
        assert!(shown.contains(&ProductId("p-2".to_owned())));
    }

    #[test]
    fn builders_set_author_and_buttons() {
        let message = ConversationMessage::agent("added to cart").with_buttons(vec![
            MessageButton::new("Checkout", MessageAction::Checkout),
            MessageButton::new("Browse More", MessageAction::BrowseMore),
        ]);
        assert_eq!(message.author, Author::Agent);
        assert_eq!(message.buttons.len(), 2);
        assert!(message.delivery.is_none());
    }
}
