//! WhatsApp channel runtime: picks up a kiosk hand-off, confirms the order,
//! walks the shopper through tracking, time-limited cross-brand offers, cart
//! updates, and a simulated payment. All pacing is config-driven and runs on
//! tokio time, so tests drive it virtually.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use shopmate_core::config::{ChatConfig, RecommendationDefaults};
use shopmate_core::domain::message::{
    ConversationMessage, DeliveryState, MessageAction, MessageButton, Transcript,
};
use shopmate_core::domain::order::{Order, OrderId, OrderLine, OrderStatus};
use shopmate_core::domain::product::{Product, RecommendedProduct};
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::{LoyaltyTier, Shopper, ShopperId};
use shopmate_core::flows::{
    ChatAction, ChatEvent, ChatState, FlowContext, FlowEngine, WhatsAppFlow,
};
use shopmate_core::recommend::{
    is_scripted_shopper, recommendation_reason, RecommendationConfig, RecommendationEngine,
};
use shopmate_core::chrono::Utc;
use shopmate_db::{OrderRepository, ShopperRepository};

use crate::cart::CartService;
use crate::catalog::CatalogLoader;
use crate::handoff::HandoffPayload;
use crate::messages::{self, PaymentMethod};
use crate::timer::{OfferExpired, OfferTimerHandle};

const DEFAULT_ORDER_ID: &str = "ORD-2025-5678";

/// Per-shopper keyword fallbacks for resolving an offer source product when
/// neither the hand-off nor the cart names one.
const SOURCE_FALLBACKS: &[(&str, &[&str], &[&str])] = &[
    ("rohan", &["allen solly"], &["blue", "shirt"]),
    ("aarav", &["bewakoof"], &["oversized", "graphic", "tee"]),
    ("priya", &["w white floral", "white floral"], &[]),
];

pub struct WhatsAppSession {
    engine: FlowEngine<WhatsAppFlow>,
    state: ChatState,
    transcript: Transcript,
    shopper: Option<Shopper>,
    handoff: HandoffPayload,
    order_id_display: String,
    session_id: SessionId,
    shoppers: Arc<dyn ShopperRepository>,
    orders: Arc<dyn OrderRepository>,
    cart: CartService,
    catalog_loader: CatalogLoader,
    catalog: Vec<Product>,
    selected: Option<RecommendedProduct>,
    payment_method: PaymentMethod,
    config: ChatConfig,
    defaults: RecommendationDefaults,
    recommender: RecommendationEngine,
    timers: Vec<OfferTimerHandle>,
    expiry_tx: mpsc::UnboundedSender<OfferExpired>,
    expiry_rx: mpsc::UnboundedReceiver<OfferExpired>,
}

impl WhatsAppSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session_id: SessionId,
        shoppers: Arc<dyn ShopperRepository>,
        orders: Arc<dyn OrderRepository>,
        cart: CartService,
        catalog_loader: CatalogLoader,
        config: ChatConfig,
        defaults: RecommendationDefaults,
    ) -> Self {
        let engine = FlowEngine::new(WhatsAppFlow);
        let state = engine.initial_state();
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        Self {
            engine,
            state,
            transcript: Transcript::new(),
            shopper: None,
            handoff: HandoffPayload::default(),
            order_id_display: DEFAULT_ORDER_ID.to_owned(),
            session_id,
            shoppers,
            orders,
            cart,
            catalog_loader,
            catalog: Vec::new(),
            selected: None,
            payment_method: PaymentMethod::default(),
            config,
            defaults,
            recommender: RecommendationEngine::new(),
            timers: Vec::new(),
            expiry_tx,
            expiry_rx,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn selected_offer(&self) -> Option<&RecommendedProduct> {
        self.selected.as_ref()
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Offers whose countdown has fired since the last call. The transcript
    /// itself is append-only and keeps the discount text; expiry only feeds
    /// live displays.
    pub fn expired_offers(&mut self) -> Vec<OfferExpired> {
        let mut expired = Vec::new();
        while let Ok(notification) = self.expiry_rx.try_recv() {
            expired.push(notification);
        }
        expired
    }

    fn shopper_name_lower(&self) -> String {
        self.handoff
            .shopper_name
            .clone()
            .or_else(|| self.shopper.as_ref().map(|shopper| shopper.name.clone()))
            .unwrap_or_default()
            .to_lowercase()
    }

    fn flow_context(&self) -> FlowContext {
        FlowContext {
            shopper_known: self.shopper.is_some(),
            transcript_empty: self.transcript.is_empty(),
            scripted_shopper: is_scripted_shopper(&self.shopper_name_lower()),
        }
    }

    fn push_agent(&mut self, message: ConversationMessage) {
        self.transcript.push(message.with_delivery(DeliveryState::Delivered));
    }

    fn push_shopper(&mut self, text: &str) {
        self.transcript
            .push(ConversationMessage::shopper(text).with_delivery(DeliveryState::Read));
    }

    async fn typing_pause(&self) {
        tokio::time::sleep(Duration::from_millis(self.config.typing_delay_ms)).await;
    }

    /// Open the channel from a hand-off (kiosk or same-device). Resolves the
    /// shopper, confirms the order, and either offers tracking or schedules
    /// the upsell directly for scripted shoppers.
    pub async fn open(&mut self, handoff: HandoffPayload) {
        self.handoff = handoff;
        if let Some(order_id) = &self.handoff.order_id {
            self.order_id_display = order_id.clone();
        }

        self.shopper = self.resolve_shopper().await;

        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::OrderIdResolved, &context)
        else {
            return;
        };
        self.state = outcome.to;

        let mut confirmation =
            ConversationMessage::agent(messages::order_confirmation(&self.order_id_display));
        if outcome.actions.contains(&ChatAction::OfferTrackAction) {
            confirmation = confirmation
                .with_buttons(vec![MessageButton::new("Track Order", MessageAction::TrackOrder)]);
        }
        self.push_agent(confirmation);
        info!(
            session_id = %self.session_id.0,
            order_id = %self.order_id_display,
            scripted = context.scripted_shopper,
            "whatsapp channel opened"
        );

        if outcome.actions.contains(&ChatAction::ScheduleOfferPresentation) {
            tokio::time::sleep(Duration::from_millis(self.config.offer_gap_ms)).await;
            self.request_offers().await;
        }
    }

    async fn resolve_shopper(&self) -> Option<Shopper> {
        if let Some(shopper_id) = &self.handoff.shopper_id {
            match self.shoppers.find_by_id(&ShopperId(shopper_id.clone())).await {
                Ok(Some(shopper)) => return Some(shopper),
                Ok(None) => {}
                Err(error) => warn!(error = %error, "shopper lookup by id failed"),
            }
        }
        if let Some(name) = &self.handoff.shopper_name {
            match self.shoppers.find_by_name_like(name).await {
                Ok(found) => return found,
                Err(error) => warn!(error = %error, "shopper lookup by name failed"),
            }
        }
        None
    }

    /// Shopper button taps and quick actions.
    pub async fn handle_action(&mut self, action: MessageAction) {
        match action {
            MessageAction::TrackOrder => self.track_order().await,
            MessageAction::AddToCart => self.add_selected_to_cart().await,
            MessageAction::Checkout => self.checkout().await,
            MessageAction::BrowseMore => self.browse_more().await,
            MessageAction::Pay => self.pay().await,
        }
    }

    /// Free-text input. An affirmative while an offer is on the table is
    /// treated as accepting it; anything else gets a generic reply.
    pub async fn handle_utterance(&mut self, text: &str) {
        self.push_shopper(text);
        let lower = text.to_lowercase();
        let affirmative =
            lower.contains("yes") || lower.contains("add") || lower.contains("buy");

        if affirmative && self.selected.is_some() && self.state == ChatState::OfferPresentation {
            self.accept_selected_offer().await;
            return;
        }

        // Keep the degraded/awaiting flow informed where it applies.
        if self.state == ChatState::AwaitingInput {
            let _ = self.engine.apply(
                &self.state,
                &ChatEvent::UtteranceReceived,
                &self.flow_context(),
            );
        }

        self.typing_pause().await;
        self.push_agent(ConversationMessage::agent(
            "Thanks for your message! How can I help you today?",
        ));
    }

    async fn track_order(&mut self) {
        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::TrackRequested, &context)
        else {
            return;
        };
        self.state = outcome.to;
        self.push_shopper("Track Order");

        self.typing_pause().await;
        self.push_agent(ConversationMessage::agent(messages::tracking_status(
            &self.order_id_display,
        )));

        if outcome.actions.contains(&ChatAction::ScheduleOfferPresentation) {
            tokio::time::sleep(Duration::from_millis(self.config.offer_gap_ms)).await;
            self.request_offers().await;
        }
    }

    async fn request_offers(&mut self) {
        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::OffersRequested, &context)
        else {
            return;
        };
        self.state = outcome.to;
        self.present_offers().await;
    }

    /// Resolve a source product and emit one offer message per candidate.
    /// Catalog unavailability degrades to a single visible notice.
    async fn present_offers(&mut self) {
        match self.catalog_loader.load().await {
            Ok(catalog) => self.catalog = catalog,
            Err(error) => {
                warn!(error = %error, "offers skipped, catalog never became available");
                let context = self.flow_context();
                if let Ok(outcome) =
                    self.engine.apply(&self.state, &ChatEvent::CatalogUnavailable, &context)
                {
                    self.state = outcome.to;
                }
                self.push_agent(ConversationMessage::agent(
                    messages::CATALOG_UNAVAILABLE_NOTICE,
                ));
                return;
            }
        }

        let Some(source) = self.resolve_source_product().await else {
            self.push_agent(ConversationMessage::agent(messages::CATALOG_UNAVAILABLE_NOTICE));
            return;
        };

        let shopper = self.shopper_for_recommendations();
        let discount = if shopper.loyalty_tier == LoyaltyTier::Gold {
            self.defaults.gold_discount_percent
        } else {
            self.defaults.discount_percent
        };
        let config =
            RecommendationConfig::time_limited_offer(discount, self.defaults.expires_in_minutes);

        let recommendations =
            self.recommender.recommend(&source, &self.catalog, &shopper, &config);
        if recommendations.is_empty() {
            // Nothing qualified: the dialogue carries on text-only.
            info!(source = %source.name, "no upsell candidates for source product");
            return;
        }

        let total = recommendations.len();
        for (index, recommended) in recommendations.into_iter().enumerate() {
            self.typing_pause().await;

            let reason = recommendation_reason(&recommended, &shopper, Some(&source));
            let text = messages::offer_message(
                &recommended,
                &source,
                &self.shopper_name_lower(),
                &reason,
            );
            let message = ConversationMessage::agent(text)
                .with_products(vec![recommended.clone()])
                .with_buttons(vec![
                    MessageButton::new("Add to Cart", MessageAction::AddToCart),
                    MessageButton::new("Checkout Now", MessageAction::Checkout),
                ]);
            self.push_agent(message);

            if let Some(minutes) = recommended.expires_in_minutes {
                self.timers.push(OfferTimerHandle::spawn(
                    recommended.product.id.clone(),
                    minutes,
                    self.expiry_tx.clone(),
                ));
            }
            self.selected = Some(recommended);

            if index + 1 < total {
                tokio::time::sleep(Duration::from_millis(self.config.offer_gap_ms)).await;
            }
        }
    }

    fn shopper_for_recommendations(&self) -> Shopper {
        self.shopper.clone().unwrap_or_else(|| Shopper {
            id: ShopperId("guest".to_owned()),
            name: self.handoff.shopper_name.clone().unwrap_or_else(|| "Customer".to_owned()),
            style_preference: None,
            favorite_brands: Vec::new(),
            size: None,
            loyalty_tier: LoyaltyTier::Bronze,
            loyalty_points: 0,
        })
    }

    /// Source product fallback order: hand-off product, first cart item,
    /// per-shopper keyword lookup, first catalog entry.
    async fn resolve_source_product(&self) -> Option<Product> {
        if let Some(name) = &self.handoff.product_name {
            let fragment = name.to_lowercase();
            if let Some(product) =
                self.catalog.iter().find(|product| product.name_lower().contains(&fragment))
            {
                return Some(product.clone());
            }
        }

        if let Some(shopper) = &self.shopper {
            match self.cart.lines(&shopper.id, &self.session_id).await {
                Ok(lines) => {
                    if let Some(first) = lines.first() {
                        return Some(first.product.clone());
                    }
                }
                Err(error) => warn!(error = %error, "cart read failed during source resolution"),
            }
        }

        let shopper_name = self.shopper_name_lower();
        for (fragment, brand_terms, detail_terms) in SOURCE_FALLBACKS {
            if !shopper_name.contains(fragment) {
                continue;
            }
            let found = self.catalog.iter().find(|product| {
                let brand = product.brand_lower();
                let name = product.name_lower();
                let brand_hit =
                    brand_terms.iter().any(|term| brand.contains(term) || name.contains(term));
                let detail_hit = detail_terms.is_empty()
                    || detail_terms.iter().any(|term| name.contains(term));
                brand_hit && detail_hit
            });
            if let Some(product) = found {
                return Some(product.clone());
            }
        }

        self.catalog.first().cloned()
    }

    async fn add_selected_to_cart(&mut self) {
        self.push_shopper("YES");
        self.accept_selected_offer().await;
    }

    async fn accept_selected_offer(&mut self) {
        let Some(selected) = self.selected.clone() else {
            self.push_agent(ConversationMessage::agent("Please pick an offer first."));
            return;
        };
        let Some(shopper) = self.shopper.clone() else {
            self.push_agent(ConversationMessage::agent("Please select a shopper profile first."));
            return;
        };

        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::OfferAccepted, &context)
        else {
            return;
        };

        if let Err(error) =
            self.cart.add(&shopper.id, &self.session_id, &selected.product.id).await
        {
            // Not auto-retried: the shopper can tap the button again.
            warn!(error = %error, "cart write rejected");
            self.push_agent(ConversationMessage::agent(messages::CART_WRITE_FAILED_NOTICE));
            return;
        }
        self.state = outcome.to;

        self.typing_pause().await;
        let confirmation = ConversationMessage::agent(messages::cart_confirmation(&selected))
            .with_buttons(vec![
                MessageButton::new("Checkout", MessageAction::Checkout),
                MessageButton::new("Browse More", MessageAction::BrowseMore),
            ]);
        self.push_agent(confirmation);
    }

    async fn checkout(&mut self) {
        let Some(selected) = self.selected.clone() else {
            self.push_agent(ConversationMessage::agent("Please select a product first."));
            return;
        };

        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::CheckoutRequested, &context)
        else {
            return;
        };
        self.state = outcome.to;

        let prompt =
            ConversationMessage::agent(messages::payment_prompt(&selected, self.payment_method))
                .with_buttons(vec![MessageButton::new("Pay", MessageAction::Pay)]);
        self.push_agent(prompt);
    }

    async fn browse_more(&mut self) {
        let context = self.flow_context();
        let Ok(outcome) = self.engine.apply(&self.state, &ChatEvent::BrowseRequested, &context)
        else {
            return;
        };
        self.state = outcome.to;
        self.present_offers().await;
    }

    /// Simulated payment: always a delay, then an order write against the
    /// external store. Failure keeps the payment pending for a manual retry.
    async fn pay(&mut self) {
        let Some(selected) = self.selected.clone() else {
            return;
        };
        let Some(shopper) = self.shopper.clone() else {
            self.push_agent(ConversationMessage::agent("Please select a shopper profile first."));
            return;
        };

        let context = self.flow_context();
        if self.engine.apply(&self.state, &ChatEvent::PayConfirmed, &context).is_err() {
            return;
        }

        tokio::time::sleep(Duration::from_millis(self.config.payment_delay_ms)).await;

        let amount = selected.discounted_price();
        let order = Order {
            id: OrderId::generate(),
            shopper_id: shopper.id.clone(),
            total_amount: amount,
            discount_applied: selected.product.price - amount,
            status: OrderStatus::Confirmed,
            session_id: Some(self.session_id.clone()),
            created_at: Utc::now(),
        };
        let line = OrderLine {
            order_id: order.id.clone(),
            product_id: selected.product.id.clone(),
            quantity: 1,
            unit_price: selected.product.price,
        };

        match self.orders.create(order.clone(), vec![line]).await {
            Ok(()) => {
                let Ok(outcome) =
                    self.engine.apply(&self.state, &ChatEvent::PaymentSucceeded, &context)
                else {
                    return;
                };
                self.state = outcome.to;
                self.order_id_display = order.id.display();
                let success =
                    ConversationMessage::agent(messages::payment_success(
                        &self.order_id_display,
                        amount,
                    ))
                    .with_buttons(vec![MessageButton::new(
                        "Track Order",
                        MessageAction::TrackOrder,
                    )]);
                self.push_agent(success);
                info!(order_id = %self.order_id_display, amount = %amount, "payment completed");
            }
            Err(error) => {
                warn!(error = %error, "payment order write failed");
                if let Ok(outcome) =
                    self.engine.apply(&self.state, &ChatEvent::PaymentFailed, &context)
                {
                    self.state = outcome.to;
                }
                self.push_agent(ConversationMessage::agent(messages::PAYMENT_FAILED_NOTICE));
            }
        }
    }
}
