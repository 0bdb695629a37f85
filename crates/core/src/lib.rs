pub mod config;
pub mod domain;
pub mod errors;
pub mod flows;
pub mod intents;
pub mod offers;
pub mod pricing;
pub mod recommend;
pub mod stores;

pub use chrono;

pub use config::{AppConfig, ChatConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::cart::{cart_total, CartItem, CartItemId, CartLine};
pub use domain::message::{
    Author, ConversationMessage, DeliveryState, MessageAction, MessageButton, Transcript,
};
pub use domain::order::{Order, OrderId, OrderLine, OrderStatus};
pub use domain::product::{Product, ProductId, RecommendedProduct};
pub use domain::session::SessionId;
pub use domain::shopper::{LoyaltyTier, Shopper, ShopperId};
pub use errors::{ApplicationError, DomainError};
pub use flows::{
    Channel, ChannelFlow, ChatAction, ChatEvent, ChatFlowError, ChatState, FlowContext,
    FlowEngine, TransitionOutcome, WebChatFlow, WhatsAppFlow,
};
pub use intents::{classify, Intent, IntentReply, IntentResponder};
pub use offers::{CountdownTick, OfferCountdown};
pub use pricing::loyalty_discount;
pub use recommend::{
    baseline_picks, collaborative_brands, filter_by_segment, infer_segment, is_scripted_shopper,
    recommendation_reason, RecommendationConfig, RecommendationEngine, Segment,
};
pub use stores::{check_store_inventory, stores_with_stock, Store, StoreAvailability};
