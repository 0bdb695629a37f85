//! Channel runtimes for the shopping assistant. The pure decision layer
//! lives in `shopmate-core`; this crate drives it with side effects: store
//! access through the repository traits, simulated typing and payment
//! delays, offer countdown tasks, and the kiosk hand-off transport.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod handoff;
pub mod messages;
pub mod timer;
pub mod webchat;
pub mod whatsapp;

pub use cart::{CartMutation, CartService, CartTotals};
pub use catalog::{CatalogLoadError, CatalogLoader, CatalogRetryPolicy};
pub use checkout::{CheckoutOutcome, CheckoutService};
pub use handoff::HandoffPayload;
pub use messages::PaymentMethod;
pub use timer::{OfferExpired, OfferTimerHandle};
pub use webchat::{TurnOutcome, WebChatSession};
pub use whatsapp::WhatsAppSession;
