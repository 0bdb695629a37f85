//! Web checkout: price the cart with the loyalty discount, write the order
//! with its lines, clear the cart, and hand back the kiosk hand-off bundle
//! for the confirmation step.

use std::sync::Arc;

use tracing::{info, warn};

use shopmate_core::chrono::Utc;
use shopmate_core::domain::order::{Order, OrderId, OrderLine, OrderStatus};
use shopmate_core::domain::session::SessionId;
use shopmate_core::domain::shopper::Shopper;
use shopmate_core::errors::ApplicationError;
use shopmate_db::OrderRepository;

use crate::cart::CartService;
use crate::handoff::HandoffPayload;

#[derive(Clone, Debug)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub handoff: HandoffPayload,
}

pub struct CheckoutService {
    orders: Arc<dyn OrderRepository>,
    cart: CartService,
}

impl CheckoutService {
    pub fn new(orders: Arc<dyn OrderRepository>, cart: CartService) -> Self {
        Self { orders, cart }
    }

    /// Place an order for the current cart. A failed write surfaces a
    /// transient notice and leaves the cart untouched; the shopper may
    /// re-attempt.
    pub async fn place_order(
        &self,
        shopper: &Shopper,
        session_id: &SessionId,
    ) -> Result<CheckoutOutcome, ApplicationError> {
        let totals = self
            .cart
            .totals(shopper, session_id)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        if totals.lines.is_empty() {
            return Err(ApplicationError::Domain(
                shopmate_core::errors::DomainError::InvariantViolation(
                    "cannot checkout an empty cart".to_owned(),
                ),
            ));
        }

        let order = Order {
            id: OrderId::generate(),
            shopper_id: shopper.id.clone(),
            total_amount: totals.payable,
            discount_applied: totals.loyalty_discount,
            status: OrderStatus::Confirmed,
            session_id: Some(session_id.clone()),
            created_at: Utc::now(),
        };
        let lines: Vec<OrderLine> = totals
            .lines
            .iter()
            .map(|line| OrderLine {
                order_id: order.id.clone(),
                product_id: line.product.id.clone(),
                quantity: line.item.quantity,
                unit_price: line.product.price,
            })
            .collect();

        if let Err(error) = self.orders.create(order.clone(), lines).await {
            warn!(error = %error, "order write rejected");
            return Err(ApplicationError::Persistence(error.to_string()));
        }

        // The cart is spent once the order exists; a failed clear is logged
        // but does not undo the order.
        if let Err(error) = self.cart.clear(&shopper.id, session_id).await {
            warn!(error = %error, order_id = %order.id.display(), "cart clear failed after order");
        }

        info!(
            order_id = %order.id.display(),
            total = %order.total_amount,
            discount = %order.discount_applied,
            "order placed"
        );

        let first_product = totals.lines.first().map(|line| line.product.name.clone());
        let handoff = HandoffPayload {
            order_id: Some(order.id.display()),
            product_name: first_product,
            shopper_name: Some(shopper.name.clone()),
            shopper_id: Some(shopper.id.0.clone()),
            session_id: Some(session_id.0.clone()),
        };

        Ok(CheckoutOutcome { order, handoff })
    }
}
