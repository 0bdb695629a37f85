use thiserror::Error;

use crate::flows::states::{
    Channel, ChatAction, ChatEvent, ChatState, FlowContext, TransitionOutcome,
};

/// Pure per-channel transition table. The chat runtime applies events and
/// executes the returned actions; nothing here performs side effects.
pub trait ChannelFlow {
    fn channel(&self) -> Channel;
    fn initial_state(&self) -> ChatState;
    fn transition(
        &self,
        current: &ChatState,
        event: &ChatEvent,
        context: &FlowContext,
    ) -> Result<TransitionOutcome, ChatFlowError>;
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChatFlowError {
    #[error("invalid transition from {state:?} using event {event:?}")]
    InvalidTransition { state: ChatState, event: ChatEvent },
}

pub struct FlowEngine<F> {
    flow: F,
}

impl<F> FlowEngine<F>
where
    F: ChannelFlow,
{
    pub fn new(flow: F) -> Self {
        Self { flow }
    }

    pub fn channel(&self) -> Channel {
        self.flow.channel()
    }

    pub fn initial_state(&self) -> ChatState {
        self.flow.initial_state()
    }

    pub fn apply(
        &self,
        current: &ChatState,
        event: &ChatEvent,
        context: &FlowContext,
    ) -> Result<TransitionOutcome, ChatFlowError> {
        self.flow.transition(current, event, context)
    }
}

#[derive(Clone, Debug, Default)]
pub struct WebChatFlow;

impl ChannelFlow for WebChatFlow {
    fn channel(&self) -> Channel {
        Channel::WebChat
    }

    fn initial_state(&self) -> ChatState {
        ChatState::Idle
    }

    fn transition(
        &self,
        current: &ChatState,
        event: &ChatEvent,
        context: &FlowContext,
    ) -> Result<TransitionOutcome, ChatFlowError> {
        use ChatAction::{ClassifyIntent, EmitGreeting, EmitIntentReply};
        use ChatEvent::{GreetingSent, ReplySent, SessionOpened, UtteranceReceived};
        use ChatState::{AwaitingInput, Greeting, Idle, IntentResponse};

        let (to, actions) = match (current, event) {
            (Idle, SessionOpened) => {
                if context.shopper_known && context.transcript_empty {
                    (Greeting, vec![EmitGreeting])
                } else {
                    (AwaitingInput, Vec::new())
                }
            }
            (Greeting, GreetingSent) => (AwaitingInput, Vec::new()),
            (AwaitingInput, UtteranceReceived) => {
                (IntentResponse, vec![ClassifyIntent, EmitIntentReply])
            }
            (IntentResponse, ReplySent) => (AwaitingInput, Vec::new()),
            _ => {
                return Err(ChatFlowError::InvalidTransition {
                    state: current.clone(),
                    event: event.clone(),
                });
            }
        };

        Ok(TransitionOutcome { from: current.clone(), to, event: event.clone(), actions })
    }
}

impl Default for FlowEngine<WebChatFlow> {
    fn default() -> Self {
        Self::new(WebChatFlow)
    }
}

#[derive(Clone, Debug, Default)]
pub struct WhatsAppFlow;

impl ChannelFlow for WhatsAppFlow {
    fn channel(&self) -> Channel {
        Channel::WhatsApp
    }

    fn initial_state(&self) -> ChatState {
        ChatState::Idle
    }

    fn transition(
        &self,
        current: &ChatState,
        event: &ChatEvent,
        context: &FlowContext,
    ) -> Result<TransitionOutcome, ChatFlowError> {
        use ChatAction::{
            EmitCartConfirmation, EmitDataNotice, EmitOrderConfirmation, EmitPaymentApology,
            EmitPaymentSuccess, EmitTrackingStatus, OfferTrackAction, PresentOffers,
            ProcessPayment, PromptPayment, ResolveSourceProduct, ScheduleOfferPresentation,
            UpdateCart,
        };
        use ChatEvent::{
            BrowseRequested, CatalogUnavailable, CheckoutRequested, OfferAccepted,
            OffersRequested, OrderIdResolved, PayConfirmed, PaymentFailed, PaymentSucceeded,
            TrackRequested, UtteranceReceived,
        };
        use ChatState::{
            AwaitingInput, CartUpdate, Idle, OfferPresentation, OrderConfirmed, PaymentComplete,
            PaymentPending, Tracking,
        };

        let (to, actions) = match (current, event) {
            (Idle, OrderIdResolved) => {
                // Scripted upsell shoppers skip order tracking and move
                // straight to the offer.
                if context.scripted_shopper {
                    (OrderConfirmed, vec![EmitOrderConfirmation, ScheduleOfferPresentation])
                } else {
                    (OrderConfirmed, vec![EmitOrderConfirmation, OfferTrackAction])
                }
            }
            (OrderConfirmed, TrackRequested) | (PaymentComplete, TrackRequested) => {
                (Tracking, vec![EmitTrackingStatus, ScheduleOfferPresentation])
            }
            (OrderConfirmed, OffersRequested)
            | (Tracking, OffersRequested)
            | (AwaitingInput, OffersRequested) => {
                (OfferPresentation, vec![ResolveSourceProduct, PresentOffers])
            }
            (OfferPresentation, OfferAccepted) => {
                (CartUpdate, vec![UpdateCart, EmitCartConfirmation])
            }
            (OfferPresentation, CheckoutRequested) | (CartUpdate, CheckoutRequested) => {
                (PaymentPending, vec![PromptPayment])
            }
            (CartUpdate, BrowseRequested) => {
                (OfferPresentation, vec![ResolveSourceProduct, PresentOffers])
            }
            (PaymentPending, PayConfirmed) => (PaymentPending, vec![ProcessPayment]),
            (PaymentPending, PaymentSucceeded) => {
                (PaymentComplete, vec![EmitPaymentSuccess, OfferTrackAction])
            }
            // No automatic retry: the shopper must re-trigger pay.
            (PaymentPending, PaymentFailed) => (PaymentPending, vec![EmitPaymentApology]),
            // Catalog retries exhausted: one visible notice, conversation
            // stays usable for text.
            (OfferPresentation, CatalogUnavailable) => (AwaitingInput, vec![EmitDataNotice]),
            (AwaitingInput, UtteranceReceived) => (AwaitingInput, Vec::new()),
            _ => {
                return Err(ChatFlowError::InvalidTransition {
                    state: current.clone(),
                    event: event.clone(),
                });
            }
        };

        Ok(TransitionOutcome { from: current.clone(), to, event: event.clone(), actions })
    }
}

impl Default for FlowEngine<WhatsAppFlow> {
    fn default() -> Self {
        Self::new(WhatsAppFlow)
    }
}
