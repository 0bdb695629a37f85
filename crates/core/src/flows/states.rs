use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    WebChat,
    WhatsApp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatState {
    Idle,
    Greeting,
    AwaitingInput,
    IntentResponse,
    OrderConfirmed,
    Tracking,
    OfferPresentation,
    CartUpdate,
    PaymentPending,
    PaymentComplete,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    SessionOpened,
    GreetingSent,
    UtteranceReceived,
    ReplySent,
    OrderIdResolved,
    TrackRequested,
    OffersRequested,
    OfferAccepted,
    CheckoutRequested,
    BrowseRequested,
    PayConfirmed,
    PaymentSucceeded,
    PaymentFailed,
    CatalogUnavailable,
}

/// Per-transition inputs the runtime already knows; keeps the transition
/// function pure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FlowContext {
    pub shopper_known: bool,
    pub transcript_empty: bool,
    pub scripted_shopper: bool,
}

/// Side effects the runtime must perform after a transition is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatAction {
    EmitGreeting,
    ClassifyIntent,
    EmitIntentReply,
    EmitOrderConfirmation,
    OfferTrackAction,
    ScheduleOfferPresentation,
    EmitTrackingStatus,
    ResolveSourceProduct,
    PresentOffers,
    UpdateCart,
    EmitCartConfirmation,
    PromptPayment,
    ProcessPayment,
    EmitPaymentSuccess,
    EmitPaymentApology,
    EmitDataNotice,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: ChatState,
    pub to: ChatState,
    pub event: ChatEvent,
    pub actions: Vec<ChatAction>,
}
