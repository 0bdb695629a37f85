pub mod engine;
pub mod states;

pub use engine::{ChannelFlow, ChatFlowError, FlowEngine, WebChatFlow, WhatsAppFlow};
pub use states::{Channel, ChatAction, ChatEvent, ChatState, FlowContext, TransitionOutcome};
