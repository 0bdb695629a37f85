pub mod classifier;
pub mod responder;

pub use classifier::{classify, Intent};
pub use responder::{IntentReply, IntentResponder};
