//! Generation provider integration for novelwriter.
//!
//! [`OpenRouterClient`] speaks the OpenAI-compatible chat-completions protocol.
//! [`RotatingGenerator`] puts credential rotation and reply cleanup in front
//! of any [`NovelwriterDriver`](novelwriter_interface::NovelwriterDriver), and
//! is what stage collaborators talk to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cleanup;
mod openrouter;
mod rotating;

pub use cleanup::clean_response;
pub use openrouter::{
    ApiErrorBody, ChatChoice, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder,
    ChatResponse, ChatRole, ChoiceMessage, OpenRouterClient, from_chat_response, to_chat_request,
};
pub use rotating::RotatingGenerator;
