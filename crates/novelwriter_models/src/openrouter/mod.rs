//! OpenRouter (OpenAI-compatible) integration.

mod client;
mod conversion;
mod dto;

pub use client::OpenRouterClient;
pub use conversion::{from_chat_response, to_chat_request};
pub use dto::{
    ApiErrorBody, ChatChoice, ChatMessage, ChatMessageBuilder, ChatRequest, ChatRequestBuilder,
    ChatResponse, ChatRole, ChoiceMessage,
};
