//! Type conversions between novelwriter and chat-completions types.

use super::dto::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse, ChatRole};
use novelwriter_core::{GenerateRequest, GenerateResponse, Message, Output, Role};
use novelwriter_error::{
    BuilderError, BuilderErrorKind, NovelwriterResult, ProviderError, ProviderErrorKind,
};

/// Converts a GenerateRequest to a chat-completions request.
///
/// `model` is used when the request does not name one.
pub fn to_chat_request(request: &GenerateRequest, model: &str) -> NovelwriterResult<ChatRequest> {
    let messages = request
        .messages
        .iter()
        .map(to_chat_message)
        .collect::<NovelwriterResult<Vec<_>>>()?;

    let mut builder = ChatRequest::builder();
    builder
        .model(request.model.clone().unwrap_or_else(|| model.to_string()))
        .messages(messages)
        .max_tokens(request.max_tokens)
        .temperature(request.temperature);

    builder.build().map_err(|e| {
        BuilderError::new(BuilderErrorKind::ValidationFailed(format!(
            "Failed to build chat request: {}",
            e
        )))
        .into()
    })
}

/// Converts a chat-completions response to a GenerateResponse.
///
/// # Errors
///
/// An embedded error object becomes a provider error; a quota-like message is
/// reported as a rate limit. A body with no choices is an empty response.
pub fn from_chat_response(response: &ChatResponse) -> NovelwriterResult<GenerateResponse> {
    if let Some(error) = response.error() {
        return Err(ProviderError::new(embedded_error_kind(error)).into());
    }

    let outputs: Vec<Output> = response
        .choices()
        .iter()
        .filter_map(|choice| {
            let message = choice.message();
            match (message.content(), message.refusal()) {
                (Some(text), _) => Some(Output::Text(text.clone())),
                (None, Some(refusal)) => Some(Output::Refusal(refusal.clone())),
                (None, None) => None,
            }
        })
        .collect();

    if outputs.is_empty() {
        return Err(ProviderError::new(ProviderErrorKind::EmptyResponse).into());
    }
    Ok(GenerateResponse { outputs })
}

fn embedded_error_kind(error: &ApiErrorBody) -> ProviderErrorKind {
    let status = error
        .code()
        .as_ref()
        .and_then(|code| code.as_u64())
        .and_then(|code| u16::try_from(code).ok());
    match status {
        Some(429) => ProviderErrorKind::RateLimit(error.message().clone()),
        Some(status) => ProviderErrorKind::Api {
            status,
            message: error.message().clone(),
        },
        None => ProviderErrorKind::ResponseParsing(error.message().clone()),
    }
}

fn to_chat_message(message: &Message) -> NovelwriterResult<ChatMessage> {
    let role = match message.role {
        Role::System => ChatRole::System,
        Role::User => ChatRole::User,
        Role::Assistant => ChatRole::Assistant,
    };
    ChatMessage::builder()
        .role(role)
        .content(message.content.clone())
        .build()
        .map_err(|e| {
            BuilderError::new(BuilderErrorKind::ValidationFailed(format!(
                "Failed to build chat message: {}",
                e
            )))
            .into()
        })
}
