//! LLM module - chat-completion client and model catalogue

pub mod catalog;
pub mod openai;

pub use catalog::{CatalogEntry, OPENAI_MODELS};
pub use openai::{
    complete, ChatBackend, ChatChoice, ChatCompletionRequest, ChatCompletionResponse,
    ChatMessage, CompletionParams, OpenAiBackend, Usage,
};
