//! Completion API integration.

mod client;

pub use client::{
    prompts, ChatMessage, CompletionApi, CompletionRequest, LlmConfig, LlmError, OpenAiClient,
    Role,
};
