//! LLM provider abstraction layer.
//!
//! Query generation talks to a chat completion backend through
//! [`LlmProvider`]; the only shipped backend speaks the OpenAI API.

mod openai;
mod provider;
mod types;

pub use openai::{OpenAIProvider, DEFAULT_MODEL, GROQ_BASE_URL};
#[cfg(test)]
pub use provider::MockLlmProvider;
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, Message, MessageRole};
