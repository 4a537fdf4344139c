use crate::domain::error::TranslateError;
use crate::domain::model::{ChatMessage, TranslateOptions};
use async_trait::async_trait;

/// Trait for chat-completion services
///
/// The translator only needs the raw generated text back. Implementations
/// own the transport, so tests can swap in a canned response without a
/// network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one exchange and return the generated text
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &TranslateOptions,
    ) -> Result<String, TranslateError>;
}
