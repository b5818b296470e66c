//! Chat service: one stateless request/response turn.
//!
//! validate -> snapshot content -> assemble prompt -> call gateway (bounded
//! by a timeout) -> substitute a fallback for empty replies -> parse markup.

use std::time::Duration;

use clubsite_types::chat::{ChatReply, ChatRequest};
use clubsite_types::error::ChatError;
use clubsite_types::llm::LlmError;

use crate::chat::context::{ContentSource, ContextBuilder};
use crate::chat::markup::parse_reply;
use crate::chat::prompt::PromptAssembler;
use crate::llm::box_provider::BoxLlmProvider;

/// Reply used when the model returns no content.
pub const EMPTY_REPLY_FALLBACK: &str = "Bir hata oluştu.";

pub struct ChatService<S: ContentSource> {
    context: ContextBuilder<S>,
    prompt: PromptAssembler,
    provider: BoxLlmProvider,
    timeout: Duration,
}

impl<S: ContentSource> ChatService<S> {
    pub fn new(
        context: ContextBuilder<S>,
        prompt: PromptAssembler,
        provider: BoxLlmProvider,
        timeout: Duration,
    ) -> Self {
        Self {
            context,
            prompt,
            provider,
            timeout,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Answer one chat message.
    ///
    /// Store and gateway failures abort the turn; no partial reply is ever
    /// returned.
    pub async fn respond(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ChatError::Validation("Message is required".to_string()))?;

        let snapshot = self.context.build().await.inspect_err(|e| {
            tracing::error!(error = %e, "chat context unavailable");
        })?;
        let completion = self
            .prompt
            .assemble(message, &request.history, &snapshot.render());

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&completion))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
            .inspect_err(|e| {
                tracing::error!(provider = self.provider.name(), error = %e, "completion failed");
            })?;

        tracing::info!(
            provider = self.provider.name(),
            model = %response.model,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            history = request.history.len(),
            "chat turn completed"
        );

        let reply = if response.content.trim().is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else {
            response.content
        };
        let segments = parse_reply(&reply);
        Ok(ChatReply { reply, segments })
    }
}
