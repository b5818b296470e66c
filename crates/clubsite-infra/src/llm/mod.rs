//! Completion gateway implementations.
//!
//! [`create_provider`] turns the `[llm]` config section and a resolved API
//! key into a [`BoxLlmProvider`]. Without a key the site still serves; chat
//! requests then fail with an authentication error instead of reaching the
//! network.

pub mod openai_compat;

use secrecy::SecretString;

use clubsite_core::llm::box_provider::BoxLlmProvider;
use clubsite_core::llm::provider::LlmProvider;
use clubsite_types::config::LlmConfig;
use clubsite_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config;

/// Build the configured provider.
///
/// An explicit `base_url` wins; otherwise the provider name selects a
/// well-known endpoint.
///
/// # Errors
///
/// `InvalidRequest` when the provider name is unknown and no base URL is set.
pub fn create_provider(
    llm: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let Some(key) = api_key else {
        tracing::error!(
            provider = %llm.provider,
            env = %llm.api_key_env,
            "no API key configured; chat requests will fail"
        );
        return Ok(BoxLlmProvider::new(UnconfiguredProvider {
            name: llm.provider.clone(),
            model: llm.model.clone(),
        }));
    };

    let oai_config = match (llm.base_url.as_deref(), llm.provider.as_str()) {
        (Some(base_url), name) => config::custom(name, base_url, key, &llm.model),
        (None, "groq") => config::groq_defaults(key, &llm.model),
        (None, "openai") => config::openai_defaults(key, &llm.model),
        (None, other) => {
            return Err(LlmError::InvalidRequest(format!(
                "unknown provider '{other}' and no base_url configured"
            )));
        }
    };
    tracing::debug!(provider = %oai_config.provider_name, base_url = %oai_config.base_url, "completion gateway configured");
    Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(oai_config)))
}

/// Stand-in used when no API key is available.
struct UnconfiguredProvider {
    name: String,
    model: String,
}

impl LlmProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::AuthenticationFailed)
    }
}
