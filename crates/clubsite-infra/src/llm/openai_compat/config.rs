//! Per-provider defaults for OpenAI-compatible chat-completion endpoints.

use secrecy::SecretString;

/// Configuration for an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Provider name used in logs (e.g., "groq").
    pub provider_name: String,
    /// Base URL of the API, without the `/chat/completions` suffix.
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves `model` empty.
    pub model: String,
}

/// Groq: `https://api.groq.com/openai/v1`.
pub fn groq_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "groq".into(),
        base_url: "https://api.groq.com/openai/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// OpenAI: `https://api.openai.com/v1`.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// Any other compatible endpoint, addressed by explicit base URL.
pub fn custom(name: &str, base_url: &str, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: name.into(),
        base_url: base_url.trim_end_matches('/').into(),
        api_key,
        model: model.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn key() -> SecretString {
        SecretString::from("gsk-test".to_string())
    }

    #[test]
    fn test_groq_defaults() {
        let config = groq_defaults(key(), "llama-3.1-8b-instant");
        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.api_key.expose_secret(), "gsk-test");
        assert_eq!(config.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(key(), "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_custom_strips_trailing_slash() {
        let config = custom("local", "http://localhost:8080/v1/", key(), "m");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
