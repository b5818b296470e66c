//! Site configuration types.
//!
//! `SiteConfig` represents `clubsite.toml`. Every field has a default so an
//! absent or partial file still yields a runnable configuration. Secrets are
//! never stored here: the config names the environment variables they are
//! read from.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Unlisted path of the admin login page.
    pub login_path: String,
    /// Mark the session cookie `Secure` (enable behind HTTPS).
    pub secure_cookies: bool,
    /// Directory of static assets served under `/static`.
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            login_path: "/super-admin-login-92837-secret".to_string(),
            secure_cookies: false,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://clubsite.db?mode=rwc".to_string(),
        }
    }
}

/// Completion gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Well-known provider name ("groq", "openai") used to pick a base URL.
    pub provider: String,
    /// Explicit base URL; overrides the provider's default.
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    /// Upper bound on a single completion call.
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            base_url: None,
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.5,
            top_p: 1.0,
            max_tokens: 500,
            timeout_secs: 30,
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_ttl_hours: i64,
    /// Environment variable holding the session signing secret.
    pub jwt_secret_env: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24,
            jwt_secret_env: "JWT_SECRET".to_string(),
        }
    }
}

/// Chat assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub assistant_name: String,
    pub club_name: String,
    /// Number of most recent turns forwarded as history.
    pub history_window: usize,
    pub max_upcoming_events: i64,
    pub max_projects: i64,
    pub max_news: i64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            assistant_name: "TeknoAsistan".to_string(),
            club_name: "Haliç University TeknoFest Club".to_string(),
            history_window: 6,
            max_upcoming_events: 5,
            max_projects: 5,
            max_news: 3,
        }
    }
}
