//! Site configuration loader.
//!
//! Reads `clubsite.toml` into [`SiteConfig`], falling back to defaults when
//! the file is missing or malformed, then applies environment overrides.
//! Secrets never live in the file; [`ResolvedSecrets`] reads them from the
//! environment variables the config names.

use std::path::Path;

use secrecy::SecretString;

use clubsite_types::config::SiteConfig;

use crate::crypto::token::random_secret;

/// Overrides `database.url`.
pub const DATABASE_URL_ENV: &str = "CLUBSITE_DATABASE_URL";

/// Fallback for the LLM key when `llm.api_key_env` is unset.
pub const LLM_API_KEY_ENV: &str = "CLUBSITE_LLM_API_KEY";

/// Load `clubsite.toml` from `path`.
///
/// - Missing file: [`SiteConfig::default()`].
/// - Unreadable or unparsable file: a warning, then the default.
pub async fn load_site_config(path: &Path) -> SiteConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return SiteConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return SiteConfig::default();
        }
    };

    match toml::from_str::<SiteConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            SiteConfig::default()
        }
    }
}

/// Apply environment overrides read through `lookup`.
pub fn apply_env_overrides(
    mut config: SiteConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SiteConfig {
    if let Some(url) = lookup(DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
        config.database.url = url;
    }
    config
}

/// Secrets resolved at startup.
pub struct ResolvedSecrets {
    /// `None` when no key is set; the site still serves without chat.
    pub llm_api_key: Option<SecretString>,
    pub jwt_secret: SecretString,
    /// True when `jwt_secret` was generated for this process only.
    pub ephemeral_jwt_secret: bool,
}

impl ResolvedSecrets {
    /// Resolve from the process environment.
    pub fn from_env(config: &SiteConfig) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    pub fn resolve(config: &SiteConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let llm_api_key = non_empty(&config.llm.api_key_env)
            .or_else(|| non_empty(LLM_API_KEY_ENV))
            .map(SecretString::from);

        let (jwt_secret, ephemeral_jwt_secret) = match non_empty(&config.auth.jwt_secret_env) {
            Some(secret) => (SecretString::from(secret), false),
            None => {
                tracing::warn!(
                    env = %config.auth.jwt_secret_env,
                    "no session secret set; generated one for this process, sessions end on restart"
                );
                (random_secret(), true)
            }
        };

        Self {
            llm_api_key,
            jwt_secret,
            ephemeral_jwt_secret,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[tokio::test]
    async fn load_site_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_site_config(&tmp.path().join("clubsite.toml")).await;
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.provider, "groq");
    }

    #[tokio::test]
    async fn load_site_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clubsite.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
port = 8080
login_path = "/gizli-giris"

[chat]
club_name = "Robotics Club"
max_news = 5
"#,
        )
        .await
        .unwrap();

        let config = load_site_config(&path).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.login_path, "/gizli-giris");
        assert_eq!(config.chat.club_name, "Robotics Club");
        assert_eq!(config.chat.max_news, 5);
        assert_eq!(config.chat.history_window, 6);
    }

    #[tokio::test]
    async fn load_site_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clubsite.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_site_config(&path).await;
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn database_url_override() {
        let config = apply_env_overrides(
            SiteConfig::default(),
            env(&[(DATABASE_URL_ENV, "sqlite:///srv/club.db?mode=rwc")]),
        );
        assert_eq!(config.database.url, "sqlite:///srv/club.db?mode=rwc");

        let config = apply_env_overrides(SiteConfig::default(), env(&[(DATABASE_URL_ENV, " ")]));
        assert_eq!(config.database.url, SiteConfig::default().database.url);
    }

    #[test]
    fn secrets_from_configured_variables() {
        let secrets = ResolvedSecrets::resolve(
            &SiteConfig::default(),
            env(&[("GROQ_API_KEY", "gsk-1"), ("JWT_SECRET", "jwt-1")]),
        );
        assert_eq!(secrets.llm_api_key.unwrap().expose_secret(), "gsk-1");
        assert_eq!(secrets.jwt_secret.expose_secret(), "jwt-1");
        assert!(!secrets.ephemeral_jwt_secret);
    }

    #[test]
    fn llm_key_falls_back_to_generic_variable() {
        let secrets =
            ResolvedSecrets::resolve(&SiteConfig::default(), env(&[(LLM_API_KEY_ENV, "sk-2")]));
        assert_eq!(secrets.llm_api_key.unwrap().expose_secret(), "sk-2");
    }

    #[test]
    fn missing_secrets() {
        let secrets = ResolvedSecrets::resolve(&SiteConfig::default(), env(&[("GROQ_API_KEY", "")]));
        assert!(secrets.llm_api_key.is_none());
        assert!(secrets.ephemeral_jwt_secret);
        assert!(!secrets.jwt_secret.expose_secret().is_empty());
    }
}
