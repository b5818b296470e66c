//! Application state wiring all services together.
//!
//! Services are generic over repository, credential and content-source
//! traits; `AppState` pins them to the concrete infra implementations.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use clubsite_core::chat::context::{ContextBuilder, ContextLimits};
use clubsite_core::chat::prompt::PromptAssembler;
use clubsite_core::chat::service::ChatService;
use clubsite_core::llm::box_provider::BoxLlmProvider;
use clubsite_core::service::auth::AuthService;
use clubsite_core::service::content::ContentService;
use clubsite_infra::config::{ResolvedSecrets, apply_env_overrides, load_site_config};
use clubsite_infra::crypto::password::Argon2PasswordHasher;
use clubsite_infra::crypto::token::HmacSessionSigner;
use clubsite_infra::llm::create_provider;
use clubsite_infra::sqlite::admin::SqliteAdminRepository;
use clubsite_infra::sqlite::event::SqliteEventRepository;
use clubsite_infra::sqlite::member::SqliteMemberRepository;
use clubsite_infra::sqlite::news::SqliteNewsRepository;
use clubsite_infra::sqlite::pool::DatabasePool;
use clubsite_infra::sqlite::project::SqliteProjectRepository;
use clubsite_infra::sqlite::role::SqliteRoleRepository;
use clubsite_types::config::SiteConfig;
use secrecy::SecretString;

use crate::http::views::Views;

pub type ConcreteContentService = ContentService<
    SqliteRoleRepository,
    SqliteMemberRepository,
    SqliteEventRepository,
    SqliteProjectRepository,
    SqliteNewsRepository,
>;

pub type ConcreteAuthService =
    AuthService<SqliteAdminRepository, Argon2PasswordHasher, HmacSessionSigner>;

pub type ConcreteChatService = ChatService<Arc<ConcreteContentService>>;

/// Shared application state, used by CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ConcreteContentService>,
    pub auth: Arc<ConcreteAuthService>,
    pub chat: Arc<ConcreteChatService>,
    pub views: Arc<Views>,
    pub config: Arc<SiteConfig>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Load configuration, open the database and wire services.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_site_config(config_path).await;
        let config = apply_env_overrides(config, |name| std::env::var(name).ok());
        let secrets = ResolvedSecrets::from_env(&config);

        let db_pool = DatabasePool::new(&config.database.url)
            .await
            .with_context(|| format!("opening database {}", config.database.url))?;
        let provider = create_provider(&config.llm, secrets.llm_api_key)?;

        Self::build(config, db_pool, secrets.jwt_secret, provider)
    }

    /// Wire services over an open pool and a ready provider.
    pub fn build(
        config: SiteConfig,
        db_pool: DatabasePool,
        jwt_secret: SecretString,
        provider: BoxLlmProvider,
    ) -> anyhow::Result<Self> {
        let content = Arc::new(ContentService::new(
            SqliteRoleRepository::new(db_pool.clone()),
            SqliteMemberRepository::new(db_pool.clone()),
            SqliteEventRepository::new(db_pool.clone()),
            SqliteProjectRepository::new(db_pool.clone()),
            SqliteNewsRepository::new(db_pool.clone()),
        ));

        let auth = AuthService::new(
            SqliteAdminRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            HmacSessionSigner::new(jwt_secret),
            chrono::Duration::hours(config.auth.session_ttl_hours),
        );

        let chat = ChatService::new(
            ContextBuilder::new(content.clone(), ContextLimits::from(&config.chat)),
            PromptAssembler::new(&config.chat, &config.llm),
            provider,
            Duration::from_secs(config.llm.timeout_secs),
        );

        let views = Views::new(&config).context("loading page templates")?;

        Ok(Self {
            content,
            auth: Arc::new(auth),
            chat: Arc::new(chat),
            views: Arc::new(views),
            config: Arc::new(config),
            db_pool,
        })
    }
}
