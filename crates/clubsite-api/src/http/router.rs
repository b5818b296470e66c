//! Axum router configuration with middleware.
//!
//! Public pages at the root, the chat and auth endpoints under `/api`, and
//! the admin JSON API under `/api/admin`. Middleware: admin page guard,
//! CORS, tracing.

use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::guard::admin_guard;
use crate::http::handlers::{admin, auth, chat, pages};
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_api = Router::new()
        .route("/stats", get(admin::stats))
        // Roles
        .route("/roles", get(admin::list_roles).post(admin::create_role))
        .route("/roles/{id}", delete(admin::delete_role))
        // Members
        .route("/members", get(admin::list_members).post(admin::create_member))
        .route(
            "/members/{id}",
            get(admin::get_member)
                .put(admin::update_member)
                .delete(admin::delete_member),
        )
        // Events
        .route("/events", get(admin::list_events).post(admin::create_event))
        .route(
            "/events/{id}",
            get(admin::get_event)
                .put(admin::update_event)
                .delete(admin::delete_event),
        )
        // Projects
        .route("/projects", get(admin::list_projects).post(admin::create_project))
        .route(
            "/projects/{id}",
            get(admin::get_project)
                .put(admin::update_project)
                .delete(admin::delete_project),
        )
        // News
        .route("/news", get(admin::list_news).post(admin::create_news))
        .route(
            "/news/{id}",
            get(admin::get_news)
                .put(admin::update_news)
                .delete(admin::delete_news),
        );

    let api = Router::new()
        .route("/chat", post(chat::chat))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .nest("/admin", admin_api);

    let mut router = Router::new()
        .route("/", get(pages::home))
        .route("/members", get(pages::members))
        .route("/events", get(pages::events))
        .route("/projects/{id}", get(pages::project))
        .route("/news/{id}", get(pages::news))
        .route(&state.config.server.login_path, get(pages::login))
        .route("/admin", get(pages::admin_index))
        .route("/admin/dashboard", get(pages::dashboard))
        .route("/health", get(health_check))
        .nest("/api", api)
        .fallback(pages::not_found);

    if let Some(dir) = state.config.server.static_dir.as_deref() {
        if std::path::Path::new(dir).is_dir() {
            router = router.nest_service("/static", ServeDir::new(dir));
            tracing::info!(path = %dir, "static file serving enabled");
        } else {
            tracing::warn!(path = %dir, "static directory not found, skipping");
        }
    }

    router
        .layer(middleware::from_fn_with_state(state.clone(), admin_guard))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus a database probe (no auth required).
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = if state.db_pool.ping().await { "ok" } else { "unavailable" };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
