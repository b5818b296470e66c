//! Club site web server and CLI entry point.
//!
//! Binary name: `clubsite`
//!
//! Parses CLI arguments, loads configuration, opens the database and wires
//! services, then dispatches to a command handler or starts the web server.

mod cli;
mod http;
mod state;

use anyhow::Context as _;
use clap::Parser;
use clap_complete::generate;
use console::style;

use clubsite_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{AdminAction, Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut tracing_options = if cli.quiet && cli.verbose == 0 {
        TracingOptions::quiet()
    } else {
        TracingOptions::from_verbosity(cli.verbose)
    };
    tracing_options.json = cli.log_json;
    tracing_options.otel = cli.otel;
    init_tracing(&tracing_options).map_err(|e| anyhow::anyhow!("failed to init tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "clubsite", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli.config).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {addr}"))?;

            tracing::info!(%addr, provider = state.chat.provider_name(), "server starting");
            if !cli.quiet {
                println!(
                    "  {} {} listening on {}",
                    style("⚡").bold(),
                    style(&state.config.chat.club_name).bold(),
                    style(format!("http://{addr}")).cyan()
                );
                println!("  {}", style("Press Ctrl+C to stop").dim());
            }

            let db_pool = state.db_pool.clone();
            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            db_pool.close().await;
            tracing::info!("server stopped");
        }

        Commands::Admin { action } => match action {
            AdminAction::Create { username, password } => {
                cli::admin::create_admin(&state, &username, password, cli.json).await?;
            }
            AdminAction::ResetPassword { username, password } => {
                cli::admin::reset_password(&state, &username, password, cli.json).await?;
            }
        },

        Commands::Chat => {
            cli::chat::run_chat(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
