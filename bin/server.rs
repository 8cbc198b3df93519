// Label Draft - Web Server
// REST API with Axum: label drafting and expert-review lead capture

use anyhow::{Context, Result};
use label_draft::server::{create_router, AppState};
use label_draft::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "label_draft=info,tower_http=debug,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    if config.api_key.is_none() {
        if config.dev_mode {
            tracing::warn!("RESEND_API_KEY not set; leads will be logged, not emailed");
        } else {
            tracing::warn!("RESEND_API_KEY not set; /api/send-lead will answer 500");
        }
    }

    let addr = config.socket_addr();
    let app = create_router(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("🏷️  Label Draft - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/health", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
