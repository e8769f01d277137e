use std::sync::Arc;

use anyhow::Context;
use chat_relay::{
    bootstrap::build_relay, config::Settings, routes, services::prompt::PromptStyle,
    state::AppState, telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let settings = Settings::load().context("invalid configuration")?;
    let relay = build_relay(&settings, PromptStyle::Bracketed).await?;
    let state = Arc::new(AppState::new(relay));

    let app = routes::create_router().with_state(state);

    let addr = settings.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("chat relay listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
