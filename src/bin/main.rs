use std::sync::Arc;

use dink_syndicate::{
    core::{db::init_backend, identity::AuthEvent},
    init_openapi_route,
    settings::get_config,
    AppState,
};
use poem::listener::TcpListener;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;

    let log_level = Level::DEBUG;
    // Logging to File
    let file_appender = tracing_appender::rolling::daily(config.log_dir(), "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    // Logging to Console
    // tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!("run with config: {:?}", config);

    // Postgres and Redis; the server still starts without them
    let backend = init_backend(&config).await;
    let app_state = Arc::new(AppState::new(backend, config.clone()));
    let _auth_log = app_state.auth_events.on_change(|event| match event {
        AuthEvent::SignedIn { account_id } => tracing::info!("account {} signed in", account_id),
        AuthEvent::SignedOut { account_id } => tracing::info!("account {} signed out", account_id),
    });

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;
    Ok(())
}
