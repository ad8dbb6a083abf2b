use price_proxy_server::{
    api::app_router, build_state, config::Config, init_tracing, scheduler, shutdown,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let state = build_state(&config)?;

    // Runs once immediately, then every 15 seconds
    let refresh = scheduler::start_price_refresh(state.clone());

    let router = app_router(state.clone(), &config);
    tracing::info!("Price proxy listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown::shutdown_signal(state.shutdown.clone()))
        .await?;

    if let Err(e) = refresh.await {
        tracing::error!("Refresh supervisor failed: {}", e);
    }
    tracing::info!("Server closed");
    Ok(())
}
