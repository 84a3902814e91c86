use ordersum_infra::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ordersum_observability::init();

    let config = ServiceConfig::from_env()?;

    let app = ordersum_api::app::build_app(&config).await;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
