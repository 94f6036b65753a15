mod dashboard;
mod router;
mod telemetry;
mod views;

use std::{net::SocketAddr, sync::Arc};

use bizgloss_api::CatalogClient;
use bizgloss_util::{load_env_file, AppConfig};
use tracing::info;

use crate::dashboard::Dashboard;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let http = reqwest::Client::builder().build()?;
    let client = CatalogClient::new(config.api_base_url.clone(), http);
    info!(stage = "app", api = %client.base_url(), "mounting dashboard views");
    let dashboard = Arc::new(Dashboard::mount(client));

    let startup = dashboard.clone();
    tokio::spawn(async move {
        let snapshot = startup.settled().await;
        info!(
            stage = "view",
            domains = snapshot.domains.as_str(),
            glossary = snapshot.glossary.as_str(),
            "initial views settled"
        );
    });

    let state = router::AppState::new(metrics, dashboard);

    let addr: SocketAddr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
