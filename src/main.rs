use std::sync::Arc;

use mensa_menu_api::api;
use mensa_menu_api::config::Config;
use mensa_menu_api::fetch::PdfTextExtractor;
use mensa_menu_api::scrape::build_client;
use mensa_menu_api::store::MenuStore;
use mensa_menu_api::update::UpdateService;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mensa_menu_api=info,main=info")),
        )
        .init();

    // reqwest and rustls share the process-wide crypto provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = Config::from_env()?;
    info!(
        page = %config.menu_page_url,
        refresh_secs = config.refresh_interval.as_secs(),
        "configuration loaded"
    );

    let store = Arc::new(MenuStore::new());
    let updater = Arc::new(UpdateService::new(
        build_client()?,
        config.clone(),
        Arc::clone(&store),
        Arc::new(PdfTextExtractor),
    ));
    // Menus load in the background; requests answer 503 until the first run.
    let update_task = updater.spawn();

    let app = api::router(store);
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!(addr = %config.listen_addr(), "menu API listening");
    axum::serve(listener, app).await?;

    update_task.abort();
    Ok(())
}
