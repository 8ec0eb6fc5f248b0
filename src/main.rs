use std::sync::{Arc, RwLock};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zpool_agent::auth::get_or_create_api_key;
use zpool_agent::models::LastAction;
use zpool_agent::routes::routes;
use zpool_agent::settings::load_settings;
use zpool_agent::zfs_management::ZfsManager;

//-----------------------------------------------------
// MAIN FUNCTION
//-----------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting zpool agent");

    let settings = load_settings();

    // Generate or read API key
    let api_key = get_or_create_api_key(&settings.server.api_key_file)?;
    info!(
        path = %settings.server.api_key_file.display(),
        "API key loaded"
    );

    let last_action = Arc::new(RwLock::new(None::<LastAction>));
    let routes = routes(ZfsManager::new(), api_key, last_action);

    let addr = settings.server.socket_addr();
    info!(%addr, "server starting");
    warp::serve(routes).run(addr).await;

    Ok(())
}
