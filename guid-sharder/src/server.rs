use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common_jamf::HttpJamfClient;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::router;

pub async fn serve<F>(config: Config, listener: TcpListener, shutdown: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let jamf_client = match HttpJamfClient::new(
        &config.jamf_base_url,
        &config.jamf_api_token,
        Duration::from_secs(config.upstream_timeout_secs),
        config.inventory_page_size,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(
                "Failed to create Jamf Pro client for URL {}: {}",
                config.jamf_base_url,
                e
            );
            return;
        }
    };

    let app = router::router(jamf_client);

    tracing::info!("listening on {:?}", listener.local_addr().unwrap());
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .unwrap()
}
