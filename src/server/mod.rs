pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::error::{GatewayError, Result};
use crate::utils::shutdown_signal;
use crate::zabbix::HttpTransport;

pub use routes::{router, AppState};

/// Serve the alarm table until SIGINT/SIGTERM.
pub async fn serve(settings: &Settings) -> Result<()> {
    let transport = HttpTransport::new(settings)?;
    info!("Zabbix API endpoint: {}", transport.url());

    let state = AppState {
        transport: Arc::new(transport),
    };
    let app = router(state, &settings.server.path);

    let addr: SocketAddr = settings
        .server_addr()
        .parse()
        .map_err(|e| GatewayError::Validation(format!("Invalid listen address '{}': {}", settings.server_addr(), e)))?;
    info!("Listening on {} (alarm table at {})", addr, settings.server.path);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
