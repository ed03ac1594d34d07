use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use log::info;
use warp::Filter;

use super::routes;
use crate::capture::CaptureOrchestrator;
use crate::error_handling::types::WebError;

/// HTTP server exposing the capture endpoints.
pub struct WebServer {
    orchestrator: Arc<CaptureOrchestrator>,
    latest_image: PathBuf,
}

impl WebServer {
    pub fn new(orchestrator: Arc<CaptureOrchestrator>, latest_image: PathBuf) -> Self {
        Self {
            orchestrator,
            latest_image,
        }
    }

    /// Start the web server on the given address and port. Runs until the
    /// process is terminated.
    pub async fn start(&self, bind_address: &str, port: u16) -> Result<(), WebError> {
        let addr: SocketAddr = format!("{}:{}", bind_address, port)
            .parse()
            .map_err(|e| WebError::BindFailed(format!("{}:{}: {}", bind_address, port, e)))?;

        let routes = routes::bridge_image_route(self.orchestrator.clone(), self.latest_image.clone())
            .or(routes::latest_image_route(
                self.orchestrator.clone(),
                self.latest_image.clone(),
            ))
            .or(routes::viewer_route())
            .or(routes::health_route());

        info!("Web server listening on {}", addr);

        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
