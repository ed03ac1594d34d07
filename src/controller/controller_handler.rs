use std::sync::Arc;

use log::info;

use crate::browser_management::{BrowserManager, LaunchSpec};
use crate::capture::CaptureOrchestrator;
use crate::configuration::config::Config;
use crate::error_handling::types::ControllerError;
use crate::login::LoginFlow;
use crate::readiness::ReadinessDetector;
use crate::session_store::CookieStore;
use crate::web_interface::WebServer;

/// Wires the subsystems together and keeps the web server running.
pub struct Controller {
    config: Config,
    browser: Arc<BrowserManager>,
    web_server: WebServer,
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        config.validate()?;

        let browser = Arc::new(BrowserManager::new(LaunchSpec {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
        }));

        let login = LoginFlow::new(
            config.dashboard_url.clone(),
            config.login_url.clone(),
            config.selectors(),
            config.credentials(),
        );

        let orchestrator = Arc::new(CaptureOrchestrator::new(
            browser.clone(),
            login,
            CookieStore::new(&config.cookie_file),
            ReadinessDetector::new(config.ready_selector.clone()),
            config.viewport(),
        ));

        let web_server = WebServer::new(orchestrator, config.latest_image.clone());

        Ok(Self {
            config,
            browser,
            web_server,
        })
    }

    /// Runs the web server until the process is terminated.
    pub async fn run(&mut self) -> Result<(), ControllerError> {
        info!("Bridging {} for capture", self.config.dashboard_url);

        self.web_server
            .start(&self.config.bind_address, self.config.port)
            .await?;

        Ok(())
    }

    pub async fn shutdown(&self) {
        info!("Shutting down");
        self.browser.shutdown().await;
    }
}
