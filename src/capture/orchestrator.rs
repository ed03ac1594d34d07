use std::sync::Arc;

use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    AddScriptToEvaluateOnNewDocumentParams, CaptureScreenshotFormat,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use log::{debug, info, warn};
use tokio::time::Instant;
use uuid::Uuid;

use super::types::*;
use crate::browser_management::BrowserManager;
use crate::configuration::types::Viewport;
use crate::error_handling::types::{BrowserError, CaptureError};
use crate::login::LoginFlow;
use crate::readiness::ReadinessDetector;
use crate::session_store::CookieStore;

/// Runs one capture end to end: lease a page, authenticate, wait for the
/// dashboard to render, screenshot, and always give the page back.
pub struct CaptureOrchestrator {
    browser: Arc<BrowserManager>,
    login: LoginFlow,
    store: CookieStore,
    readiness: ReadinessDetector,
    viewport: Viewport,
}

impl CaptureOrchestrator {
    pub fn new(
        browser: Arc<BrowserManager>,
        login: LoginFlow,
        store: CookieStore,
        readiness: ReadinessDetector,
        viewport: Viewport,
    ) -> Self {
        Self {
            browser,
            login,
            store,
            readiness,
            viewport,
        }
    }

    /// Produces a PNG of the dashboard.
    ///
    /// The page is closed regardless of outcome so a failed capture never
    /// leaks a tab into the shared browser.
    pub async fn capture(&self, request: CaptureRequest) -> Result<Vec<u8>, CaptureError> {
        let capture_id = Uuid::new_v4();
        let started = Instant::now();
        info!("Capture {} started (full_page={})", capture_id, request.full_page);

        let page = self.browser.page().await?;
        let result = self.capture_on(&page, request).await;
        if let Err(e) = page.close().await {
            debug!("Capture {} page close failed: {}", capture_id, e);
        }

        match &result {
            Ok(png) => info!(
                "Capture {} finished: {} bytes in {} ms",
                capture_id,
                png.len(),
                started.elapsed().as_millis()
            ),
            Err(e) => warn!(
                "Capture {} failed after {} ms: {}",
                capture_id,
                started.elapsed().as_millis(),
                e
            ),
        }
        result
    }

    async fn capture_on(
        &self,
        page: &Page,
        request: CaptureRequest,
    ) -> Result<Vec<u8>, CaptureError> {
        self.prepare_page(page).await?;

        let outcome = self.login.ensure_logged_in(page, &self.store).await?;
        debug!("Login outcome: {:?}", outcome);

        self.readiness.wait_until_ready(page).await;

        // A transparent canvas renders black in the PNG.
        if let Err(e) = page
            .evaluate("document.body && (document.body.style.background = '#ffffff')")
            .await
        {
            debug!("Background force failed: {}", e);
        }

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(request.full_page)
            .build();
        let png = page
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::Screenshot(e.to_string()))?;
        Ok(png)
    }

    /// Applies viewport, user agent and styling overrides. Must run before
    /// any navigation so the injected script covers every document.
    async fn prepare_page(&self, page: &Page) -> Result<(), CaptureError> {
        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(self.viewport.width as i64)
            .height(self.viewport.height as i64)
            .device_scale_factor(self.viewport.device_scale_factor)
            .mobile(false)
            .build()
            .map_err(|e| CaptureError::Browser(BrowserError::CdpError(e)))?;
        page.execute(metrics).await?;

        let user_agent = SetUserAgentOverrideParams::builder()
            .user_agent(USER_AGENT)
            .accept_language(ACCEPT_LANGUAGE)
            .build()
            .map_err(|e| CaptureError::Browser(BrowserError::CdpError(e)))?;
        page.execute(user_agent).await?;

        let style_script = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(PAGE_STYLE_SCRIPT)
            .build()
            .map_err(|e| CaptureError::Browser(BrowserError::CdpError(e)))?;
        page.execute(style_script).await?;

        Ok(())
    }
}
