use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::timeout;

use super::types::{LaunchSpec, INITIAL_WINDOW, LAUNCH_ARGS};
use crate::error_handling::types::BrowserError;

const LIVENESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Generation-tagged holder for a shared resource that may die behind our
/// back. The generation lets the disconnect observer of an old instance
/// avoid clearing a newer one that already replaced it.
pub(crate) struct Slot<T> {
    inner: Arc<Mutex<SlotState<T>>>,
}

pub(crate) struct SlotState<T> {
    pub value: Option<T>,
    pub generation: u64,
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlotState {
                value: None,
                generation: 0,
            })),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.inner.lock().await
    }

    /// Fills the slot through `launch` when it is empty, holding the lock
    /// across the whole launch. Concurrent callers therefore share one
    /// instance instead of racing several into existence.
    ///
    /// The closure receives the generation the new value will carry, so a
    /// disconnect observer spawned inside it can later call [`clear_if`]
    /// with the matching tag. Returns the locked state and whether this
    /// call performed the launch.
    ///
    /// [`clear_if`]: Slot::clear_if
    pub async fn ensure<F, Fut, E>(
        &self,
        launch: F,
    ) -> Result<(MutexGuard<'_, SlotState<T>>, bool), E>
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut state = self.inner.lock().await;
        if state.value.is_some() {
            return Ok((state, false));
        }
        let generation = state.generation + 1;
        let value = launch(generation).await?;
        state.generation = generation;
        state.value = Some(value);
        Ok((state, true))
    }

    /// Clears the slot only if it still holds the given generation.
    pub async fn clear_if(&self, generation: u64) -> Option<T> {
        let mut state = self.inner.lock().await;
        if state.generation == generation {
            state.value.take()
        } else {
            None
        }
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Owns the single shared Chromium process and hands out fresh pages.
///
/// The browser is launched lazily on first use and relaunched whenever the
/// liveness probe fails or the CDP connection drops. The slot mutex is held
/// across the whole launch so concurrent callers never race two Chromium
/// processes into existence.
pub struct BrowserManager {
    spec: LaunchSpec,
    slot: Slot<Browser>,
}

impl BrowserManager {
    pub fn new(spec: LaunchSpec) -> Self {
        Self {
            spec,
            slot: Slot::new(),
        }
    }

    /// Returns a fresh blank page on a live browser, launching or
    /// relaunching Chromium as needed.
    pub async fn page(&self) -> Result<Page, BrowserError> {
        {
            let mut state = self.slot.lock().await;
            if let Some(browser) = state.value.as_ref() {
                match timeout(LIVENESS_TIMEOUT, browser.version()).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => {
                        warn!("Browser liveness probe failed: {}, relaunching", e);
                        Self::dispose(&mut state).await;
                    }
                    Err(_) => {
                        warn!("Browser liveness probe timed out, relaunching");
                        Self::dispose(&mut state).await;
                    }
                }
            }
        }

        let spec = self.spec.clone();
        let slot = self.slot.clone();
        let (state, launched) = self
            .slot
            .ensure(|generation| async move {
                let (browser, mut handler) = Self::launch(&spec).await?;

                // The CDP event stream must be drained for the connection
                // to make progress. When the stream ends the process is
                // gone, so the observer clears the slot for the next
                // caller to relaunch.
                tokio::spawn(async move {
                    while let Some(event) = handler.next().await {
                        if let Err(e) = event {
                            debug!("CDP event loop error: {}", e);
                        }
                    }
                    warn!("Browser disconnected (generation {})", generation);
                    if let Some(mut dead) = slot.clear_if(generation).await {
                        let _ = dead.wait().await;
                    }
                });

                Ok::<_, BrowserError>(browser)
            })
            .await?;
        if launched {
            info!("Browser launched (generation {})", state.generation);
        }

        let browser = match state.value.as_ref() {
            Some(browser) => browser,
            None => return Err(BrowserError::Disconnected),
        };

        let page = browser.new_page("about:blank").await?;
        Ok(page)
    }

    async fn launch(spec: &LaunchSpec) -> Result<(Browser, chromiumoxide::Handler), BrowserError> {
        let mut builder = BrowserConfig::builder().window_size(INITIAL_WINDOW.0, INITIAL_WINDOW.1);
        for arg in LAUNCH_ARGS {
            builder = builder.arg(*arg);
        }
        if let Some(path) = &spec.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if !spec.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::LaunchFailed)?;

        Browser::launch(config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))
    }

    async fn dispose(state: &mut SlotState<Browser>) {
        if let Some(mut browser) = state.value.take() {
            let _ = browser.close().await;
            let _ = browser.wait().await;
        }
    }

    /// Closes the browser if one is running.
    pub async fn shutdown(&self) {
        let mut state = self.slot.lock().await;
        Self::dispose(&mut state).await;
        info!("Browser shut down");
    }
}
