use std::future::Future;
use std::time::Duration;

use chromiumoxide::Page;
use log::{debug, warn};
use tokio::time::{sleep, Instant};

/// How often the resource entry count is sampled.
pub const RESOURCE_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// The count must hold still this long for the network to count as idle.
pub const IDLE_WINDOW: Duration = Duration::from_millis(1000);
/// Upper bound on the idle watch, busy dashboards never go quiet.
pub const IDLE_BOUND: Duration = Duration::from_secs(10);
/// Flat delay raced against the idle watch.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(2500);
/// How long to wait for an explicit ready selector.
pub const READY_SELECTOR_TIMEOUT: Duration = Duration::from_secs(20);
/// Final settle after readiness, lets the last paint land.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ReadyOutcome {
    /// The configured ready selector appeared.
    Selector,
    /// Resource loading went quiet.
    NetworkIdle,
    /// The fallback delay elapsed first.
    FallbackDelay,
    /// The ready selector never appeared. Capture proceeds anyway so the
    /// screen shows whatever state the dashboard reached.
    TimedOut,
}

#[derive(Debug, PartialEq)]
pub(crate) enum RaceWinner {
    Primary,
    Fallback,
}

/// Runs the primary readiness signal against a flat fallback delay and
/// reports which finished first.
pub(crate) async fn race_with_fallback<F>(primary: F, fallback_delay: Duration) -> RaceWinner
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = primary => RaceWinner::Primary,
        _ = sleep(fallback_delay) => RaceWinner::Fallback,
    }
}

/// Decides when a dashboard page has finished rendering.
///
/// With a configured selector the question has a crisp answer. Without one
/// the detector watches the page's resource timing entries and declares
/// readiness once loading goes quiet, racing that against a flat delay so a
/// chatty page cannot stall captures.
pub struct ReadinessDetector {
    ready_selector: Option<String>,
}

impl ReadinessDetector {
    pub fn new(ready_selector: Option<String>) -> Self {
        Self { ready_selector }
    }

    pub async fn wait_until_ready(&self, page: &Page) -> ReadyOutcome {
        let outcome = match &self.ready_selector {
            Some(selector) => self.wait_for_selector(page, selector).await,
            None => match race_with_fallback(Self::network_idle(page), FALLBACK_DELAY).await {
                RaceWinner::Primary => ReadyOutcome::NetworkIdle,
                RaceWinner::Fallback => ReadyOutcome::FallbackDelay,
            },
        };
        debug!("Page ready: {:?}", outcome);
        sleep(SETTLE_DELAY).await;
        outcome
    }

    async fn wait_for_selector(&self, page: &Page, selector: &str) -> ReadyOutcome {
        let deadline = Instant::now() + READY_SELECTOR_TIMEOUT;
        loop {
            if page.find_element(selector).await.is_ok() {
                return ReadyOutcome::Selector;
            }
            if Instant::now() >= deadline {
                warn!("Ready selector {} never appeared", selector);
                return ReadyOutcome::TimedOut;
            }
            sleep(RESOURCE_POLL_INTERVAL).await;
        }
    }

    /// Resolves once the resource entry count has been stable for a full
    /// idle window, or once the overall bound expires.
    async fn network_idle(page: &Page) {
        let bound = Instant::now() + IDLE_BOUND;
        let mut last_count: Option<u64> = None;
        let mut stable_since = Instant::now();

        while Instant::now() < bound {
            let count = match page
                .evaluate("performance.getEntriesByType('resource').length")
                .await
                .and_then(|v| v.into_value::<u64>().map_err(Into::into))
            {
                Ok(count) => count,
                Err(e) => {
                    debug!("Resource count probe failed: {}", e);
                    return;
                }
            };

            if last_count != Some(count) {
                last_count = Some(count);
                stable_since = Instant::now();
            } else if stable_since.elapsed() >= IDLE_WINDOW {
                return;
            }

            sleep(RESOURCE_POLL_INTERVAL).await;
        }
    }
}
