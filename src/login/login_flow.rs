use chromiumoxide::{Element, Page};
use log::{debug, info, warn};
use tokio::time::{sleep, timeout, Instant};

use super::types::*;
use crate::configuration::types::{Credentials, Selectors};
use crate::error_handling::types::LoginError;
use crate::session_store::CookieStore;

/// Drives the interactive login form when the persisted session is invalid.
///
/// The flow always starts by injecting any persisted cookies and probing the
/// dashboard. Only when that probe lands on a login page does it fill the
/// form, at which point the fresh cookies replace the persisted ones.
pub struct LoginFlow {
    dashboard_url: String,
    login_url: String,
    selectors: Selectors,
    credentials: Credentials,
}

fn advance(state: &mut LoginState, next: LoginState) {
    debug_assert!(state.can_advance_to(next), "{:?} -> {:?}", state, next);
    debug!("Login state {:?} -> {:?}", state, next);
    *state = next;
}

impl LoginFlow {
    pub fn new(
        dashboard_url: String,
        login_url: String,
        selectors: Selectors,
        credentials: Credentials,
    ) -> Self {
        Self {
            dashboard_url,
            login_url,
            selectors,
            credentials,
        }
    }

    /// Ensures the page holds an authenticated session on the dashboard.
    ///
    /// On return the page is located on the dashboard URL with valid
    /// session cookies, which have also been persisted through the store.
    pub async fn ensure_logged_in(
        &self,
        page: &Page,
        store: &CookieStore,
    ) -> Result<LoginOutcome, LoginError> {
        let mut state = LoginState::Unknown;

        // A broken persisted session is indistinguishable from an expired
        // one, so every problem here degrades to the interactive flow.
        match store.load() {
            Ok(Some(cookies)) => {
                debug!("Injecting {} persisted cookies", cookies.len());
                if let Err(e) = page.set_cookies(cookies).await {
                    warn!("Could not inject persisted cookies: {}", e);
                }
            }
            Ok(None) => debug!("No persisted session"),
            Err(e) => warn!("Ignoring persisted session: {}", e),
        }
        advance(&mut state, LoginState::SessionRestored);

        self.goto(page, &self.dashboard_url).await?;

        if !self.login_required(page).await? {
            advance(&mut state, LoginState::Authenticated);
            debug!("Persisted session still valid");
            return Ok(LoginOutcome::AlreadyAuthenticated);
        }
        advance(&mut state, LoginState::NeedsLogin);

        info!("Session invalid, performing interactive login");
        self.goto(page, &self.login_url).await?;
        advance(&mut state, LoginState::LoggingIn);

        if let Err(e) = self.perform_login(page).await {
            advance(&mut state, LoginState::Failed);
            return Err(e);
        }

        self.goto(page, &self.dashboard_url).await?;
        sleep(POST_LOGIN_SETTLE).await;
        advance(&mut state, LoginState::Authenticated);

        match page.get_cookies().await {
            Ok(cookies) => {
                if let Err(e) = store.save(&cookies) {
                    warn!("Could not persist session: {}", e);
                }
            }
            Err(e) => warn!("Could not read cookies after login: {}", e),
        }

        info!("Interactive login complete");
        Ok(LoginOutcome::LoggedIn)
    }

    /// Fills and submits the login form on the current page.
    async fn perform_login(&self, page: &Page) -> Result<(), LoginError> {
        let username = self
            .wait_for_element(page, &self.selectors.username)
            .await?;
        self.type_slowly(&username, &self.credentials.username)
            .await?;

        let password = page.find_element(self.selectors.password.as_str()).await?;
        self.type_slowly(&password, &self.credentials.password)
            .await?;

        page.find_element(self.selectors.submit.as_str())
            .await?
            .click()
            .await?;

        // Hash-routed apps may never fire a real navigation, so the wait
        // expiring is not an error.
        match timeout(POST_SUBMIT_NAV_TIMEOUT, page.wait_for_navigation()).await {
            Ok(Ok(_)) => debug!("Post-submit navigation complete"),
            Ok(Err(e)) => debug!("Post-submit navigation reported: {}", e),
            Err(_) => debug!("No navigation observed after submit"),
        }
        Ok(())
    }

    async fn login_required(&self, page: &Page) -> Result<bool, LoginError> {
        let url = page.url().await?;
        let field_present = page
            .find_element(self.selectors.username.as_str())
            .await
            .is_ok();
        Ok(needs_login(url.as_deref(), field_present))
    }

    async fn goto(&self, page: &Page, url: &str) -> Result<(), LoginError> {
        debug!("Navigating to {}", url);
        match timeout(NAV_TIMEOUT, page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(LoginError::CdpError(e.to_string())),
            Err(_) => Err(LoginError::NavigationTimeout(url.to_string())),
        }
    }

    async fn wait_for_element(&self, page: &Page, selector: &str) -> Result<Element, LoginError> {
        let deadline = Instant::now() + FIELD_TIMEOUT;
        loop {
            if let Ok(element) = page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(LoginError::FieldTimeout(selector.to_string()));
            }
            sleep(FIELD_POLL_INTERVAL).await;
        }
    }

    /// Clears any pre-filled value and types the text one character at a
    /// time, so frameworks that listen for keystrokes see real input.
    async fn type_slowly(&self, element: &Element, text: &str) -> Result<(), LoginError> {
        element.click().await?;
        element
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        for ch in text.chars() {
            element.type_str(ch.to_string()).await?;
            sleep(TYPE_DELAY).await;
        }
        Ok(())
    }
}
