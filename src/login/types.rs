use std::time::Duration;

/// Upper bound for login page navigations.
pub const NAV_TIMEOUT: Duration = Duration::from_secs(60);
/// How long to wait for the username field to appear on the login page.
pub const FIELD_TIMEOUT: Duration = Duration::from_secs(20);
/// Poll interval while waiting for an element.
pub const FIELD_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Pause between typed characters, so scripted input frameworks register it.
pub const TYPE_DELAY: Duration = Duration::from_millis(35);
/// How long to wait for the post-submit navigation. Single-page apps may
/// never navigate, so expiry is not an error.
pub const POST_SUBMIT_NAV_TIMEOUT: Duration = Duration::from_secs(30);
/// Settle time after a successful submit before cookies are harvested.
pub const POST_LOGIN_SETTLE: Duration = Duration::from_millis(1200);

/// Protocol position of one authentication attempt.
///
/// `Failed` is absorbing: a fatal error while the form is being driven ends
/// the attempt, and only a fresh capture starts a new one.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LoginState {
    Unknown,
    SessionRestored,
    NeedsLogin,
    LoggingIn,
    Authenticated,
    Failed,
}

impl LoginState {
    /// Whether the protocol permits moving from `self` to `next`.
    pub fn can_advance_to(self, next: LoginState) -> bool {
        use LoginState::*;
        matches!(
            (self, next),
            (Unknown, SessionRestored)
                | (SessionRestored, Authenticated)
                | (SessionRestored, NeedsLogin)
                | (NeedsLogin, LoggingIn)
                | (LoggingIn, Authenticated)
                | (LoggingIn, Failed)
        )
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LoginOutcome {
    /// The persisted session was still valid, no form interaction happened.
    AlreadyAuthenticated,
    /// The interactive login form was filled and submitted.
    LoggedIn,
}

/// Decides whether the page we landed on demands a login.
///
/// Either signal alone is enough: being redirected to a URL containing
/// `login`, or the username field being present on the current page. The
/// dual check covers both server-side redirects and client-rendered login
/// forms that keep the original URL.
pub fn needs_login(url: Option<&str>, login_field_present: bool) -> bool {
    if login_field_present {
        return true;
    }
    match url {
        Some(url) => url.to_ascii_lowercase().contains("login"),
        None => false,
    }
}
