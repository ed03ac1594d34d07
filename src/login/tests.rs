use super::types::*;

#[test]
fn test_needs_login_when_redirected_to_login_url() {
    assert!(needs_login(Some("http://grafana.local/login"), false));
    assert!(needs_login(
        Some("http://grafana.local/login?redirectTo=%2Fd%2Foverview"),
        false
    ));
}

#[test]
fn test_needs_login_url_check_is_case_insensitive() {
    assert!(needs_login(Some("http://grafana.local/Login"), false));
    assert!(needs_login(Some("http://host/#/LOGIN"), false));
}

#[test]
fn test_needs_login_when_field_present() {
    assert!(needs_login(Some("http://grafana.local/d/overview"), true));
    assert!(needs_login(None, true));
}

#[test]
fn test_no_login_needed_on_dashboard_without_field() {
    assert!(!needs_login(Some("http://grafana.local/d/overview"), false));
    assert!(!needs_login(None, false));
}

#[test]
fn test_login_substring_matches_anywhere_in_the_url() {
    // Deliberately loose: hash-routed apps put login anywhere in the URL.
    assert!(needs_login(Some("http://host/app/login/extra"), false));
    assert!(needs_login(Some("http://host/#/auth/login"), false));
}

#[test]
fn test_login_state_follows_the_protocol() {
    use LoginState::*;
    assert!(Unknown.can_advance_to(SessionRestored));
    assert!(SessionRestored.can_advance_to(Authenticated));
    assert!(SessionRestored.can_advance_to(NeedsLogin));
    assert!(NeedsLogin.can_advance_to(LoggingIn));
    assert!(LoggingIn.can_advance_to(Authenticated));
    assert!(LoggingIn.can_advance_to(Failed));
}

#[test]
fn test_login_state_rejects_shortcuts_and_reversals() {
    use LoginState::*;
    assert!(!Unknown.can_advance_to(Authenticated));
    assert!(!Unknown.can_advance_to(LoggingIn));
    assert!(!NeedsLogin.can_advance_to(Authenticated));
    assert!(!Authenticated.can_advance_to(NeedsLogin));
    assert!(!Failed.can_advance_to(LoggingIn));
    assert!(!SessionRestored.can_advance_to(Unknown));
}

#[test]
fn test_failed_is_only_reachable_while_logging_in() {
    use LoginState::*;
    for state in [Unknown, SessionRestored, NeedsLogin, Authenticated, Failed] {
        assert!(!state.can_advance_to(Failed));
    }
    assert!(LoggingIn.can_advance_to(Failed));
}

#[test]
fn test_timing_constants_are_sane() {
    assert!(FIELD_POLL_INTERVAL < FIELD_TIMEOUT);
    assert!(POST_LOGIN_SETTLE < POST_SUBMIT_NAV_TIMEOUT);
    assert_eq!(TYPE_DELAY.as_millis(), 35);
}
