use super::cookie_store::CookieStore;
use crate::error_handling::types::StoreError;
use tempfile::tempdir;

#[test]
fn test_load_missing_file_is_none() {
    let dir = tempdir().unwrap();
    let store = CookieStore::new(dir.path().join("cookies.json"));

    let loaded = store.load().unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_empty_file_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, "").unwrap();

    let store = CookieStore::new(&path);
    let loaded = store.load().unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_empty_array_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, "[]").unwrap();

    let store = CookieStore::new(&path);
    let loaded = store.load().unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_load_corrupt_file_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = CookieStore::new(&path);
    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::ParseFailed(_)));
}

#[test]
fn test_load_parses_browser_shaped_records() {
    // Field names as the browser reports them, including ones the cookie
    // parameters do not carry.
    let json = r#"[
        {
            "name": "grafana_session",
            "value": "abc123",
            "domain": "grafana.local",
            "path": "/",
            "expires": 1893456000.0,
            "size": 22,
            "httpOnly": true,
            "secure": false,
            "session": false,
            "priority": "Medium",
            "sameParty": false,
            "sourceScheme": "NonSecure",
            "sourcePort": 80
        }
    ]"#;

    let dir = tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, json).unwrap();

    let store = CookieStore::new(&path);
    let cookies = store.load().unwrap().expect("cookies expected");
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies[0].name, "grafana_session");
    assert_eq!(cookies[0].value, "abc123");
    assert_eq!(cookies[0].domain.as_deref(), Some("grafana.local"));
}

#[test]
fn test_save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("session").join("cookies.json");
    let store = CookieStore::new(&path);

    store.save(&[]).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
}

#[test]
fn test_save_writes_readable_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    let store = CookieStore::new(&path);

    store.save(&[]).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw.trim(), "[]");
    assert!(!path.with_extension("json.tmp").exists());
}
