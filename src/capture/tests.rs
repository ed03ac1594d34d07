use super::types::*;

#[test]
fn test_full_page_flag_truthy_spellings() {
    assert!(CaptureRequest::from_query_flag(Some("1")).full_page);
    assert!(CaptureRequest::from_query_flag(Some("true")).full_page);
    assert!(CaptureRequest::from_query_flag(Some("yes")).full_page);
    assert!(CaptureRequest::from_query_flag(Some("TRUE")).full_page);
    assert!(CaptureRequest::from_query_flag(Some("Yes")).full_page);
}

#[test]
fn test_full_page_flag_falsy_spellings() {
    assert!(!CaptureRequest::from_query_flag(None).full_page);
    assert!(!CaptureRequest::from_query_flag(Some("")).full_page);
    assert!(!CaptureRequest::from_query_flag(Some("0")).full_page);
    assert!(!CaptureRequest::from_query_flag(Some("false")).full_page);
    assert!(!CaptureRequest::from_query_flag(Some("on")).full_page);
}

#[test]
fn test_default_request_captures_viewport_only() {
    assert!(!CaptureRequest::default().full_page);
}

#[test]
fn test_page_style_script_hides_scrollbars_and_forces_background() {
    assert!(PAGE_STYLE_SCRIPT.contains("::-webkit-scrollbar"));
    assert!(PAGE_STYLE_SCRIPT.contains("background: #ffffff"));
}
