/// Desktop user agent presented to the dashboard, so it serves the full
/// layout instead of a headless or mobile variant.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGE: &str = "de-DE,de;q=0.9,en;q=0.8";

/// Injected into every new document before any page script runs. Kiosk
/// screens must never show scrollbars, and a transparent body renders black
/// in the captured PNG.
pub const PAGE_STYLE_SCRIPT: &str = r#"(() => {
  const apply = () => {
    const style = document.createElement('style');
    style.textContent = `
      ::-webkit-scrollbar { display: none !important; }
      html, body { overflow: hidden !important; background: #ffffff !important; }
    `;
    document.documentElement.appendChild(style);
  };
  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', apply);
  } else {
    apply();
  }
})();"#;

#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct CaptureRequest {
    pub full_page: bool,
}

impl CaptureRequest {
    /// Builds a request from the `full` query parameter. Accepted truthy
    /// spellings are `1`, `true` and `yes`, everything else captures the
    /// viewport only.
    pub fn from_query_flag(flag: Option<&str>) -> Self {
        let full_page = matches!(
            flag.map(|f| f.to_ascii_lowercase()).as_deref(),
            Some("1") | Some("true") | Some("yes")
        );
        Self { full_page }
    }
}
