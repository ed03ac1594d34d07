use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use log::warn;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use super::types::{ApiError, HealthResponse};
use crate::capture::{CaptureOrchestrator, CaptureRequest};
use crate::error_handling::types::CaptureError;

/// Signage players cache aggressively, so every response that carries (or
/// leads to) an image forbids caching outright.
pub const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Viewer page served at /bridge. Two stacked images double-buffer the
/// capture: the next frame is preloaded off-screen and cross-faded in only
/// once it has fully arrived, so the screen never shows a half-loaded PNG.
/// A failed poll just schedules the next one.
const VIEWER_HTML: &str = r#"<!doctype html>
<html>
<head>
<title>Dashboard Bridge</title>
<style>
  html, body { margin: 0; padding: 0; background: #000; height: 100%; overflow: hidden; }
  .layer { position: absolute; inset: 0; width: 100vw; height: 100vh; object-fit: contain; transition: opacity 0.4s ease; }
  .faded { opacity: 0; }
</style>
</head>
<body>
<img id="front" class="layer" src="/bridge-image">
<img id="back" class="layer faded">
<script>
  const POLL_MS = 3000;
  let front = document.getElementById('front');
  let back = document.getElementById('back');
  function refresh() {
    const next = new Image();
    next.onload = () => {
      back.src = next.src;
      back.classList.remove('faded');
      front.classList.add('faded');
      const swap = front; front = back; back = swap;
      setTimeout(refresh, POLL_MS);
    };
    next.onerror = () => setTimeout(refresh, POLL_MS);
    next.src = '/bridge-image?ts=' + Date.now();
  }
  setTimeout(refresh, POLL_MS);
</script>
</body>
</html>"#;

fn no_cache<R: Reply>(inner: R) -> warp::reply::Response {
    reply::with_header(
        reply::with_header(
            reply::with_header(inner, "Cache-Control", CACHE_CONTROL),
            "Pragma",
            "no-cache",
        ),
        "Expires",
        "0",
    )
    .into_response()
}

fn png_reply(png: Vec<u8>) -> warp::reply::Response {
    no_cache(reply::with_header(png, "Content-Type", "image/png"))
}

fn capture_error_reply(err: &CaptureError) -> warp::reply::Response {
    reply::with_status(
        reply::json(&ApiError {
            message: err.to_string(),
        }),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}

/// Writes the capture to the latest-image cache through a temporary sibling
/// so readers never see a half-written PNG. Failures are logged, a broken
/// cache must not fail the capture that produced it.
fn cache_latest(path: &Path, png: &[u8]) {
    let tmp = path.with_extension("png.tmp");
    let result = std::fs::write(&tmp, png).and_then(|_| std::fs::rename(&tmp, path));
    if let Err(e) = result {
        warn!("Could not cache latest image at {}: {}", path.display(), e);
    }
}

/// GET /bridge-image?full=<flag>
pub fn bridge_image_route(
    orchestrator: Arc<CaptureOrchestrator>,
    latest_image: PathBuf,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("bridge-image")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and_then(move |query: HashMap<String, String>| {
            let orchestrator = orchestrator.clone();
            let latest_image = latest_image.clone();
            async move {
                let request = CaptureRequest::from_query_flag(query.get("full").map(String::as_str));
                match orchestrator.capture(request).await {
                    Ok(png) => {
                        if !request.full_page {
                            cache_latest(&latest_image, &png);
                        }
                        Ok::<_, Rejection>(png_reply(png))
                    }
                    Err(e) => Ok::<_, Rejection>(capture_error_reply(&e)),
                }
            }
        })
}

/// GET /latest.png
///
/// Serves the cached capture, falling back to a fresh one when no cache
/// exists yet.
pub fn latest_image_route(
    orchestrator: Arc<CaptureOrchestrator>,
    latest_image: PathBuf,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("latest.png")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(move || {
            let orchestrator = orchestrator.clone();
            let latest_image = latest_image.clone();
            async move {
                if let Ok(png) = tokio::fs::read(&latest_image).await {
                    return Ok::<_, Rejection>(png_reply(png));
                }
                match orchestrator.capture(CaptureRequest::default()).await {
                    Ok(png) => {
                        cache_latest(&latest_image, &png);
                        Ok::<_, Rejection>(png_reply(png))
                    }
                    Err(e) => Ok::<_, Rejection>(capture_error_reply(&e)),
                }
            }
        })
}

/// GET /bridge
pub fn viewer_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("bridge")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async move { Ok::<_, Rejection>(no_cache(reply::html(VIEWER_HTML))) })
}

/// GET /health
pub fn health_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|| async move {
            Ok::<_, Rejection>(reply::json(&HealthResponse {
                ok: true,
                time: Utc::now().to_rfc3339(),
            }))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cache_latest_writes_atomically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latest.png");

        cache_latest(&path, b"png-bytes");

        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
        assert!(!path.with_extension("png.tmp").exists());
    }

    #[test]
    fn test_cache_latest_overwrites_previous_capture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latest.png");

        cache_latest(&path, b"first");
        cache_latest(&path, b"second");

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_viewer_response_forbids_caching() {
        let resp = warp::test::request()
            .path("/bridge")
            .reply(&viewer_route())
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["cache-control"], CACHE_CONTROL);
        assert_eq!(resp.headers()["pragma"], "no-cache");
        assert_eq!(resp.headers()["expires"], "0");
    }

    #[tokio::test]
    async fn test_health_reports_ok_with_timestamp() {
        let resp = warp::test::request()
            .path("/health")
            .reply(&health_route())
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(resp.body().to_vec()).unwrap();
        assert!(body.contains("\"ok\":true"));
        assert!(body.contains("\"time\":"));
    }

    #[test]
    fn test_viewer_page_fades_polls_and_retries() {
        assert!(VIEWER_HTML.contains("POLL_MS = 3000"));
        assert!(VIEWER_HTML.contains("onerror"));
        assert!(VIEWER_HTML.contains("opacity"));
        assert!(VIEWER_HTML.contains("/bridge-image"));
    }
}
