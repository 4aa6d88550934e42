//! Static frontend assets.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Page routes that map onto a fixed HTML file.
const PAGE_ALIASES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/index", "index.html"),
    ("/lessons", "lessons.html"),
    ("/traditions", "traditions.html"),
    ("/news", "news.html"),
    ("/stories", "news.html"),
    ("/progress", "progress.html"),
    ("/profile", "profile.html"),
];

/// Map a request path to an aliased page, ignoring trailing slashes.
pub fn resolve_alias(path: &str) -> Option<&'static str> {
    let trimmed = path.trim_end_matches('/');
    let key = if trimmed.is_empty() { "/" } else { trimmed };
    PAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, file)| *file)
}

/// File service rooted at the static directory.
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Serve a non-API request.
    ///
    /// Aliased pages are served from their HTML file. Anything else is
    /// looked up as a file, then as `<path>.html`, then answered with a
    /// plain-text 404.
    pub async fn serve(&self, req: Request) -> Response {
        let method = req.method().clone();
        if method != Method::GET && method != Method::HEAD {
            return not_found();
        }
        let headers = req.headers().clone();
        let path = req.uri().path().to_string();

        if let Some(file) = resolve_alias(&path) {
            return self.fetch(&method, &headers, &format!("/{}", file)).await;
        }

        let response = self.fetch(&method, &headers, &path).await;
        if response.status() != StatusCode::NOT_FOUND || path.ends_with(".html") {
            return response;
        }

        let page = format!("{}.html", path.trim_end_matches('/'));
        tracing::trace!(%path, %page, "retrying with html extension");
        self.fetch(&method, &headers, &page).await
    }

    async fn fetch(&self, method: &Method, headers: &HeaderMap, path: &str) -> Response {
        let Ok(uri) = Uri::try_from(path) else {
            return not_found();
        };
        let mut req = Request::new(Body::empty());
        *req.method_mut() = method.clone();
        *req.uri_mut() = uri;
        *req.headers_mut() = headers.clone();

        let response = match ServeDir::new(&self.root).oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        if response.status() == StatusCode::NOT_FOUND {
            return not_found();
        }
        response.into_response()
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn site() -> (TempDir, Assets) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::write(dir.path().join("lessons.html"), "<h1>lessons</h1>").unwrap();
        fs::write(dir.path().join("news.html"), "<h1>news</h1>").unwrap();
        fs::write(dir.path().join("about.html"), "<h1>about</h1>").unwrap();
        fs::write(dir.path().join("styles.css"), "body { margin: 0 }").unwrap();
        let assets = Assets::new(dir.path());
        (dir, assets)
    }

    async fn get(assets: &Assets, path: &str) -> (StatusCode, String, String) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = assets.serve(req).await;
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn alias_table() {
        assert_eq!(resolve_alias("/"), Some("index.html"));
        assert_eq!(resolve_alias("/index"), Some("index.html"));
        assert_eq!(resolve_alias("/lessons/"), Some("lessons.html"));
        assert_eq!(resolve_alias("/stories"), Some("news.html"));
        assert_eq!(resolve_alias("/news//"), Some("news.html"));
        assert_eq!(resolve_alias("/styles.css"), None);
        assert_eq!(resolve_alias("/lessons/extra"), None);
    }

    #[tokio::test]
    async fn serves_aliased_pages() {
        let (_dir, assets) = site();
        let (status, content_type, body) = get(&assets, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/html"));
        assert_eq!(body, "<h1>home</h1>");

        let (_, _, body) = get(&assets, "/stories/").await;
        assert_eq!(body, "<h1>news</h1>");
    }

    #[tokio::test]
    async fn serves_files_with_mime_type() {
        let (_dir, assets) = site();
        let (status, content_type, body) = get(&assets, "/styles.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.starts_with("text/css"));
        assert_eq!(body, "body { margin: 0 }");
    }

    #[tokio::test]
    async fn falls_back_to_html_extension() {
        let (_dir, assets) = site();
        let (status, _, body) = get(&assets, "/about").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>about</h1>");
    }

    #[tokio::test]
    async fn missing_files_are_plain_404() {
        let (_dir, assets) = site();
        let (status, content_type, body) = get(&assets, "/missing.png").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body, "Not Found");

        // Aliased page whose file does not exist
        let (status, _, _) = get(&assets, "/profile").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let (_dir, assets) = site();
        let (status, _, body) = get(&assets, "/../etc/passwd").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn non_get_is_not_found() {
        let (_dir, assets) = site();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/lessons")
            .body(Body::empty())
            .unwrap();
        assert_eq!(assets.serve(req).await.status(), StatusCode::NOT_FOUND);
    }
}
