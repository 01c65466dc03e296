//! Static front-end file responder.
//!
//! Serves files from the configured root directory. `/` maps to
//! `index.html`. The request path is percent-decoded and resolved lexically
//! under the root; any path that would escape the root is refused.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::routes::AppState;
use super::text_response;

pub async fn serve(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let root = &state.config.static_dir;
    let raw = uri.path().trim_start_matches('/');
    let rel = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());

    let file = if rel.is_empty() {
        root.join("index.html")
    } else {
        match resolve_under_root(root, &rel) {
            Some(path) => path,
            None => return text_response(StatusCode::FORBIDDEN, "Forbidden"),
        }
    };

    match tokio::fs::read(&file).await {
        Ok(data) => {
            let content_type = content_type_for(&file);
            ([(header::CONTENT_TYPE, content_type)], data).into_response()
        }
        Err(err) => {
            // Directories land here too; both read as 404.
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to read {}: {}", file.display(), err);
            }
            text_response(StatusCode::NOT_FOUND, "Not Found")
        }
    }
}

/// Resolve `rel` lexically under `root`. `..` components pop back toward
/// the root; popping past it, or an absolute component, yields `None`.
fn resolve_under_root(root: &Path, rel: &str) -> Option<PathBuf> {
    let mut out = root.to_path_buf();
    let mut depth = 0usize;
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return None;
                }
                out.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Content type by file extension; unknown extensions download as bytes.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
