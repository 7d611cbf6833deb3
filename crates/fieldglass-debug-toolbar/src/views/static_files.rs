//! Bundled static assets (toolbar stylesheet and script)

use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use http::{StatusCode, header};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Static route, relative to `/_debug_toolbar`
pub fn routes(static_dir: PathBuf) -> Router {
	Router::new()
		.route("/static/{*path}", get(serve_static))
		.with_state(Arc::new(static_dir))
}

/// Resolve a requested asset path inside `root`.
///
/// Only plain relative components are accepted; `..`, absolute paths,
/// drive prefixes and backslashes resolve to `None`.
pub fn resolve_asset(root: &Path, requested: &str) -> Option<PathBuf> {
	if requested.is_empty() || requested.contains('\\') {
		return None;
	}

	let relative = Path::new(requested);
	if !relative
		.components()
		.all(|c| matches!(c, Component::Normal(_)))
	{
		return None;
	}

	Some(root.join(relative))
}

async fn serve_static(
	State(root): State<Arc<PathBuf>>,
	UrlPath(path): UrlPath<String>,
) -> Response {
	let Some(file) = resolve_asset(&root, &path) else {
		tracing::debug!(path = path.as_str(), "rejected static asset path");
		return StatusCode::NOT_FOUND.into_response();
	};

	match tokio::fs::read(&file).await {
		Ok(bytes) => {
			let mime = mime_guess::from_path(&file).first_or_octet_stream();
			([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
		}
		Err(e) => {
			tracing::trace!(path = %file.display(), error = %e, "static asset not found");
			StatusCode::NOT_FOUND.into_response()
		}
	}
}
