//! HTML injection

use crate::error::{ToolbarError, ToolbarResult};
use axum::body::{Body, HttpBody};
use axum::response::Response;
use http::header::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, StatusCode};
use http_body_util::BodyExt;
use mime_guess::mime::{self, Mime};

const BODY_CLOSE: &str = "</body>";

/// Insert `insertion` immediately before the last case-insensitive
/// occurrence of `target`. Returns `None` when `target` does not occur.
pub fn insert_before_last_insensitive(
	haystack: &str,
	target: &str,
	insertion: &str,
) -> Option<String> {
	// ASCII lowercasing keeps byte offsets aligned with `haystack`
	let pos = haystack
		.to_ascii_lowercase()
		.rfind(&target.to_ascii_lowercase())?;

	let mut out = String::with_capacity(haystack.len() + insertion.len());
	out.push_str(&haystack[..pos]);
	out.push_str(insertion);
	out.push_str(&haystack[pos..]);
	Some(out)
}

/// Whether the response headers describe a body the toolbar can edit as text
pub fn is_textual_response(headers: &HeaderMap) -> bool {
	if let Some(encoding) = headers.get(CONTENT_ENCODING) {
		let identity = encoding
			.to_str()
			.map(|e| e.trim().eq_ignore_ascii_case("identity"))
			.unwrap_or(false);
		if !identity {
			return false;
		}
	}

	let Some(content_type) = headers.get(CONTENT_TYPE) else {
		return true;
	};
	let Some(mime) = content_type
		.to_str()
		.ok()
		.and_then(|ct| ct.parse::<Mime>().ok())
	else {
		return false;
	};

	let textual = mime.type_() == mime::TEXT || mime.essence_str() == "application/xhtml+xml";
	if !textual {
		return false;
	}

	match mime.get_param(mime::CHARSET) {
		None => true,
		Some(charset) => matches!(
			charset.as_str().to_ascii_lowercase().as_str(),
			"utf-8" | "utf8" | "us-ascii" | "ascii"
		),
	}
}

/// Inject the toolbar markup produced by `render` into a 200 text response.
///
/// Non-200 responses and non-text bodies pass through untouched, and so do
/// bodies of unknown length such as server-sent event streams, which are
/// never buffered. A text body without `</body>` is returned unchanged and
/// `render` is never called.
///
/// # Errors
///
/// [`ToolbarError::Http`] if the body cannot be read. The original body is
/// consumed at that point.
pub async fn inject_toolbar<F>(response: Response<Body>, render: F) -> ToolbarResult<Response<Body>>
where
	F: FnOnce() -> String,
{
	if response.status() != StatusCode::OK || !is_textual_response(response.headers()) {
		return Ok(response);
	}
	if HttpBody::size_hint(response.body()).exact().is_none() {
		tracing::trace!("response body is streamed; skipping toolbar injection");
		return Ok(response);
	}

	let (mut parts, body) = response.into_parts();
	let bytes = body
		.collect()
		.await
		.map_err(|e| ToolbarError::Http(e.to_string()))?
		.to_bytes();

	let html = match String::from_utf8(bytes.to_vec()) {
		Ok(html) => html,
		Err(_) => {
			tracing::trace!("response body is not UTF-8; skipping toolbar injection");
			return Ok(Response::from_parts(parts, Body::from(bytes)));
		}
	};

	let lowered = html.to_ascii_lowercase();
	if !lowered.contains(BODY_CLOSE) {
		tracing::trace!("no </body> tag in response; skipping toolbar injection");
		return Ok(Response::from_parts(parts, Body::from(bytes)));
	}

	let toolbar_html = render();
	let Some(injected) = insert_before_last_insensitive(&html, BODY_CLOSE, &toolbar_html) else {
		return Ok(Response::from_parts(parts, Body::from(bytes)));
	};

	parts
		.headers
		.insert(CONTENT_LENGTH, HeaderValue::from(injected.len()));
	Ok(Response::from_parts(parts, Body::from(injected)))
}
