//! Redirect interception
//!
//! With interception enabled, a redirect is replaced by a 200 page that links
//! to the target, so the toolbar of the redirecting request stays visible.

use crate::utils::html::html_escape;
use axum::body::Body;
use axum::response::Response;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderValue, StatusCode};

/// Status codes that are intercepted
pub const REDIRECT_CODES: [StatusCode; 4] = [
	StatusCode::MOVED_PERMANENTLY,
	StatusCode::FOUND,
	StatusCode::SEE_OTHER,
	StatusCode::NOT_MODIFIED,
];

/// Render the interstitial page for a redirect to `location`
pub fn render_redirect_page(location: &str, code: StatusCode) -> String {
	let location = html_escape(location);
	format!(
		r#"<!DOCTYPE html>
<html>
<head>
<title>Redirect intercepted</title>
</head>
<body>
<h1>HTTP Redirect ({code})</h1>
<p>Location: <a href="{location}">{location}</a></p>
<p class="notice">The debug toolbar has intercepted a redirect to the above URL for debug viewing purposes. You can click the above link to continue with the redirect as normal. To disable this feature, set the config variable <code>DEBUG_TB_INTERCEPT_REDIRECTS</code> to <code>false</code>.</p>
</body>
</html>
"#,
		code = code.as_u16(),
		location = location
	)
}

/// Replace a redirect response with the interstitial page.
///
/// Responses whose status is not in [`REDIRECT_CODES`] or that carry no
/// `Location` header are returned as they are.
pub fn intercept_redirect(response: Response<Body>) -> Response<Body> {
	let status = response.status();
	if !REDIRECT_CODES.contains(&status) {
		return response;
	}

	let location = match response.headers().get(LOCATION) {
		Some(value) if !value.is_empty() => String::from_utf8_lossy(value.as_bytes()).into_owned(),
		_ => return response,
	};

	tracing::debug!(location = location.as_str(), status = status.as_u16(), "intercepted redirect");

	let content = render_redirect_page(&location, status);
	let (mut parts, _) = response.into_parts();
	parts.status = StatusCode::OK;
	parts.headers.remove(LOCATION);
	parts.headers.insert(
		CONTENT_TYPE,
		HeaderValue::from_static("text/html; charset=utf-8"),
	);
	parts
		.headers
		.insert(CONTENT_LENGTH, HeaderValue::from(content.len()));

	Response::from_parts(parts, Body::from(content))
}
