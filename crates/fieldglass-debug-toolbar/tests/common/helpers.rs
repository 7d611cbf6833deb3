//! Router and request helpers

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Page used by most tests
pub const HTML_PAGE: &str = "<html><head><title>t</title></head><body><h1>Hello</h1></body></html>";

/// Status, headers and decoded body of a response
#[derive(Debug)]
pub struct TestResponse {
	/// Response status
	pub status: StatusCode,
	/// Response headers
	pub headers: HeaderMap,
	/// Raw body bytes
	pub bytes: Vec<u8>,
}

impl TestResponse {
	/// Body decoded as UTF-8
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.bytes).into_owned()
	}

	/// `Content-Length` header parsed as a number
	pub fn content_length(&self) -> Option<usize> {
		self.headers
			.get(http::header::CONTENT_LENGTH)
			.and_then(|v| v.to_str().ok())
			.and_then(|v| v.parse().ok())
	}
}

/// Application routes covering the response shapes the toolbar cares about
pub fn sample_app() -> Router {
	Router::new()
		.route("/", get(|| async { Html(HTML_PAGE) }))
		.route(
			"/upper",
			get(|| async { Html("<HTML><BODY><p>shout</p></BODY></HTML>") }),
		)
		.route("/fragment", get(|| async { Html("<p>no closing tag</p>") }))
		.route(
			"/json",
			get(|| async {
				(
					[(http::header::CONTENT_TYPE, "application/json")],
					r#"{"body":"</body>"}"#,
				)
			}),
		)
		.route(
			"/binary",
			get(|| async {
				(
					[(http::header::CONTENT_TYPE, "application/octet-stream")],
					vec![0u8, 159, 146, 150],
				)
			}),
		)
		.route("/missing", get(|| async { (StatusCode::NOT_FOUND, Html(HTML_PAGE)) }))
		.route("/redirect", get(|| async { Redirect::to("/target?a=1&b=2") }))
		.route(
			"/moved",
			get(|| async {
				(
					StatusCode::MOVED_PERMANENTLY,
					[(http::header::LOCATION, "/new-home")],
				)
			}),
		)
		.route("/permanent", get(|| async { Redirect::permanent("/new-home") }))
		.route(
			"/locationless",
			get(|| async { StatusCode::FOUND.into_response() }),
		)
}

/// Send a GET request to `router`
pub async fn get_request(router: Router, uri: &str) -> TestResponse {
	send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

/// Send a GET request carrying a `Cookie` header
pub async fn get_with_cookie(router: Router, uri: &str, cookie: &str) -> TestResponse {
	send(
		router,
		Request::builder()
			.uri(uri)
			.header(http::header::COOKIE, cookie)
			.body(Body::empty())
			.unwrap(),
	)
	.await
}

/// Send any request to `router`
pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
	let response: Response = router.oneshot(request).await.unwrap();
	let status = response.status();
	let headers = response.headers().clone();
	let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
	TestResponse {
		status,
		headers,
		bytes,
	}
}

/// Undo the HTML escaping applied to attribute values
pub fn html_unescape(s: &str) -> String {
	s.replace("&quot;", "\"")
		.replace("&#x27;", "'")
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&")
}
