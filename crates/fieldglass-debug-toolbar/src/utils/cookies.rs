//! Cookie header parsing

use http::HeaderMap;
use http::header::COOKIE;
use percent_encoding::percent_decode_str;

/// Name of the cookie the toolbar front-end writes with the open panel ids
pub const ACTIVE_PANELS_COOKIE: &str = "fldt_active";

/// Parse all `Cookie` headers into name/value pairs.
///
/// Values are percent-decoded. A segment without `=` is treated as a
/// continuation of the previous cookie's value, so a raw
/// `fldt_active=headers;template` keeps both panel ids.
pub fn parse_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
	let mut cookies: Vec<(String, String)> = Vec::new();

	for header in headers.get_all(COOKIE) {
		let Ok(header) = header.to_str() else {
			continue;
		};
		for segment in header.split(';') {
			let segment = segment.trim();
			if segment.is_empty() {
				continue;
			}
			match segment.split_once('=') {
				Some((name, value)) => {
					let name = name.trim();
					if name.is_empty() {
						continue;
					}
					cookies.push((name.to_string(), value.trim().to_string()));
				}
				None => {
					if let Some((_, value)) = cookies.last_mut() {
						value.push(';');
						value.push_str(segment);
					}
				}
			}
		}
	}

	cookies
		.into_iter()
		.map(|(name, value)| {
			let decoded = percent_decode_str(&value).decode_utf8_lossy().into_owned();
			(name, decoded)
		})
		.collect()
}

/// Split the `fldt_active` cookie value into panel DOM ids
pub fn active_panel_ids(value: Option<&str>) -> Vec<String> {
	value
		.unwrap_or_default()
		.split(';')
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(str::to_string)
		.collect()
}
