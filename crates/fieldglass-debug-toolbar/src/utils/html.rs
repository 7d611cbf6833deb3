//! HTML escaping helpers

/// Escape text for use in HTML element content and quoted attributes
pub fn html_escape(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for ch in s.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			_ => out.push(ch),
		}
	}
	out
}

/// Percent-encode a value for use in a URL query string
pub fn url_encode(s: &str) -> String {
	serde_urlencoded::to_string([("v", s)])
		.map(|encoded| encoded[2..].to_string())
		.unwrap_or_default()
}
