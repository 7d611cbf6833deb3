//! Display formatting for captured statements

use regex::{Captures, Regex};
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Render a statement with its bound parameters substituted for display.
///
/// Positional parameters (JSON array) fill `?`, `%s` and `$N` placeholders;
/// named parameters (JSON object) fill `:name` and `%(name)s`. Placeholders
/// without a matching value are left as written. The output is for reading
/// only and is never executed.
pub fn format_sql(statement: &str, params: &Value) -> String {
	static POSITIONAL_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'|\$(\d+)|\?|%s").unwrap());
	static NAMED_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r"'(?:[^']|'')*'|%\((\w+)\)s|(?:^|[^:]):(\w+)").unwrap());

	match params {
		Value::Array(values) if !values.is_empty() => {
			let mut next = 0;
			POSITIONAL_RE
				.replace_all(statement, |caps: &Captures<'_>| {
					let whole = &caps[0];
					if whole.starts_with('\'') {
						return whole.to_string();
					}
					let value = match caps.get(1) {
						Some(index) => index
							.as_str()
							.parse::<usize>()
							.ok()
							.and_then(|i| i.checked_sub(1))
							.and_then(|i| values.get(i)),
						None => {
							next += 1;
							values.get(next - 1)
						}
					};
					value.map(sql_literal).unwrap_or_else(|| whole.to_string())
				})
				.into_owned()
		}
		Value::Object(map) if !map.is_empty() => NAMED_RE
			.replace_all(statement, |caps: &Captures<'_>| {
				let whole = &caps[0];
				if whole.starts_with('\'') {
					return whole.to_string();
				}
				let (name, prefix) = match (caps.get(1), caps.get(2)) {
					(Some(name), _) => (name.as_str(), ""),
					(None, Some(name)) => {
						let prefix = &whole[..whole.len() - name.as_str().len() - 1];
						(name.as_str(), prefix)
					}
					(None, None) => return whole.to_string(),
				};
				match map.get(name) {
					Some(value) => format!("{}{}", prefix, sql_literal(value)),
					None => whole.to_string(),
				}
			})
			.into_owned(),
		_ => statement.to_string(),
	}
}

/// Encode parameters as the JSON string carried by the callback URLs.
///
/// `Null` (parameters that could not be captured as JSON) encodes as an
/// empty string.
pub fn encode_params(params: &Value) -> String {
	match params {
		Value::Null => String::new(),
		other => serde_json::to_string(other).unwrap_or_default(),
	}
}

/// Shorten a code location for the compact context column.
///
/// Absolute paths under the working directory become `./relative`; other
/// absolute paths are kept. Relative paths gain a `./` prefix unless they
/// already have one or name a synthetic location (`<...>`, `{...}`).
pub fn format_fname(value: &str) -> String {
	if value.is_empty() || value.starts_with('<') || value.starts_with('{') {
		return value.to_string();
	}

	let path = Path::new(value);
	if path.is_absolute() {
		let relative = std::env::current_dir()
			.ok()
			.and_then(|cwd| path.strip_prefix(&cwd).ok().map(|p| p.to_path_buf()));
		return match relative {
			Some(relative) => format!("./{}", relative.display()),
			None => value.to_string(),
		};
	}

	if value.starts_with("./") {
		value.to_string()
	} else {
		format!("./{}", value)
	}
}

fn sql_literal(value: &Value) -> String {
	match value {
		Value::Null => "NULL".to_string(),
		Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
		Value::Number(n) => n.to_string(),
		Value::String(s) => format!("'{}'", s.replace('\'', "''")),
		other => format!("'{}'", other.to_string().replace('\'', "''")),
	}
}
