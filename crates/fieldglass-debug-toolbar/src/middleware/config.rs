//! Toolbar configuration

use crate::error::{ToolbarError, ToolbarResult};
use crate::panels::registry::DEFAULT_PANELS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Debug toolbar configuration
///
/// Field aliases accept the upper-case setting names (`DEBUG`, `SECRET_KEY`,
/// `DEBUG_TB_*`) so the struct can be deserialized straight from a settings
/// file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
	/// Whether the application runs in debug mode; the toolbar is inert otherwise
	#[serde(alias = "DEBUG")]
	pub debug: bool,

	/// Secret used to sign SQL statements for the callback endpoints
	#[serde(alias = "SECRET_KEY")]
	pub secret_key: Option<String>,

	/// Replace redirects with an interstitial page
	#[serde(alias = "DEBUG_TB_INTERCEPT_REDIRECTS")]
	pub intercept_redirects: bool,

	/// Panel ids in display order
	#[serde(alias = "DEBUG_TB_PANELS")]
	pub panels: Vec<String>,

	/// Directory the static assets are served from
	#[serde(alias = "DEBUG_TB_STATIC_DIR")]
	pub static_dir: PathBuf,

	/// SQL warning threshold in milliseconds
	#[serde(alias = "DEBUG_TB_SQL_WARNING_THRESHOLD_MS")]
	pub sql_warning_threshold_ms: u64,
}

impl Default for ToolbarConfig {
	fn default() -> Self {
		Self {
			debug: false,
			secret_key: None,
			intercept_redirects: true,
			panels: DEFAULT_PANELS.iter().map(|p| p.to_string()).collect(),
			static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
			sql_warning_threshold_ms: 100,
		}
	}
}

impl ToolbarConfig {
	/// Create configuration with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Read configuration from the process environment, starting from the
	/// defaults. Unset variables keep their default.
	///
	/// # Errors
	///
	/// [`ToolbarError::Config`] for a value that does not parse.
	pub fn from_env() -> ToolbarResult<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Read configuration through an arbitrary key lookup
	pub fn from_lookup<F>(lookup: F) -> ToolbarResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(value) = lookup("DEBUG") {
			config.debug = parse_bool("DEBUG", &value)?;
		}
		if let Some(value) = lookup("SECRET_KEY") {
			config.secret_key = Some(value);
		}
		if let Some(value) = lookup("DEBUG_TB_INTERCEPT_REDIRECTS") {
			config.intercept_redirects = parse_bool("DEBUG_TB_INTERCEPT_REDIRECTS", &value)?;
		}
		if let Some(value) = lookup("DEBUG_TB_PANELS") {
			config.panels = value
				.split(',')
				.map(str::trim)
				.filter(|p| !p.is_empty())
				.map(str::to_string)
				.collect();
		}
		if let Some(value) = lookup("DEBUG_TB_STATIC_DIR") {
			config.static_dir = PathBuf::from(value);
		}
		if let Some(value) = lookup("DEBUG_TB_SQL_WARNING_THRESHOLD_MS") {
			config.sql_warning_threshold_ms = value.trim().parse().map_err(|_| {
				ToolbarError::Config(format!(
					"DEBUG_TB_SQL_WARNING_THRESHOLD_MS must be an integer, got '{}'",
					value
				))
			})?;
		}

		Ok(config)
	}

	/// Set debug mode
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	/// Set the signing secret
	pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
		self.secret_key = Some(secret_key.into());
		self
	}

	/// Enable or disable redirect interception
	pub fn with_intercept_redirects(mut self, intercept: bool) -> Self {
		self.intercept_redirects = intercept;
		self
	}

	/// Set the panel list (display order)
	pub fn with_panels(mut self, panels: Vec<String>) -> Self {
		self.panels = panels;
		self
	}

	/// Set the static asset directory
	pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.static_dir = dir.into();
		self
	}

	/// Set the SQL warning threshold
	pub fn with_sql_warning_threshold_ms(mut self, threshold_ms: u64) -> Self {
		self.sql_warning_threshold_ms = threshold_ms;
		self
	}

	/// Signing secret, if one is set and non-empty
	pub fn secret(&self) -> Option<&str> {
		self.secret_key.as_deref().filter(|s| !s.is_empty())
	}
}

fn parse_bool(key: &str, value: &str) -> ToolbarResult<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" | "" => Ok(false),
		_ => Err(ToolbarError::Config(format!(
			"{} must be a boolean, got '{}'",
			key, value
		))),
	}
}
