//! Versions panel

use crate::context::ToolbarContext;
use crate::error::ToolbarResult;
use crate::panels::{Panel, render_key_value_table};

/// Version of the toolbar itself
pub const TOOLBAR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shows toolbar, platform and application component versions
#[derive(Debug)]
pub struct VersionsPanel {
	components: Vec<(String, String)>,
}

impl VersionsPanel {
	/// Create the panel with the toolbar and platform entries
	pub fn new() -> Self {
		let profile = if cfg!(debug_assertions) {
			"debug"
		} else {
			"release"
		};
		Self {
			components: vec![
				(env!("CARGO_PKG_NAME").to_string(), TOOLBAR_VERSION.to_string()),
				("target".to_string(), format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)),
				("profile".to_string(), profile.to_string()),
			],
		}
	}

	/// Add an application component to the listing
	pub fn with_component(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
		self.components.push((name.into(), version.into()));
		self
	}
}

impl Default for VersionsPanel {
	fn default() -> Self {
		Self::new()
	}
}

impl Panel for VersionsPanel {
	fn dom_id(&self) -> &'static str {
		"versions"
	}

	fn nav_title(&self) -> String {
		"Versions".to_string()
	}

	fn nav_subtitle(&self, _ctx: &ToolbarContext) -> Option<String> {
		Some(format!("Fieldglass {}", TOOLBAR_VERSION))
	}

	fn content(&self, _ctx: &ToolbarContext) -> ToolbarResult<String> {
		Ok(render_key_value_table(
			None,
			self.components.iter().map(|(k, v)| (k.as_str(), v.as_str())),
		))
	}
}
