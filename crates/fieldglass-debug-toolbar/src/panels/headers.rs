//! Request headers panel

use crate::context::{RequestInfo, ToolbarContext};
use crate::error::ToolbarResult;
use crate::panels::{Panel, render_key_value_table};

/// Lists the headers the request arrived with
#[derive(Debug, Default)]
pub struct HeadersPanel {
	headers: Vec<(String, String)>,
}

impl HeadersPanel {
	/// Create the panel
	pub fn new() -> Self {
		Self::default()
	}
}

impl Panel for HeadersPanel {
	fn dom_id(&self) -> &'static str {
		"headers"
	}

	fn nav_title(&self) -> String {
		"HTTP Headers".to_string()
	}

	fn nav_subtitle(&self, _ctx: &ToolbarContext) -> Option<String> {
		Some(format!("{} headers", self.headers.len()))
	}

	fn title(&self) -> String {
		"HTTP Headers".to_string()
	}

	fn process_request(&mut self, request: &RequestInfo) {
		self.headers = request.headers.clone();
	}

	fn content(&self, _ctx: &ToolbarContext) -> ToolbarResult<String> {
		Ok(render_key_value_table(
			None,
			self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
		))
	}
}
