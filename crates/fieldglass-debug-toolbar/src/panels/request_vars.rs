//! Request variables panel

use crate::context::{RequestInfo, ToolbarContext};
use crate::error::ToolbarResult;
use crate::panels::{Panel, render_key_value_table};

/// Shows the request line, query arguments and cookies
#[derive(Debug, Default)]
pub struct RequestVarsPanel {
	method: String,
	path: String,
	query_args: Vec<(String, String)>,
	cookies: Vec<(String, String)>,
}

impl RequestVarsPanel {
	/// Create the panel
	pub fn new() -> Self {
		Self::default()
	}
}

impl Panel for RequestVarsPanel {
	fn dom_id(&self) -> &'static str {
		"request_vars"
	}

	fn nav_title(&self) -> String {
		"Request Vars".to_string()
	}

	fn title(&self) -> String {
		"Request Vars".to_string()
	}

	fn process_request(&mut self, request: &RequestInfo) {
		self.method = request.method.clone();
		self.path = request.path.clone();
		self.query_args = request.query_args();
		self.cookies = request.cookies.clone();
	}

	fn content(&self, _ctx: &ToolbarContext) -> ToolbarResult<String> {
		let request_line = render_key_value_table(
			Some("Request"),
			[("Method", self.method.as_str()), ("Path", self.path.as_str())],
		);
		let args = render_key_value_table(
			Some("GET Variables"),
			self.query_args.iter().map(|(k, v)| (k.as_str(), v.as_str())),
		);
		let cookies = render_key_value_table(
			Some("Cookies"),
			self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str())),
		);
		Ok(format!("{}{}{}", request_line, args, cookies))
	}
}
