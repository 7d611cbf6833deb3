//! Request timer panel

use crate::context::ToolbarContext;
use crate::error::ToolbarResult;
use crate::panels::{Panel, render_key_value_table};

/// Shows when the request arrived and how long it has taken so far
#[derive(Debug, Default)]
pub struct TimerPanel;

impl TimerPanel {
	/// Create the panel
	pub fn new() -> Self {
		Self
	}
}

impl Panel for TimerPanel {
	fn dom_id(&self) -> &'static str {
		"timer"
	}

	fn nav_title(&self) -> String {
		"Time".to_string()
	}

	fn nav_subtitle(&self, ctx: &ToolbarContext) -> Option<String> {
		Some(format!("{:.2}ms", ctx.elapsed().as_secs_f64() * 1000.0))
	}

	fn title(&self) -> String {
		"Request Time".to_string()
	}

	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String> {
		let started = ctx.request_info.timestamp.to_rfc3339();
		let elapsed = format!("{:.3} ms", ctx.elapsed().as_secs_f64() * 1000.0);
		Ok(render_key_value_table(
			None,
			[("Started", started.as_str()), ("Total time", elapsed.as_str())],
		))
	}
}
