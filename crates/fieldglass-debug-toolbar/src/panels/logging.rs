//! Logging panel

use crate::context::ToolbarContext;
use crate::error::ToolbarResult;
use crate::panels::Panel;
use crate::utils::html::html_escape;

/// Shows log events captured by [`crate::collectors::ToolbarLogLayer`]
#[derive(Debug, Default)]
pub struct LoggingPanel;

impl LoggingPanel {
	/// Create the panel
	pub fn new() -> Self {
		Self
	}
}

impl Panel for LoggingPanel {
	fn dom_id(&self) -> &'static str {
		"logger"
	}

	fn nav_title(&self) -> String {
		"Logging".to_string()
	}

	fn nav_subtitle(&self, ctx: &ToolbarContext) -> Option<String> {
		let count = ctx.log_records.lock().len();
		Some(format!("{} {}", count, if count == 1 { "message" } else { "messages" }))
	}

	fn title(&self) -> String {
		"Log Messages".to_string()
	}

	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String> {
		let records = ctx.log_records.lock();
		if records.is_empty() {
			return Ok("<p>No messages logged</p>".to_string());
		}

		let rows: String = records
			.iter()
			.map(|record| {
				let location = match (&record.file, record.line) {
					(Some(file), Some(line)) => format!("{}:{}", file, line),
					(Some(file), None) => file.clone(),
					_ => String::new(),
				};
				format!(
					"<tr class=\"flDebugLog{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
					html_escape(&record.level),
					html_escape(&record.level),
					record.timestamp.format("%H:%M:%S%.3f"),
					html_escape(&record.target),
					html_escape(&record.message),
					html_escape(&location)
				)
			})
			.collect();

		Ok(format!(
			r#"<table class="flDebugTable"><thead><tr><th>Level</th><th>Time</th><th>Channel</th><th>Message</th><th>Location</th></tr></thead><tbody>{}</tbody></table>"#,
			rows
		))
	}
}
