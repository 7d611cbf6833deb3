//! Template rendering panel

use crate::context::ToolbarContext;
use crate::error::ToolbarResult;
use crate::panels::Panel;
use crate::utils::html::html_escape;

/// Lists templates reported through [`crate::collectors::record_template`]
#[derive(Debug, Default)]
pub struct TemplatePanel;

impl TemplatePanel {
	/// Create the panel
	pub fn new() -> Self {
		Self
	}
}

impl Panel for TemplatePanel {
	fn dom_id(&self) -> &'static str {
		"template"
	}

	fn nav_title(&self) -> String {
		"Templates".to_string()
	}

	fn nav_subtitle(&self, ctx: &ToolbarContext) -> Option<String> {
		let count = ctx.templates.lock().len();
		Some(format!("{} rendered", count))
	}

	fn has_content(&self, ctx: &ToolbarContext) -> bool {
		!ctx.templates.lock().is_empty()
	}

	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String> {
		let templates = ctx.templates.lock();
		if templates.is_empty() {
			return Ok("<p>No templates rendered</p>".to_string());
		}

		let mut html = String::new();
		for template in templates.iter() {
			let context = serde_json::to_string_pretty(&template.context_data)
				.unwrap_or_default();
			let parent = template
				.parent
				.as_deref()
				.map(|p| format!(" <small>extends {}</small>", html_escape(p)))
				.unwrap_or_default();
			html.push_str(&format!(
				r#"<dt><strong>{}</strong>{} <span class="flDebugTiming">{:.2}ms</span></dt><dd><pre>{}</pre></dd>"#,
				html_escape(&template.name),
				parent,
				template.render_duration.as_secs_f64() * 1000.0,
				html_escape(&context)
			));
		}

		Ok(format!("<dl>{}</dl>", html))
	}
}
