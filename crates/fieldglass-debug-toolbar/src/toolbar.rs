//! Per-request toolbar
//!
//! A [`Toolbar`] lives inside the middleware future of a single request. It
//! owns one instance of every registered panel and drives them through the
//! request, view and response hooks before rendering.

use crate::context::{ResponseInfo, ToolbarContext};
use crate::panels::{Panel, PanelRegistry, View};
use crate::ui::render_toolbar;
use crate::utils::cookies::{ACTIVE_PANELS_COOKIE, active_panel_ids};
use crate::views::STATIC_PATH;
use std::sync::Arc;

/// A panel together with its activation state for this request
pub struct PanelInstance {
	/// The panel
	pub panel: Box<dyn Panel>,
	/// Whether the developer has the panel switched on (`fldt_active` cookie)
	pub is_active: bool,
}

/// Values shared by every rendered fragment
#[derive(Debug, Clone)]
pub struct TemplateContext {
	/// URL prefix of the toolbar's static assets
	pub static_path: String,
}

/// The toolbar for one in-flight request
pub struct Toolbar {
	panels: Vec<PanelInstance>,
	template_context: TemplateContext,
	ctx: Arc<ToolbarContext>,
}

impl Toolbar {
	/// Instantiate every registered panel for the request in `ctx`
	pub fn new(registry: &PanelRegistry, ctx: Arc<ToolbarContext>) -> Self {
		let activated = active_panel_ids(ctx.request_info.cookie(ACTIVE_PANELS_COOKIE));

		let panels = registry
			.create_panels()
			.into_iter()
			.map(|panel| {
				let is_active = activated.iter().any(|id| id == panel.dom_id());
				PanelInstance { panel, is_active }
			})
			.collect();

		Self {
			panels,
			template_context: TemplateContext {
				static_path: STATIC_PATH.to_string(),
			},
			ctx,
		}
	}

	/// Panels in display order
	pub fn panels(&self) -> &[PanelInstance] {
		&self.panels
	}

	/// DOM ids of the active panels
	pub fn active_panel_ids(&self) -> Vec<&'static str> {
		self.panels
			.iter()
			.filter(|p| p.is_active)
			.map(|p| p.panel.dom_id())
			.collect()
	}

	/// Shared template values
	pub fn template_context(&self) -> &TemplateContext {
		&self.template_context
	}

	/// Data collected for this request
	pub fn context(&self) -> &Arc<ToolbarContext> {
		&self.ctx
	}

	/// Let every panel observe the request
	pub fn process_request(&mut self) {
		for instance in &mut self.panels {
			instance.panel.process_request(&self.ctx.request_info);
		}
	}

	/// Pass the view through every panel; each may return a replacement
	pub fn process_view(&mut self, view: View) -> View {
		let ctx = self.ctx.clone();
		self.panels
			.iter_mut()
			.fold(view, |view, instance| instance.panel.process_view(&ctx, view))
	}

	/// Let every panel observe the response
	pub fn process_response(&mut self, response: &ResponseInfo) {
		for instance in &mut self.panels {
			instance.panel.process_response(response);
		}
	}

	/// Render the toolbar markup
	pub fn render(&self) -> String {
		render_toolbar(self)
	}
}
