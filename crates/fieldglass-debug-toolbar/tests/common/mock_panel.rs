//! Mock Panel implementation for testing
//!
//! A configurable implementation of the Panel trait that counts hook calls,
//! for testing the registry, the middleware and UI rendering.

use fieldglass_debug_toolbar::{
	context::{RequestInfo, ResponseInfo, ToolbarContext},
	error::{ToolbarError, ToolbarResult},
	panels::{Panel, PanelRegistration, View},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Call counters shared between a [`MockPanel`] and the test that created it
#[derive(Debug, Default)]
pub struct MockPanelCalls {
	request: AtomicUsize,
	view: AtomicUsize,
	response: AtomicUsize,
	content: AtomicUsize,
}

impl MockPanelCalls {
	/// Times `process_request` ran
	pub fn request(&self) -> usize {
		self.request.load(Ordering::SeqCst)
	}

	/// Times `process_view` ran
	pub fn view(&self) -> usize {
		self.view.load(Ordering::SeqCst)
	}

	/// Times `process_response` ran
	pub fn response(&self) -> usize {
		self.response.load(Ordering::SeqCst)
	}

	/// Times `content` ran
	pub fn content(&self) -> usize {
		self.content.load(Ordering::SeqCst)
	}
}

/// Mock Panel implementation for testing
#[derive(Debug, Clone)]
pub struct MockPanel {
	dom_id: &'static str,
	title: &'static str,
	calls: Arc<MockPanelCalls>,
	should_fail_content: bool,
	custom_html: Option<String>,
	last_status: Option<u16>,
}

impl MockPanel {
	/// Create a new MockPanel with the given DOM id and title
	pub fn new(dom_id: &'static str, title: &'static str) -> Self {
		Self {
			dom_id,
			title,
			calls: Arc::new(MockPanelCalls::default()),
			should_fail_content: false,
			custom_html: None,
			last_status: None,
		}
	}

	/// Configure panel to fail when rendering content
	pub fn with_content_failure(mut self) -> Self {
		self.should_fail_content = true;
		self
	}

	/// Set custom HTML to return from content
	pub fn with_custom_html(mut self, html: impl Into<String>) -> Self {
		self.custom_html = Some(html.into());
		self
	}

	/// Shared call counters
	pub fn calls(&self) -> Arc<MockPanelCalls> {
		self.calls.clone()
	}

	/// Registration creating clones of this panel that share its counters
	pub fn registration(&self) -> PanelRegistration {
		let template = self.clone();
		PanelRegistration::new(move || template.clone())
	}
}

impl Default for MockPanel {
	fn default() -> Self {
		Self::new("mock", "Mock Panel")
	}
}

impl Panel for MockPanel {
	fn dom_id(&self) -> &'static str {
		self.dom_id
	}

	fn nav_title(&self) -> String {
		self.title.to_string()
	}

	fn nav_subtitle(&self, _ctx: &ToolbarContext) -> Option<String> {
		self.last_status.map(|status| format!("status {}", status))
	}

	fn process_request(&mut self, _request: &RequestInfo) {
		self.calls.request.fetch_add(1, Ordering::SeqCst);
	}

	fn process_view(&mut self, _ctx: &Arc<ToolbarContext>, view: View) -> View {
		self.calls.view.fetch_add(1, Ordering::SeqCst);
		view
	}

	fn process_response(&mut self, response: &ResponseInfo) {
		self.calls.response.fetch_add(1, Ordering::SeqCst);
		self.last_status = Some(response.status.as_u16());
	}

	fn content(&self, _ctx: &ToolbarContext) -> ToolbarResult<String> {
		self.calls.content.fetch_add(1, Ordering::SeqCst);

		if self.should_fail_content {
			return Err(ToolbarError::Render(format!(
				"MockPanel '{}' failed to render",
				self.dom_id
			)));
		}

		Ok(self.custom_html.clone().unwrap_or_else(|| {
			format!(
				r#"<div class="mock-panel" id="mock-panel-{}"><p>Mock panel content</p></div>"#,
				self.dom_id
			)
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::common::fixtures::test_context;
	use rstest::rstest;

	#[rstest]
	fn test_mock_panel_basic() {
		let panel = MockPanel::new("test", "Test Panel");
		assert_eq!(panel.dom_id(), "test");
		assert_eq!(panel.nav_title(), "Test Panel");
		assert_eq!(panel.title(), "Test Panel");
		assert!(panel.url().is_none());
	}

	#[rstest]
	fn test_mock_panel_failure(test_context: ToolbarContext) {
		let panel = MockPanel::default().with_content_failure();
		assert!(panel.content(&test_context).is_err());
		assert_eq!(panel.calls().content(), 1);
	}

	#[rstest]
	fn test_mock_panel_custom_output(test_context: ToolbarContext) {
		let panel = MockPanel::default().with_custom_html("<b>custom</b>");
		assert_eq!(panel.content(&test_context).unwrap(), "<b>custom</b>");
	}

	#[rstest]
	fn test_registration_shares_counters(test_context: ToolbarContext) {
		let panel = MockPanel::new("shared", "Shared");
		let registration = panel.registration();

		let mut created = registration.create();
		created.process_request(&test_context.request_info);
		assert_eq!(registration.dom_id(), "shared");
		assert_eq!(panel.calls().request(), 1);
	}
}
