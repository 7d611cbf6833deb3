//! Toolbar rendering from collected request data

use crate::common::builders::{SqlQueryBuilder, TemplateInfoBuilder};
use crate::common::fixtures::{debug_config, default_registry, test_context};
use crate::common::mock_panel::MockPanel;
use fieldglass_debug_toolbar::context::ResponseInfo;
use fieldglass_debug_toolbar::{PanelRegistry, Toolbar, ToolbarConfig, ToolbarContext};
use http::{HeaderMap, StatusCode};
use rstest::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[rstest]
fn test_render_lists_every_panel(default_registry: PanelRegistry, test_context: ToolbarContext) {
	let toolbar = Toolbar::new(&default_registry, Arc::new(test_context));
	let html = toolbar.render();

	let mut last = 0;
	for id in default_registry.dom_ids() {
		let at = html.find(&format!(r#"<li id="{}""#, id)).unwrap();
		assert!(at > last, "panel {} out of order", id);
		last = at;
	}
	assert!(html.starts_with(r#"<div id="flDebug" style="display:none;">"#));
	assert!(html.ends_with("</div>"));
}

#[rstest]
fn test_render_shows_collected_data(
	default_registry: PanelRegistry,
	test_context: ToolbarContext,
) {
	test_context.sql_queries.lock().push(
		SqlQueryBuilder::new()
			.sql("SELECT * FROM orders WHERE total > ?")
			.params(json!([100]))
			.duration(Duration::from_millis(250))
			.build(),
	);
	test_context
		.templates
		.lock()
		.push(TemplateInfoBuilder::new().name("<orders>.html").build());

	let mut toolbar = Toolbar::new(&default_registry, Arc::new(test_context));
	toolbar.process_request();
	let html = toolbar.render();

	assert!(html.contains("1 query"));
	assert!(html.contains("SLOW"));
	assert!(html.contains("&lt;orders&gt;.html"));
	// Query args are captured by the request hook
	assert!(html.contains("<tr><td>foo</td><td>bar</td></tr>"));
}

#[rstest]
fn test_hooks_reach_custom_panel(debug_config: ToolbarConfig, test_context: ToolbarContext) {
	let panel = MockPanel::new("mock", "Mock");
	let calls = panel.calls();
	let config = debug_config.with_panels(vec!["mock".to_string()]);
	let registry = PanelRegistry::from_config(&config, vec![panel.registration()]).unwrap();

	let mut toolbar = Toolbar::new(&registry, Arc::new(test_context));
	toolbar.process_request();
	toolbar.process_response(&ResponseInfo::new(StatusCode::CREATED, &HeaderMap::new()));
	let html = toolbar.render();

	assert_eq!(calls.request(), 1);
	assert_eq!(calls.response(), 1);
	assert!(html.contains("status 201"));
	assert!(html.contains(r#"id="mock-content""#));
}
