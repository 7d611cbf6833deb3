//! Panel activation, hooks and collectors seen through rendered pages

use crate::common::builders::{SqlQueryBuilder, TemplateInfoBuilder};
use crate::common::fixtures::debug_config;
use crate::common::helpers::{HTML_PAGE, get_request, get_with_cookie, sample_app};
use crate::common::mock_panel::MockPanel;
use axum::Router;
use axum::response::Html;
use axum::routing::get;
use fieldglass_debug_toolbar::{
	DebugToolbarExtension, ToolbarConfig, ToolbarLogLayer, record_sql_query, record_template,
};
use rstest::*;
use serde_json::json;
use std::time::Duration;
use tracing_subscriber::prelude::*;

fn active_ids(body: &str) -> Vec<String> {
	body.match_indices(r#"class="flDebugPanel flDebugActive""#)
		.map(|(at, _)| {
			let li = body[..at].rfind(r#"<li id=""#).unwrap() + r#"<li id=""#.len();
			let end = body[li..].find('"').unwrap();
			body[li..li + end].to_string()
		})
		.collect()
}

#[rstest]
#[case("fldt_active=headers;template", vec!["headers", "template"])]
#[case("fldt_active=headers%3Btemplate", vec!["headers", "template"])]
#[case("theme=dark; fldt_active=logger", vec!["logger"])]
#[case("theme=dark", vec![])]
#[tokio::test]
async fn test_active_panels_from_cookie(
	debug_config: ToolbarConfig,
	#[case] cookie: &str,
	#[case] expected: Vec<&str>,
) {
	let router = DebugToolbarExtension::new(debug_config).unwrap().install(sample_app());
	let response = get_with_cookie(router, "/", cookie).await;
	assert_eq!(active_ids(&response.text()), expected);
}

#[rstest]
#[tokio::test]
async fn test_collectors_reach_panels(debug_config: ToolbarConfig) {
	let app = Router::new().route(
		"/users",
		get(|| async {
			for id in 1..=4 {
				record_sql_query(
					SqlQueryBuilder::new()
						.sql("SELECT * FROM posts WHERE user_id = ?")
						.params(json!([id]))
						.duration(Duration::from_millis(2))
						.context("src/handlers/users.rs:12")
						.build(),
				);
			}
			record_template(
				TemplateInfoBuilder::new()
					.name("users/list.html")
					.parent("base.html")
					.context_data(json!({"count": 4}))
					.build(),
			);
			Html(HTML_PAGE)
		}),
	);

	let router = DebugToolbarExtension::new(debug_config).unwrap().install(app);
	let body = get_request(router, "/users").await.text();

	assert!(body.contains("4 queries"));
	assert!(body.contains("N+1"));
	assert!(body.contains("DUPLICATE"));
	assert!(body.contains("users/list.html"));
	assert!(body.contains("1 rendered"));
	assert!(body.contains(r#"id="sqlalchemy-content""#));
}

#[rstest]
#[tokio::test]
async fn test_collectors_outside_request_are_noops() {
	assert!(!record_sql_query(SqlQueryBuilder::new().sql("SELECT 1").build()));
	assert!(!record_template(TemplateInfoBuilder::new().name("x.html").build()));
}

#[rstest]
#[tokio::test]
async fn test_log_events_captured(debug_config: ToolbarConfig) {
	let subscriber = tracing_subscriber::registry().with(ToolbarLogLayer::new());
	let _guard = tracing::subscriber::set_default(subscriber);

	let app = Router::new().route(
		"/",
		get(|| async {
			tracing::warn!(user = 7, "slow <lookup>");
			Html(HTML_PAGE)
		}),
	);
	let router = DebugToolbarExtension::new(debug_config).unwrap().install(app);
	let body = get_request(router, "/").await.text();

	assert!(body.contains("1 message"));
	assert!(body.contains("slow &lt;lookup&gt; user=7"));
}

#[rstest]
#[tokio::test]
async fn test_custom_panel_lifecycle(debug_config: ToolbarConfig) {
	let panel = MockPanel::new("mock", "Mock Panel").with_custom_html("<b>from mock</b>");
	let calls = panel.calls();

	let config = debug_config.with_panels(vec!["mock".to_string(), "headers".to_string()]);
	let router = DebugToolbarExtension::builder(config)
		.with_panel(panel.registration())
		.build()
		.unwrap()
		.install(sample_app());

	let body = get_request(router, "/").await.text();

	assert_eq!(calls.request(), 1);
	assert_eq!(calls.view(), 1);
	assert_eq!(calls.response(), 1);
	assert_eq!(calls.content(), 1);
	assert!(body.contains("<b>from mock</b>"));
	assert!(body.contains("status 200"));
	assert!(body.find(r#"<li id="mock""#).unwrap() < body.find(r#"<li id="headers""#).unwrap());
}

#[rstest]
#[tokio::test]
async fn test_failing_panel_does_not_break_page(debug_config: ToolbarConfig) {
	let panel = MockPanel::new("mock", "Mock Panel").with_content_failure();
	let config = debug_config.with_panels(vec!["mock".to_string(), "versions".to_string()]);
	let router = DebugToolbarExtension::builder(config)
		.with_panel(panel.registration())
		.build()
		.unwrap()
		.install(sample_app());

	let response = get_request(router, "/").await;
	let body = response.text();

	assert_eq!(response.status, 200);
	assert!(body.contains("This panel could not be rendered"));
	assert!(body.contains(r#"id="versions-content""#));
}

#[rstest]
#[tokio::test]
async fn test_performance_and_timer_panels(debug_config: ToolbarConfig) {
	let config = debug_config.with_panels(vec!["performance".to_string(), "timer".to_string()]);
	let router = DebugToolbarExtension::new(config).unwrap().install(sample_app());
	let body = get_request(router, "/").await.text();

	assert!(body.contains("View: "));
	assert!(body.contains(r#"id="timer-content""#));
}
