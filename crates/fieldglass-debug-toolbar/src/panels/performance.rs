//! Performance panel
//!
//! Wraps the view so the time spent inside it can be reported separately
//! from the time spent in middleware and toolbar rendering.

use crate::context::ToolbarContext;
use crate::error::ToolbarResult;
use crate::panels::{Panel, View, render_key_value_table};
use axum::body::Body;
use http::Request;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;
use tower::util::BoxCloneService;

/// Times the view and breaks the request down by SQL and template time
#[derive(Debug, Default)]
pub struct PerformancePanel;

impl PerformancePanel {
	/// Create the panel
	pub fn new() -> Self {
		Self
	}
}

/// Wrap `view` so that its execution time lands in `ctx.view_duration`
pub fn timed_view(ctx: Arc<ToolbarContext>, view: View) -> View {
	BoxCloneService::new(tower::service_fn(move |request: Request<Body>| {
		let view = view.clone();
		let ctx = ctx.clone();
		async move {
			let started = Instant::now();
			let response = view.oneshot(request).await;
			*ctx.view_duration.lock() = Some(started.elapsed());
			response
		}
	}))
}

fn millis(duration: Duration) -> String {
	format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
}

impl Panel for PerformancePanel {
	fn dom_id(&self) -> &'static str {
		"performance"
	}

	fn nav_title(&self) -> String {
		"Performance".to_string()
	}

	fn nav_subtitle(&self, ctx: &ToolbarContext) -> Option<String> {
		ctx.view_duration
			.lock()
			.map(|d| format!("View: {}", millis(d)))
	}

	fn title(&self) -> String {
		"View Performance".to_string()
	}

	fn process_view(&mut self, ctx: &Arc<ToolbarContext>, view: View) -> View {
		timed_view(ctx.clone(), view)
	}

	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String> {
		let view = *ctx.view_duration.lock();
		let (sql_count, sql_time) = {
			let queries = ctx.sql_queries.lock();
			(queries.len(), queries.iter().map(|q| q.duration).sum::<Duration>())
		};
		let (template_count, template_time) = {
			let templates = ctx.templates.lock();
			(
				templates.len(),
				templates.iter().map(|t| t.render_duration).sum::<Duration>(),
			)
		};

		let view_time = view.map(millis).unwrap_or_else(|| "n/a".to_string());
		let elapsed = millis(ctx.elapsed());
		let sql = format!("{} in {} queries", millis(sql_time), sql_count);
		let templates = format!("{} in {} templates", millis(template_time), template_count);
		let other = view
			.map(|v| millis(v.saturating_sub(sql_time + template_time)))
			.unwrap_or_else(|| "n/a".to_string());

		Ok(render_key_value_table(
			None,
			[
				("View time", view_time.as_str()),
				("SQL time", sql.as_str()),
				("Template time", templates.as_str()),
				("Other view time", other.as_str()),
				("Elapsed so far", elapsed.as_str()),
			],
		))
	}
}
