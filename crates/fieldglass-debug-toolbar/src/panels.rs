//! Panel system
//!
//! A panel contributes a navigation entry and a detail pane to the toolbar.
//! Panels are created fresh for every request from a [`PanelRegistration`]
//! and observe the request through the optional hooks on [`Panel`]; every
//! hook except [`Panel::dom_id`], [`Panel::nav_title`] and [`Panel::content`]
//! has an inert default.

pub mod headers;
pub mod logging;
pub mod performance;
pub mod registry;
pub mod request_vars;
pub mod sql;
pub mod template;
pub mod timer;
pub mod versions;

pub use registry::{PanelRegistration, PanelRegistry, RouteContext};

use crate::context::{RequestInfo, ResponseInfo, ToolbarContext};
use crate::error::ToolbarResult;
use axum::body::Body;
use http::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;
use tower::util::BoxCloneService;

/// The view callable a request is dispatched to, as seen by panels
pub type View = BoxCloneService<Request<Body>, Response<Body>, Infallible>;

/// A diagnostic panel
pub trait Panel: Send {
	/// Stable identifier used for DOM ids and the `fldt_active` cookie
	fn dom_id(&self) -> &'static str;

	/// Label shown in the toolbar's navigation list
	fn nav_title(&self) -> String;

	/// Short summary shown under the navigation label
	fn nav_subtitle(&self, _ctx: &ToolbarContext) -> Option<String> {
		None
	}

	/// Heading of the detail pane
	fn title(&self) -> String {
		self.nav_title()
	}

	/// Link target for the navigation entry; `None` opens the detail pane
	fn url(&self) -> Option<String> {
		None
	}

	/// Whether the panel has a detail pane worth showing
	fn has_content(&self, _ctx: &ToolbarContext) -> bool {
		true
	}

	/// Observe the incoming request
	fn process_request(&mut self, _request: &RequestInfo) {}

	/// Wrap or replace the view before it runs
	fn process_view(&mut self, _ctx: &Arc<ToolbarContext>, view: View) -> View {
		view
	}

	/// Observe the response produced by the view
	fn process_response(&mut self, _response: &ResponseInfo) {}

	/// Render the detail pane
	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String>;
}

/// Render a two-column key/value table
pub(crate) fn render_key_value_table<'a, I>(heading: Option<&str>, rows: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	use crate::utils::html::html_escape;

	let body: String = rows
		.into_iter()
		.map(|(key, value)| {
			format!(
				"<tr><td>{}</td><td>{}</td></tr>",
				html_escape(key),
				html_escape(value)
			)
		})
		.collect();

	let heading = heading
		.map(|h| format!("<h4>{}</h4>", html_escape(h)))
		.unwrap_or_default();

	if body.is_empty() {
		return format!("{}<p>None</p>", heading);
	}

	format!(
		r#"{}<table class="flDebugTable"><thead><tr><th>Key</th><th>Value</th></tr></thead><tbody>{}</tbody></table>"#,
		heading, body
	)
}
