//! Panel registry
//!
//! The registry is resolved once when the toolbar extension is built: each
//! configured panel identifier maps to a [`PanelRegistration`], and any
//! callback routes a panel declares are collected at that point. Registry
//! order is display order.

use crate::db::QueryExecutor;
use crate::error::{ToolbarError, ToolbarResult};
use crate::middleware::ToolbarConfig;
use crate::panels::Panel;
use crate::panels::{
	headers::HeadersPanel, logging::LoggingPanel, performance::PerformancePanel,
	request_vars::RequestVarsPanel, sql::SqlPanel, template::TemplatePanel, timer::TimerPanel,
	versions::VersionsPanel,
};
use axum::Router;
use std::fmt;
use std::sync::Arc;

/// Panel identifiers shown when no panel list is configured
pub const DEFAULT_PANELS: &[&str] = &[
	"versions",
	"headers",
	"request_vars",
	"template",
	"sqlalchemy",
	"logger",
	"performance",
];

/// Shared state handed to panels that register callback routes
#[derive(Clone)]
pub struct RouteContext {
	/// Secret used to sign statements
	pub secret_key: Arc<str>,
	/// Database access for re-running statements
	pub executor: Option<Arc<dyn QueryExecutor>>,
}

impl fmt::Debug for RouteContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteContext")
			.field("secret_key", &"<redacted>")
			.field("executor", &self.executor.as_ref().map(|e| e.backend()))
			.finish()
	}
}

type PanelConstructor = dyn Fn() -> Box<dyn Panel> + Send + Sync;

/// Builds the callback routes a panel serves under `/_debug_toolbar/views`
pub type RouteBuilder = fn(&RouteContext) -> Router;

/// How to create one kind of panel, plus any routes it serves
pub struct PanelRegistration {
	dom_id: &'static str,
	create: Box<PanelConstructor>,
	routes: Option<RouteBuilder>,
}

impl PanelRegistration {
	/// Register a panel constructor. The DOM id is taken from a probe instance.
	pub fn new<P, F>(create: F) -> Self
	where
		P: Panel + 'static,
		F: Fn() -> P + Send + Sync + 'static,
	{
		let dom_id = create().dom_id();
		Self {
			dom_id,
			create: Box::new(move || Box::new(create())),
			routes: None,
		}
	}

	/// Attach callback routes to this panel
	pub fn with_routes(mut self, routes: RouteBuilder) -> Self {
		self.routes = Some(routes);
		self
	}

	/// DOM id of the panels this registration creates
	pub fn dom_id(&self) -> &'static str {
		self.dom_id
	}

	/// Whether the panel serves callback routes
	pub fn has_routes(&self) -> bool {
		self.routes.is_some()
	}

	/// Create a fresh panel instance
	pub fn create(&self) -> Box<dyn Panel> {
		(self.create)()
	}
}

impl fmt::Debug for PanelRegistration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PanelRegistration")
			.field("dom_id", &self.dom_id)
			.field("has_routes", &self.routes.is_some())
			.finish()
	}
}

/// Ordered set of panel registrations
#[derive(Debug, Default)]
pub struct PanelRegistry {
	panels: Vec<PanelRegistration>,
}

impl PanelRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolve the configured panel list against the built-in panels and any
	/// application-provided registrations.
	///
	/// # Errors
	///
	/// [`ToolbarError::UnknownPanel`] for an identifier nothing provides, and
	/// [`ToolbarError::Config`] for an identifier listed twice.
	pub fn from_config(
		config: &ToolbarConfig,
		mut custom: Vec<PanelRegistration>,
	) -> ToolbarResult<Self> {
		let mut registry = Self::new();

		for id in &config.panels {
			if registry.get(id).is_some() {
				return Err(ToolbarError::Config(format!(
					"panel '{}' is listed more than once",
					id
				)));
			}

			let registration = match custom.iter().position(|r| r.dom_id() == id) {
				Some(index) => custom.swap_remove(index),
				None => builtin_panel(id, config)?
					.ok_or_else(|| ToolbarError::UnknownPanel(id.clone()))?,
			};
			tracing::debug!(panel = id.as_str(), "registered debug toolbar panel");
			registry.register(registration);
		}

		for unused in custom {
			tracing::debug!(
				panel = unused.dom_id(),
				"custom panel not listed in the panel configuration; skipping"
			);
		}

		Ok(registry)
	}

	/// Append a registration
	pub fn register(&mut self, registration: PanelRegistration) {
		self.panels.push(registration);
	}

	/// Look up a registration by DOM id
	pub fn get(&self, dom_id: &str) -> Option<&PanelRegistration> {
		self.panels.iter().find(|r| r.dom_id() == dom_id)
	}

	/// Registrations in display order
	pub fn iter(&self) -> impl Iterator<Item = &PanelRegistration> {
		self.panels.iter()
	}

	/// DOM ids in display order
	pub fn dom_ids(&self) -> Vec<&'static str> {
		self.panels.iter().map(|r| r.dom_id()).collect()
	}

	/// Number of registered panels
	pub fn len(&self) -> usize {
		self.panels.len()
	}

	/// Whether no panel is registered
	pub fn is_empty(&self) -> bool {
		self.panels.is_empty()
	}

	/// Instantiate every panel for a new request
	pub fn create_panels(&self) -> Vec<Box<dyn Panel>> {
		self.panels.iter().map(|r| r.create()).collect()
	}

	/// Merge the callback routes of every panel that declares some
	pub fn routes(&self, ctx: &RouteContext) -> Router {
		self.panels
			.iter()
			.filter_map(|r| r.routes)
			.fold(Router::new(), |router, build| router.merge(build(ctx)))
	}
}

/// Registration for a built-in panel identifier, `None` when `id` is not one
///
/// # Errors
///
/// [`ToolbarError::MissingSecretKey`] for `sqlalchemy` without a secret key,
/// since its callback links are signed with it.
pub fn builtin_panel(
	id: &str,
	config: &ToolbarConfig,
) -> ToolbarResult<Option<PanelRegistration>> {
	let registration = match id {
		"versions" => PanelRegistration::new(VersionsPanel::new),
		"headers" => PanelRegistration::new(HeadersPanel::new),
		"request_vars" => PanelRegistration::new(RequestVarsPanel::new),
		"template" => PanelRegistration::new(TemplatePanel::new),
		"sqlalchemy" => {
			let secret = config.secret().ok_or(ToolbarError::MissingSecretKey)?;
			let secret: Arc<str> = Arc::from(secret);
			let threshold = config.sql_warning_threshold_ms;
			PanelRegistration::new(move || SqlPanel::new(secret.clone(), threshold))
				.with_routes(crate::views::sql::routes)
		}
		"logger" => PanelRegistration::new(LoggingPanel::new),
		"performance" => PanelRegistration::new(PerformancePanel::new),
		"timer" => PanelRegistration::new(TimerPanel::new),
		_ => return Ok(None),
	};
	Ok(Some(registration))
}
