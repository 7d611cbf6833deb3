//! Installing the toolbar into an application

use crate::db::QueryExecutor;
use crate::error::{ToolbarError, ToolbarResult};
use crate::middleware::{DebugToolbarLayer, ToolbarConfig};
use crate::panels::{PanelRegistration, PanelRegistry, RouteContext};
use crate::views::{self, TOOLBAR_PREFIX};
use axum::Router;
use std::sync::Arc;

struct Enabled {
	config: Arc<ToolbarConfig>,
	registry: Arc<PanelRegistry>,
	routes: RouteContext,
}

/// The debug toolbar, configured for one application
///
/// Built from a [`ToolbarConfig`]. With debug mode off the extension is
/// inert and [`install`](Self::install) returns the router unchanged.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, response::Html, routing::get};
/// use fieldglass_debug_toolbar::{DebugToolbarExtension, ToolbarConfig};
///
/// # fn main() -> Result<(), fieldglass_debug_toolbar::ToolbarError> {
/// let config = ToolbarConfig::default()
///     .with_debug(true)
///     .with_secret_key("change-me");
///
/// let app: Router = Router::new().route("/", get(|| async { Html("<body>hi</body>") }));
/// let app = DebugToolbarExtension::new(config)?.install(app);
/// # Ok(())
/// # }
/// ```
pub struct DebugToolbarExtension {
	enabled: Option<Enabled>,
}

/// Builder for [`DebugToolbarExtension`]
pub struct DebugToolbarExtensionBuilder {
	config: ToolbarConfig,
	panels: Vec<PanelRegistration>,
	executor: Option<Arc<dyn QueryExecutor>>,
}

impl DebugToolbarExtensionBuilder {
	/// Make an application panel available; it is shown if its DOM id is in
	/// the configured panel list
	pub fn with_panel(mut self, registration: PanelRegistration) -> Self {
		self.panels.push(registration);
		self
	}

	/// Database access for the SQL panel's SELECT and EXPLAIN callbacks
	pub fn with_executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
		self.executor = Some(executor);
		self
	}

	/// Validate the configuration and resolve the panels.
	///
	/// # Errors
	///
	/// [`ToolbarError::MissingSecretKey`] when debug mode is on without a
	/// secret key, and [`ToolbarError::UnknownPanel`] for a panel id nothing
	/// provides.
	pub fn build(self) -> ToolbarResult<DebugToolbarExtension> {
		if !self.config.debug {
			tracing::debug!("debug mode is off; debug toolbar disabled");
			return Ok(DebugToolbarExtension { enabled: None });
		}

		let secret = self
			.config
			.secret()
			.ok_or(ToolbarError::MissingSecretKey)?;
		let routes = RouteContext {
			secret_key: Arc::from(secret),
			executor: self.executor,
		};

		let registry = PanelRegistry::from_config(&self.config, self.panels)?;
		tracing::debug!(panels = ?registry.dom_ids(), "debug toolbar enabled");

		Ok(DebugToolbarExtension {
			enabled: Some(Enabled {
				config: Arc::new(self.config),
				registry: Arc::new(registry),
				routes,
			}),
		})
	}
}

impl DebugToolbarExtension {
	/// Build an extension with the built-in panels only
	pub fn new(config: ToolbarConfig) -> ToolbarResult<Self> {
		Self::builder(config).build()
	}

	/// Start building an extension
	pub fn builder(config: ToolbarConfig) -> DebugToolbarExtensionBuilder {
		DebugToolbarExtensionBuilder {
			config,
			panels: Vec::new(),
			executor: None,
		}
	}

	/// Whether the toolbar will be installed
	pub fn is_enabled(&self) -> bool {
		self.enabled.is_some()
	}

	/// Resolved panels, if enabled
	pub fn registry(&self) -> Option<&PanelRegistry> {
		self.enabled.as_ref().map(|e| e.registry.as_ref())
	}

	/// The middleware layer on its own, if enabled
	pub fn layer(&self) -> Option<DebugToolbarLayer> {
		self.enabled
			.as_ref()
			.map(|e| DebugToolbarLayer::from_shared(e.config.clone(), e.registry.clone()))
	}

	/// Mount the toolbar's routes on `router` and wrap it in the toolbar layer
	pub fn install<S>(&self, router: Router<S>) -> Router<S>
	where
		S: Clone + Send + Sync + 'static,
	{
		let Some(enabled) = &self.enabled else {
			return router;
		};

		let toolbar_routes = views::router(
			&enabled.registry,
			&enabled.routes,
			enabled.config.static_dir.clone(),
		);

		router
			.nest_service(TOOLBAR_PREFIX, toolbar_routes)
			.layer(DebugToolbarLayer::from_shared(
				enabled.config.clone(),
				enabled.registry.clone(),
			))
	}
}
