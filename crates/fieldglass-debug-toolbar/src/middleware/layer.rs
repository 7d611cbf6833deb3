//! Debug toolbar Tower layer

use crate::error::{ToolbarError, ToolbarResult};
use crate::middleware::{DebugToolbarService, ToolbarConfig};
use crate::panels::PanelRegistry;
use std::sync::Arc;
use tower::Layer;

/// Tower layer for debug toolbar middleware
///
/// The layer only wraps views. Use
/// [`DebugToolbarExtension`](crate::middleware::DebugToolbarExtension) to also
/// mount the static and callback routes.
#[derive(Clone)]
pub struct DebugToolbarLayer {
	config: Arc<ToolbarConfig>,
	registry: Arc<PanelRegistry>,
}

impl DebugToolbarLayer {
	/// Create new toolbar layer with configuration and panel registry
	pub fn new(config: ToolbarConfig, registry: PanelRegistry) -> Self {
		Self::from_shared(Arc::new(config), Arc::new(registry))
	}

	/// Create a layer whose registry is resolved from `config.panels`
	///
	/// With `debug` off the layer is inert and passes every request through.
	/// With `debug` on a secret key is required.
	///
	/// # Errors
	///
	/// [`ToolbarError::MissingSecretKey`] when debug is on without a secret,
	/// [`ToolbarError::UnknownPanel`] for an unrecognised panel id.
	pub fn from_config(config: ToolbarConfig) -> ToolbarResult<Self> {
		if !config.debug {
			return Ok(Self::new(config, PanelRegistry::new()));
		}
		if config.secret().is_none() {
			return Err(ToolbarError::MissingSecretKey);
		}
		let registry = PanelRegistry::from_config(&config, Vec::new())?;
		Ok(Self::new(config, registry))
	}

	pub(crate) fn from_shared(config: Arc<ToolbarConfig>, registry: Arc<PanelRegistry>) -> Self {
		Self { config, registry }
	}

	/// Configuration the layer was built with
	pub fn config(&self) -> &ToolbarConfig {
		&self.config
	}

	/// Registered panels
	pub fn registry(&self) -> &PanelRegistry {
		&self.registry
	}
}

impl<S> Layer<S> for DebugToolbarLayer {
	type Service = DebugToolbarService<S>;

	fn layer(&self, inner: S) -> Self::Service {
		DebugToolbarService {
			inner,
			config: self.config.clone(),
			registry: self.registry.clone(),
		}
	}
}
