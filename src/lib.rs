//! # Fieldglass
//!
//! Development tooling for axum web applications.
//!
//! ## Feature Flags
//!
//! - `debug-toolbar` (default) - In-page debug toolbar middleware
//! - `debug-toolbar-sqlx` - Re-run captured SQL through an `sqlx::AnyPool`
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use axum::{Router, response::Html, routing::get};
//! use fieldglass::prelude::*;
//!
//! # fn main() -> Result<(), ToolbarError> {
//! let config = ToolbarConfig::new().with_debug(true).with_secret_key("dev-only");
//! let app: Router = Router::new()
//!     .route("/", get(|| async { Html("<html><body>Hello</body></html>") }));
//! let app = DebugToolbarExtension::new(config)?.install(app);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "debug-toolbar")]
pub use fieldglass_debug_toolbar as debug_toolbar;

/// Common imports
pub mod prelude {
	#[cfg(feature = "debug-toolbar")]
	pub use crate::debug_toolbar::{
		DebugToolbarExtension, DebugToolbarLayer, Panel, PanelRegistration, QueryExecutor,
		ToolbarConfig, ToolbarError, ToolbarLogLayer, record_sql_query, record_template,
	};

	#[cfg(feature = "debug-toolbar-sqlx")]
	pub use crate::debug_toolbar::SqlxExecutor;
}
