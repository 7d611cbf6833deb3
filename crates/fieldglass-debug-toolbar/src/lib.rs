//! # Fieldglass Debug Toolbar
//!
//! An in-page debug toolbar for axum applications.
//!
//! While debug mode is on, every HTML page the application serves gets a
//! toolbar injected before its closing `</body>` tag. The toolbar shows:
//! - versions of the toolbar and registered components
//! - request headers, query arguments and cookies
//! - rendered templates
//! - SQL statements with duplicate, slow and N+1 markers, plus signed links
//!   to re-run a SELECT or show its query plan
//! - log events captured through `tracing`
//! - view and total request timing
//!
//! Redirects can be intercepted and replaced by a page linking to the
//! target, so the redirecting request's toolbar stays visible.
//!
//! ## Features
//!
//! - `sqlx` - [`SqlxExecutor`](db::SqlxExecutor) for the SQL callbacks
//! - `full` - All optional features
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, response::Html, routing::get};
//! use fieldglass_debug_toolbar::{DebugToolbarExtension, ToolbarConfig};
//!
//! # fn main() -> Result<(), fieldglass_debug_toolbar::ToolbarError> {
//! let config = ToolbarConfig::from_env()?;
//! let app: Router = Router::new()
//!     .route("/", get(|| async { Html("<html><body>Hello</body></html>") }));
//!
//! let app = DebugToolbarExtension::new(config)?.install(app);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Middleware**: [`DebugToolbarLayer`] owns the step that calls the view
//! 2. **Collection**: [`collectors`] append to the request's [`ToolbarContext`]
//! 3. **Panels**: [`Panel`] implementations observe the request and render
//! 4. **UI**: [`ui`] renders the toolbar and rewrites the response

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

// Module declarations following Rust 2024 module system (no mod.rs)
pub mod collectors;
pub mod context;
pub mod db;
pub mod error;
pub mod middleware;
pub mod panels;
pub mod toolbar;
pub mod ui;
pub mod utils;
pub mod views;

pub use collectors::{ToolbarLogLayer, record_sql_query, record_template, with_toolbar_context};
pub use context::{
	LogRecord, RequestInfo, ResponseInfo, SqlQuery, TOOLBAR_CONTEXT, TemplateInfo, ToolbarContext,
};
pub use db::{DatabaseBackend, QueryExecutor, QueryResult};
pub use error::{ToolbarError, ToolbarResult};
pub use middleware::{
	DebugToolbarExtension, DebugToolbarExtensionBuilder, DebugToolbarLayer, DebugToolbarService,
	ToolbarConfig,
};
pub use panels::{Panel, PanelRegistration, PanelRegistry};
pub use toolbar::Toolbar;

#[cfg(feature = "sqlx")]
pub use db::SqlxExecutor;
