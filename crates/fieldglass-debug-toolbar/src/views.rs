//! Routes served by the toolbar itself
//!
//! Everything lives under [`TOOLBAR_PREFIX`]: bundled static assets under
//! `/static` and panel callbacks under `/views`. Requests to these paths
//! bypass the toolbar layer.

pub mod sql;
pub mod static_files;

use crate::panels::{PanelRegistry, RouteContext};
use axum::Router;
use std::path::PathBuf;

/// Path prefix of every toolbar-owned route
pub const TOOLBAR_PREFIX: &str = "/_debug_toolbar";

/// Public path of the bundled static assets
pub const STATIC_PATH: &str = "/_debug_toolbar/static/";

/// Whether a request path belongs to the toolbar's own routes
pub fn is_toolbar_path(path: &str) -> bool {
	path == TOOLBAR_PREFIX
		|| path
			.strip_prefix(TOOLBAR_PREFIX)
			.is_some_and(|rest| rest.starts_with('/'))
}

/// Build the router mounted at [`TOOLBAR_PREFIX`]
pub fn router(registry: &PanelRegistry, ctx: &RouteContext, static_dir: PathBuf) -> Router {
	let mut router = Router::new().merge(static_files::routes(static_dir));

	if registry.iter().any(|r| r.has_routes()) {
		router = router.nest("/views", registry.routes(ctx));
	}

	router
}
