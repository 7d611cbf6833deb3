//! Data collectors
//!
//! Host code reports SQL statements and template renders through these
//! functions; log events arrive through [`ToolbarLogLayer`]. Everything lands
//! in the [`ToolbarContext`] of the request being served on the current task.
//! Outside a toolbar request every collector is a no-op.

pub mod logging;

pub use logging::ToolbarLogLayer;

use crate::context::{SqlQuery, TOOLBAR_CONTEXT, TemplateInfo, ToolbarContext};

/// Run `f` against the current request's context, if there is one
pub fn with_toolbar_context<R>(f: impl FnOnce(&ToolbarContext) -> R) -> Option<R> {
	TOOLBAR_CONTEXT.try_with(|ctx| f(ctx)).ok()
}

/// Record an executed SQL statement. Returns whether a toolbar request was
/// active to receive it.
///
/// # Examples
///
/// ```
/// use fieldglass_debug_toolbar::context::{RequestInfo, SqlQuery, TOOLBAR_CONTEXT, ToolbarContext};
/// use fieldglass_debug_toolbar::record_sql_query;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let (parts, ()) = http::Request::builder().uri("/").body(()).unwrap().into_parts();
/// let ctx = Arc::new(ToolbarContext::new(RequestInfo::from_parts(&parts)));
///
/// TOOLBAR_CONTEXT
///     .scope(ctx.clone(), async {
///         let query = SqlQuery::new("SELECT 1", &Vec::<i32>::new(), Duration::from_millis(3));
///         assert!(record_sql_query(query));
///     })
///     .await;
///
/// assert_eq!(ctx.sql_queries.lock().len(), 1);
/// # });
/// ```
pub fn record_sql_query(query: SqlQuery) -> bool {
	with_toolbar_context(|ctx| ctx.sql_queries.lock().push(query)).is_some()
}

/// Record a rendered template. Returns whether a toolbar request was active to
/// receive it.
pub fn record_template(template: TemplateInfo) -> bool {
	with_toolbar_context(|ctx| ctx.templates.lock().push(template)).is_some()
}
