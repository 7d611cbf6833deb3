//! Debug toolbar service
//!
//! The service owns the view-invocation step: it builds the per-request
//! [`Toolbar`], lets panels wrap the inner service, runs it inside the
//! request's [`TOOLBAR_CONTEXT`] scope and rewrites the response.

use crate::context::{RequestInfo, ResponseInfo, TOOLBAR_CONTEXT, ToolbarContext};
use crate::middleware::ToolbarConfig;
use crate::panels::{PanelRegistry, View};
use crate::toolbar::Toolbar;
use crate::ui::{inject_toolbar, intercept_redirect};
use crate::views::is_toolbar_path;
use axum::body::Body;
use axum::response::IntoResponse;
use http::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::util::BoxCloneService;
use tower::{Service, ServiceExt};

type ResponseFuture = Pin<Box<dyn Future<Output = Result<Response<Body>, Infallible>> + Send>>;

/// Service produced by [`DebugToolbarLayer`](crate::middleware::DebugToolbarLayer)
#[derive(Clone)]
pub struct DebugToolbarService<S> {
	pub(crate) inner: S,
	pub(crate) config: Arc<ToolbarConfig>,
	pub(crate) registry: Arc<PanelRegistry>,
}

impl<S> Service<Request<Body>> for DebugToolbarService<S>
where
	S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>
		+ Clone
		+ Send
		+ 'static,
	S::Future: Send + 'static,
{
	type Response = Response<Body>;
	type Error = Infallible;
	type Future = ResponseFuture;

	fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	fn call(&mut self, request: Request<Body>) -> Self::Future {
		// Take the service that was driven to readiness and leave a clone behind
		let clone = self.inner.clone();
		let inner = std::mem::replace(&mut self.inner, clone);
		let config = self.config.clone();
		let registry = self.registry.clone();

		Box::pin(async move {
			if !config.debug || is_toolbar_path(request.uri().path()) {
				return inner.oneshot(request).await;
			}
			Ok(handle(inner, &config, &registry, request).await)
		})
	}
}

async fn handle<S>(
	inner: S,
	config: &ToolbarConfig,
	registry: &PanelRegistry,
	request: Request<Body>,
) -> Response<Body>
where
	S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>
		+ Clone
		+ Send
		+ 'static,
	S::Future: Send + 'static,
{
	let (parts, body) = request.into_parts();
	let ctx = Arc::new(ToolbarContext::new(RequestInfo::from_parts(&parts)));
	let request = Request::from_parts(parts, body);

	let mut toolbar = Toolbar::new(registry, ctx.clone());
	toolbar.process_request();

	let view: View = BoxCloneService::new(inner);
	let view = toolbar.process_view(view);

	let response = match TOOLBAR_CONTEXT.scope(ctx, view.oneshot(request)).await {
		Ok(response) => response,
		Err(never) => match never {},
	};

	toolbar.process_response(&ResponseInfo::new(response.status(), response.headers()));

	let response = if config.intercept_redirects {
		intercept_redirect(response)
	} else {
		response
	};

	match inject_toolbar(response, move || toolbar.render()).await {
		Ok(response) => response,
		Err(e) => {
			tracing::warn!(error = %e, "failed to read response body for toolbar injection");
			StatusCode::INTERNAL_SERVER_ERROR.into_response()
		}
	}
}
