//! SQL panel callbacks
//!
//! `sql_select` re-runs a captured SELECT and `sql_explain` runs its EXPLAIN.
//! Both only accept statements whose signature matches the one the SQL panel
//! rendered, so the endpoints cannot be used to run arbitrary SQL.

use crate::db::{QueryResult, explain_statement};
use crate::panels::RouteContext;
use crate::utils::html::html_escape;
use crate::utils::signing::{is_select_statement, verify_statement};
use crate::utils::sql_format::format_sql;
use axum::Router;
use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use http::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Public path of the SELECT callback
pub const SQL_SELECT_PATH: &str = "/_debug_toolbar/views/sqlalchemy/sql_select";

/// Public path of the EXPLAIN callback
pub const SQL_EXPLAIN_PATH: &str = "/_debug_toolbar/views/sqlalchemy/sql_explain";

const MAX_FORM_BYTES: usize = 64 * 1024;

/// Routes contributed by the SQL panel, relative to `/_debug_toolbar/views`
pub fn routes(ctx: &RouteContext) -> Router {
	Router::new()
		.route("/sqlalchemy/sql_select", get(sql_select).post(sql_select))
		.route("/sqlalchemy/sql_explain", get(sql_explain).post(sql_explain))
		.with_state(ctx.clone())
}

/// Parameters carried by the SQL panel's links
#[derive(Debug, Clone, Deserialize)]
pub struct SqlCallbackParams {
	/// Statement as executed
	pub sql: String,
	/// JSON-encoded parameters
	pub params: String,
	/// Original execution time in milliseconds
	pub duration: String,
	/// Statement signature
	pub hash: String,
}

/// Why a callback request was refused
#[derive(Debug)]
pub enum CallbackRejection {
	/// Missing or malformed parameters
	BadRequest(String),
	/// Signature mismatch or a statement that is not a SELECT
	NotAcceptable(&'static str),
	/// No database access was configured
	Unavailable,
	/// The database refused the statement
	Database(String),
}

impl IntoResponse for CallbackRejection {
	fn into_response(self) -> Response {
		let (status, message) = match self {
			Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
			Self::NotAcceptable(msg) => (StatusCode::NOT_ACCEPTABLE, msg.to_string()),
			Self::Unavailable => (
				StatusCode::SERVICE_UNAVAILABLE,
				"No query executor is configured for the debug toolbar".to_string(),
			),
			Self::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
		};
		(status, Html(format!("<p>{}</p>", html_escape(&message)))).into_response()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
	Select,
	Explain,
}

impl Action {
	fn title(self) -> &'static str {
		match self {
			Self::Select => "SQL Select",
			Self::Explain => "SQL Explained",
		}
	}
}

async fn sql_select(
	State(ctx): State<RouteContext>,
	request: Request,
) -> Result<Html<String>, CallbackRejection> {
	run_callback(&ctx, request, Action::Select).await
}

async fn sql_explain(
	State(ctx): State<RouteContext>,
	request: Request,
) -> Result<Html<String>, CallbackRejection> {
	run_callback(&ctx, request, Action::Explain).await
}

/// Read the callback parameters from the form body of a POST, falling back
/// to the query string
async fn read_params(request: Request) -> Result<SqlCallbackParams, CallbackRejection> {
	let (parts, body) = request.into_parts();

	let mut raw = String::new();
	if parts.method == Method::POST {
		let bytes = to_bytes(body, MAX_FORM_BYTES)
			.await
			.map_err(|e| CallbackRejection::BadRequest(format!("unreadable body: {}", e)))?;
		raw = String::from_utf8_lossy(&bytes).into_owned();
	}
	if raw.trim().is_empty() {
		raw = parts.uri.query().unwrap_or_default().to_string();
	}

	serde_urlencoded::from_str(&raw)
		.map_err(|e| CallbackRejection::BadRequest(format!("invalid parameters: {}", e)))
}

async fn run_callback(
	ctx: &RouteContext,
	request: Request,
	action: Action,
) -> Result<Html<String>, CallbackRejection> {
	let SqlCallbackParams {
		sql,
		params,
		duration,
		hash,
	} = read_params(request).await?;

	if !verify_statement(&ctx.secret_key, &sql, &params, &hash) {
		tracing::debug!("rejected SQL callback with a mismatched hash");
		return Err(CallbackRejection::NotAcceptable("Invalid statement signature"));
	}
	if !is_select_statement(&sql) {
		return Err(CallbackRejection::NotAcceptable("Only SELECT statements are allowed"));
	}

	let params: Value = serde_json::from_str(&params)
		.map_err(|e| CallbackRejection::BadRequest(format!("params are not valid JSON: {}", e)))?;
	if !(params.is_array() || params.is_object()) {
		return Err(CallbackRejection::BadRequest(
			"params must be a JSON array or object".to_string(),
		));
	}
	let duration: f64 = duration
		.trim()
		.parse()
		.map_err(|_| CallbackRejection::BadRequest(format!("invalid duration: {}", duration)))?;

	let executor = ctx.executor.as_ref().ok_or(CallbackRejection::Unavailable)?;
	let statement = match action {
		Action::Select => sql.clone(),
		Action::Explain => explain_statement(executor.backend(), &sql),
	};

	let result = executor.execute(&statement, &params).await.map_err(|e| {
		tracing::warn!(error = %e, "SQL callback statement failed");
		CallbackRejection::Database(e.to_string())
	})?;

	Ok(Html(render_result(
		action,
		&format_sql(&sql, &params),
		duration,
		&result,
	)))
}

fn render_result(action: Action, sql: &str, duration_ms: f64, result: &QueryResult) -> String {
	let headers: String = result
		.headers
		.iter()
		.map(|h| format!("<th>{}</th>", html_escape(h)))
		.collect();
	let rows: String = result
		.rows
		.iter()
		.map(|row| {
			let cells: String = row
				.iter()
				.map(|cell| format!("<td>{}</td>", html_escape(cell)))
				.collect();
			format!("<tr>{}</tr>", cells)
		})
		.collect();

	format!(
		r#"<div class="flDebugPanelTitle"><h3>{}</h3></div><div class="flDebugPanelContent"><dl><dt>Executed SQL</dt><dd><pre class="flDebugSql">{}</pre></dd><dt>Original query duration</dt><dd>{:.2} ms</dd></dl><table class="flDebugTable"><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>"#,
		action.title(),
		html_escape(sql),
		duration_ms,
		headers,
		rows
	)
}
