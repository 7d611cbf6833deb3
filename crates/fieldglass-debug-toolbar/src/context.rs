//! Per-request toolbar context
//!
//! A [`ToolbarContext`] is created when a request enters the toolbar layer
//! and dropped with the request's future. While the view runs, the context is
//! reachable through the [`TOOLBAR_CONTEXT`] task-local so that collectors
//! (SQL, templates, logging) can append to it without any global map keyed by
//! request.

use crate::utils::cookies::parse_cookies;
use crate::utils::signing::is_select_statement;
use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode, request::Parts};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

tokio::task_local! {
	/// Context of the toolbar request currently being served on this task
	pub static TOOLBAR_CONTEXT: Arc<ToolbarContext>;
}

/// Snapshot of the incoming request
#[derive(Debug, Clone)]
pub struct RequestInfo {
	/// HTTP method
	pub method: String,
	/// Request path
	pub path: String,
	/// Raw query string, if any
	pub query: Option<String>,
	/// Headers in arrival order
	pub headers: Vec<(String, String)>,
	/// Parsed request cookies
	pub cookies: Vec<(String, String)>,
	/// Wall-clock arrival time
	pub timestamp: DateTime<Utc>,
	/// Monotonic arrival time
	pub started: Instant,
}

impl RequestInfo {
	/// Capture request information from request parts
	pub fn from_parts(parts: &Parts) -> Self {
		Self {
			method: parts.method.to_string(),
			path: parts.uri.path().to_string(),
			query: parts.uri.query().map(str::to_string),
			headers: header_pairs(&parts.headers),
			cookies: parse_cookies(&parts.headers),
			timestamp: Utc::now(),
			started: Instant::now(),
		}
	}

	/// Look up a cookie by name
	pub fn cookie(&self, name: &str) -> Option<&str> {
		self.cookies
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Decode the query string into ordered key/value pairs
	pub fn query_args(&self) -> Vec<(String, String)> {
		self.query
			.as_deref()
			.and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
			.unwrap_or_default()
	}
}

/// Snapshot of the response produced by the view
#[derive(Debug, Clone)]
pub struct ResponseInfo {
	/// Status code
	pub status: StatusCode,
	/// Headers in emission order
	pub headers: Vec<(String, String)>,
}

impl ResponseInfo {
	/// Capture status and headers from a response
	pub fn new(status: StatusCode, headers: &HeaderMap) -> Self {
		Self {
			status,
			headers: header_pairs(headers),
		}
	}
}

/// A SQL statement executed while serving the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlQuery {
	/// Statement text
	pub sql: String,
	/// Bound parameters (array for positional, object for named).
	/// `Null` when the driver's parameters could not be represented as JSON.
	pub params: serde_json::Value,
	/// Execution time
	pub duration: Duration,
	/// Originating code location (e.g. `src/views/users.rs:42 (list_users)`)
	pub stack_trace: String,
	/// When the statement finished
	pub timestamp: DateTime<Utc>,
	/// Connection or database alias
	pub connection: Option<String>,
}

impl SqlQuery {
	/// Build a record from a statement and any serializable parameter set.
	///
	/// Parameters that fail to serialize are recorded as `Null` and later
	/// displayed as an empty parameter list.
	pub fn new(sql: impl Into<String>, params: &impl Serialize, duration: Duration) -> Self {
		Self {
			sql: sql.into(),
			params: serde_json::to_value(params).unwrap_or(serde_json::Value::Null),
			duration,
			stack_trace: String::new(),
			timestamp: Utc::now(),
			connection: None,
		}
	}

	/// Attach the originating code location
	pub fn with_context(mut self, context: impl Into<String>) -> Self {
		self.stack_trace = context.into();
		self
	}

	/// Attach the connection alias
	pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
		self.connection = Some(connection.into());
		self
	}

	/// Whether the statement is a SELECT
	pub fn is_select(&self) -> bool {
		is_select_statement(&self.sql)
	}
}

/// A template rendered while serving the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
	/// Template name
	pub name: String,
	/// Context the template was rendered with
	pub context_data: serde_json::Value,
	/// Render time
	pub render_duration: Duration,
	/// Parent template, if the template extends one
	pub parent: Option<String>,
	/// When rendering finished
	pub timestamp: DateTime<Utc>,
}

/// A log event emitted while serving the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
	/// Level name (`ERROR`, `WARN`, ...)
	pub level: String,
	/// Event target (usually the module path)
	pub target: String,
	/// Rendered message
	pub message: String,
	/// Source file
	pub file: Option<String>,
	/// Source line
	pub line: Option<u32>,
	/// Emission time
	pub timestamp: DateTime<Utc>,
}

/// Data collected over the lifetime of one request
#[derive(Debug)]
pub struct ToolbarContext {
	/// Request snapshot
	pub request_info: RequestInfo,
	/// Executed SQL statements
	pub sql_queries: Mutex<Vec<SqlQuery>>,
	/// Rendered templates
	pub templates: Mutex<Vec<TemplateInfo>>,
	/// Captured log events
	pub log_records: Mutex<Vec<LogRecord>>,
	/// Time spent inside the view, recorded by the performance panel wrapper
	pub view_duration: Mutex<Option<Duration>>,
}

impl ToolbarContext {
	/// Create an empty context for a request
	pub fn new(request_info: RequestInfo) -> Self {
		Self {
			request_info,
			sql_queries: Mutex::new(Vec::new()),
			templates: Mutex::new(Vec::new()),
			log_records: Mutex::new(Vec::new()),
			view_duration: Mutex::new(None),
		}
	}

	/// Time elapsed since the request arrived
	pub fn elapsed(&self) -> Duration {
		self.request_info.started.elapsed()
	}
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
	headers
		.iter()
		.map(|(name, value)| {
			(
				name.as_str().to_string(),
				String::from_utf8_lossy(value.as_bytes()).into_owned(),
			)
		})
		.collect()
}
