//! Test data builders for fieldglass-debug-toolbar tests
//!
//! This module provides fluent builder APIs for creating test data.

use chrono::Utc;
use fieldglass_debug_toolbar::context::{SqlQuery, TemplateInfo};
use serde_json::Value;
use std::time::Duration;

/// Builder for creating SqlQuery test data
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
	sql: String,
	params: Value,
	duration: Duration,
	context: String,
	connection: Option<String>,
}

impl Default for SqlQueryBuilder {
	fn default() -> Self {
		Self {
			sql: String::new(),
			params: Value::Array(Vec::new()),
			duration: Duration::default(),
			context: String::new(),
			connection: None,
		}
	}
}

impl SqlQueryBuilder {
	/// Create a new SqlQueryBuilder with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the SQL query text
	pub fn sql(mut self, sql: impl Into<String>) -> Self {
		self.sql = sql.into();
		self
	}

	/// Set query parameters
	pub fn params(mut self, params: Value) -> Self {
		self.params = params;
		self
	}

	/// Set execution duration
	pub fn duration(mut self, duration: Duration) -> Self {
		self.duration = duration;
		self
	}

	/// Set the originating location
	pub fn context(mut self, context: impl Into<String>) -> Self {
		self.context = context.into();
		self
	}

	/// Set connection name
	pub fn connection(mut self, connection: impl Into<String>) -> Self {
		self.connection = Some(connection.into());
		self
	}

	/// Build the SqlQuery
	pub fn build(self) -> SqlQuery {
		let query = SqlQuery::new(self.sql, &self.params, self.duration).with_context(self.context);
		match self.connection {
			Some(connection) => query.with_connection(connection),
			None => query,
		}
	}
}

/// Builder for creating TemplateInfo test data
#[derive(Debug, Clone, Default)]
pub struct TemplateInfoBuilder {
	name: String,
	render_duration: Duration,
	context_data: Value,
	parent: Option<String>,
}

impl TemplateInfoBuilder {
	/// Create a new TemplateInfoBuilder with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Set template name
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Set rendering duration
	pub fn render_duration(mut self, duration: Duration) -> Self {
		self.render_duration = duration;
		self
	}

	/// Set context data
	pub fn context_data(mut self, data: Value) -> Self {
		self.context_data = data;
		self
	}

	/// Set parent template
	pub fn parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Build the TemplateInfo
	pub fn build(self) -> TemplateInfo {
		TemplateInfo {
			name: self.name,
			context_data: self.context_data,
			render_duration: self.render_duration,
			parent: self.parent,
			timestamp: Utc::now(),
		}
	}
}
