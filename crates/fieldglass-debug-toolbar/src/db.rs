//! Database access for the SQL callback endpoints
//!
//! The SQL panel's SELECT and EXPLAIN links re-run a captured statement. The
//! toolbar reaches the application's database through a [`QueryExecutor`],
//! which the application hands to the extension builder. With the `sqlx`
//! feature enabled, [`SqlxExecutor`] wraps an `sqlx::AnyPool`.

use crate::error::ToolbarResult;
use async_trait::async_trait;

/// Database flavour, used to pick the EXPLAIN syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
	/// SQLite
	Sqlite,
	/// PostgreSQL
	Postgres,
	/// MySQL or MariaDB
	MySql,
	/// Anything else; plain `EXPLAIN` is used
	Other,
}

impl DatabaseBackend {
	/// Infer the backend from a connection URL scheme
	pub fn from_url(url: &str) -> Self {
		let scheme = url.split(':').next().unwrap_or_default().to_ascii_lowercase();
		match scheme.as_str() {
			"sqlite" => Self::Sqlite,
			"postgres" | "postgresql" => Self::Postgres,
			"mysql" | "mariadb" => Self::MySql,
			_ => Self::Other,
		}
	}
}

/// Prefix a statement with the backend's EXPLAIN form
pub fn explain_statement(backend: DatabaseBackend, sql: &str) -> String {
	match backend {
		DatabaseBackend::Sqlite => format!("EXPLAIN QUERY PLAN {}", sql),
		DatabaseBackend::Postgres => format!("EXPLAIN VERBOSE {}", sql),
		DatabaseBackend::MySql | DatabaseBackend::Other => format!("EXPLAIN {}", sql),
	}
}

/// Tabular result of a re-run statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
	/// Column names
	pub headers: Vec<String>,
	/// Cell values rendered as text
	pub rows: Vec<Vec<String>>,
}

/// Executes statements on behalf of the SQL callback endpoints
#[async_trait]
pub trait QueryExecutor: Send + Sync {
	/// Backend the executor talks to
	fn backend(&self) -> DatabaseBackend;

	/// Run `sql` with `params` (a JSON array for positional parameters or an
	/// object for named ones) and collect every row
	async fn execute(&self, sql: &str, params: &serde_json::Value) -> ToolbarResult<QueryResult>;
}

#[cfg(feature = "sqlx")]
pub use self::sqlx_executor::SqlxExecutor;

#[cfg(feature = "sqlx")]
mod sqlx_executor {
	use super::{DatabaseBackend, QueryExecutor, QueryResult};
	use crate::error::{ToolbarError, ToolbarResult};
	use async_trait::async_trait;
	use serde_json::Value;
	use sqlx::any::{AnyArguments, AnyRow};
	use sqlx::query::Query;
	use sqlx::{Any, AnyPool, Column, Row};
	use std::sync::Arc;

	/// [`QueryExecutor`] backed by an `sqlx` pool
	#[derive(Clone)]
	pub struct SqlxExecutor {
		pool: Arc<AnyPool>,
		backend: DatabaseBackend,
	}

	impl SqlxExecutor {
		/// Wrap an existing pool
		pub fn new(pool: Arc<AnyPool>, backend: DatabaseBackend) -> Self {
			Self { pool, backend }
		}

		/// Connect a new pool, inferring the backend from the URL
		pub async fn connect(database_url: &str) -> ToolbarResult<Self> {
			sqlx::any::install_default_drivers();
			let pool = AnyPool::connect(database_url)
				.await
				.map_err(|e| ToolbarError::Database(format!("connection error: {}", e)))?;

			Ok(Self::new(
				Arc::new(pool),
				DatabaseBackend::from_url(database_url),
			))
		}
	}

	fn bind_value<'q>(
		query: Query<'q, Any, AnyArguments<'q>>,
		value: &Value,
	) -> Query<'q, Any, AnyArguments<'q>> {
		match value {
			Value::Null => query.bind(Option::<String>::None),
			Value::Bool(b) => query.bind(*b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => query.bind(i),
				None => query.bind(n.as_f64().unwrap_or_default()),
			},
			Value::String(s) => query.bind(s.clone()),
			other => query.bind(other.to_string()),
		}
	}

	fn decode_cell(row: &AnyRow, index: usize) -> String {
		if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
			return value.map_or_else(|| "NULL".to_string(), |v| v.to_string());
		}
		if let Ok(Some(value)) = row.try_get::<Option<f64>, _>(index) {
			return value.to_string();
		}
		if let Ok(Some(value)) = row.try_get::<Option<String>, _>(index) {
			return value;
		}
		if let Ok(Some(value)) = row.try_get::<Option<bool>, _>(index) {
			return value.to_string();
		}
		if let Ok(Some(value)) = row.try_get::<Option<Vec<u8>>, _>(index) {
			return String::from_utf8(value)
				.unwrap_or_else(|e| format!("<{} bytes>", e.as_bytes().len()));
		}
		String::new()
	}

	#[async_trait]
	impl QueryExecutor for SqlxExecutor {
		fn backend(&self) -> DatabaseBackend {
			self.backend
		}

		async fn execute(&self, sql: &str, params: &Value) -> ToolbarResult<QueryResult> {
			let mut query = sqlx::query::<Any>(sql);
			match params {
				Value::Array(values) => {
					for value in values {
						query = bind_value(query, value);
					}
				}
				Value::Object(map) => {
					for value in map.values() {
						query = bind_value(query, value);
					}
				}
				Value::Null => {}
				other => query = bind_value(query, other),
			}

			let rows = query
				.fetch_all(self.pool.as_ref())
				.await
				.map_err(|e| ToolbarError::Database(e.to_string()))?;

			let headers = rows
				.first()
				.map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
				.unwrap_or_default();
			let rows = rows
				.iter()
				.map(|row| (0..row.len()).map(|i| decode_cell(row, i)).collect())
				.collect();

			Ok(QueryResult { headers, rows })
		}
	}

}
