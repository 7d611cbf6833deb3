//! SQL query debugging panel

use crate::context::{SqlQuery, ToolbarContext};
use crate::error::ToolbarResult;
use crate::panels::Panel;
use crate::utils::html::{html_escape, url_encode};
use crate::utils::signing::sign_statement;
use crate::utils::sql_format::{encode_params, format_fname, format_sql};
use crate::utils::sql_normalization::{detect_n_plus_one, fingerprint_counts, normalize_sql};
use crate::views::sql::{SQL_EXPLAIN_PATH, SQL_SELECT_PATH};
use std::sync::Arc;
use std::time::Duration;

/// SQL query debugging panel
pub struct SqlPanel {
	/// Secret used to sign statements for the callback endpoints
	secret_key: Arc<str>,
	/// SQL warning threshold in milliseconds
	warning_threshold_ms: u64,
}

/// Display data for one captured statement
#[derive(Debug, Clone)]
pub struct QueryRow {
	/// Position in execution order, starting at 1
	pub index: usize,
	/// Execution time in milliseconds
	pub duration_ms: f64,
	/// Statement with parameters substituted, for reading
	pub sql: String,
	/// Statement as executed
	pub raw_sql: String,
	/// JSON-encoded parameters; empty when they could not be encoded
	pub params: String,
	/// Signature accepted by the callback endpoints
	pub hash: String,
	/// Whether the statement can be re-run through the callbacks
	pub is_select: bool,
	/// Full originating location
	pub context_long: String,
	/// Shortened originating location
	pub context: String,
	/// Statement fingerprint occurs more than once
	pub is_duplicate: bool,
	/// Statement exceeded the warning threshold
	pub is_slow: bool,
	/// Statement fingerprint looks like an N+1 access pattern
	pub is_n_plus_one: bool,
}

impl SqlPanel {
	/// Create a SQL panel signing with `secret_key` and flagging statements
	/// slower than `warning_threshold_ms`
	pub fn new(secret_key: Arc<str>, warning_threshold_ms: u64) -> Self {
		Self {
			secret_key,
			warning_threshold_ms,
		}
	}

	/// Build display rows for the captured statements
	pub fn rows(&self, queries: &[SqlQuery]) -> Vec<QueryRow> {
		let counts = fingerprint_counts(queries);
		let n_plus_one = detect_n_plus_one(queries);

		queries
			.iter()
			.enumerate()
			.map(|(idx, q)| {
				let fingerprint = normalize_sql(&q.sql);
				let params = encode_params(&q.params);
				QueryRow {
					index: idx + 1,
					duration_ms: q.duration.as_secs_f64() * 1000.0,
					sql: format_sql(&q.sql, &q.params),
					raw_sql: q.sql.clone(),
					hash: sign_statement(&self.secret_key, &q.sql, &params),
					params,
					is_select: q.is_select(),
					context_long: q.stack_trace.clone(),
					context: format_fname(&q.stack_trace),
					is_duplicate: counts.get(&fingerprint).copied().unwrap_or(0) > 1,
					is_slow: q.duration.as_millis() as u64 >= self.warning_threshold_ms,
					is_n_plus_one: n_plus_one.contains(&fingerprint),
				}
			})
			.collect()
	}

	fn callback_url(path: &str, row: &QueryRow) -> String {
		format!(
			"{}?sql={}&params={}&duration={}&hash={}",
			path,
			url_encode(&row.raw_sql),
			url_encode(&row.params),
			row.duration_ms,
			row.hash
		)
	}

	fn render_row(row: &QueryRow) -> String {
		let mut badges = Vec::new();
		if row.is_duplicate {
			badges.push("<span class='flDebugBadge flDebugBadgeWarning'>DUPLICATE</span>");
		}
		if row.is_slow {
			badges.push("<span class='flDebugBadge flDebugBadgeDanger'>SLOW</span>");
		}
		if row.is_n_plus_one {
			badges.push("<span class='flDebugBadge flDebugBadgeDanger'>N+1</span>");
		}

		let actions = if row.is_select {
			format!(
				r#"<a class="remoteCall" href="{}">SELECT</a><br><a class="remoteCall" href="{}">EXPLAIN</a>"#,
				html_escape(&Self::callback_url(SQL_SELECT_PATH, row)),
				html_escape(&Self::callback_url(SQL_EXPLAIN_PATH, row)),
			)
		} else {
			String::new()
		};

		format!(
			r#"<tr><td>#{}</td><td>{:.2}ms</td><td>{}</td><td><div class="flDebugSql">{}</div> {}</td><td title="{}">{}</td></tr>"#,
			row.index,
			row.duration_ms,
			actions,
			html_escape(&row.sql),
			badges.join(" "),
			html_escape(&row.context_long),
			html_escape(&row.context),
		)
	}
}

impl Panel for SqlPanel {
	fn dom_id(&self) -> &'static str {
		"sqlalchemy"
	}

	fn nav_title(&self) -> String {
		"SQL".to_string()
	}

	fn nav_subtitle(&self, ctx: &ToolbarContext) -> Option<String> {
		let count = ctx.sql_queries.lock().len();
		Some(format!(
			"{} {}",
			count,
			if count == 1 { "query" } else { "queries" }
		))
	}

	fn title(&self) -> String {
		"SQL queries".to_string()
	}

	fn has_content(&self, ctx: &ToolbarContext) -> bool {
		!ctx.sql_queries.lock().is_empty()
	}

	fn content(&self, ctx: &ToolbarContext) -> ToolbarResult<String> {
		let queries = ctx.sql_queries.lock();
		let rows = self.rows(&queries);
		let total_time: Duration = queries.iter().map(|q| q.duration).sum();
		drop(queries);

		let duplicate_count = rows.iter().filter(|r| r.is_duplicate).count();
		let slow_count = rows.iter().filter(|r| r.is_slow).count();
		let n_plus_one_count = rows.iter().filter(|r| r.is_n_plus_one).count();

		let mut warnings = Vec::new();
		if duplicate_count > 0 {
			warnings.push(format!(
				"<div class='flDebugWarning'>{} duplicate queries detected</div>",
				duplicate_count
			));
		}
		if slow_count > 0 {
			warnings.push(format!(
				"<div class='flDebugWarning'>{} slow queries (&gt;{}ms)</div>",
				slow_count, self.warning_threshold_ms
			));
		}
		if n_plus_one_count > 0 {
			warnings.push(format!(
				"<div class='flDebugWarning'>{} queries match a potential N+1 pattern</div>",
				n_plus_one_count
			));
		}

		let body: String = rows.iter().map(Self::render_row).collect();

		Ok(format!(
			r#"<p>{} queries in {:.2}ms</p>{}<table class="flDebugTable"><thead><tr><th>#</th><th>Time</th><th>Action</th><th>Query</th><th>Context</th></tr></thead><tbody>{}</tbody></table>"#,
			rows.len(),
			total_time.as_secs_f64() * 1000.0,
			warnings.join(""),
			body
		))
	}
}
