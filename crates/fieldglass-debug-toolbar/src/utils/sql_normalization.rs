//! SQL statement fingerprinting
//!
//! Statements that differ only in literal values, placeholders or layout map
//! to the same fingerprint. The SQL panel uses fingerprints to flag duplicate
//! statements and likely N+1 access patterns.

use crate::context::SqlQuery;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Repetitions of one fingerprint above which it is reported as N+1
pub const N_PLUS_ONE_THRESHOLD: usize = 3;

/// Reduce a statement to its fingerprint.
///
/// Comments are stripped, string and numeric literals and bind placeholders
/// (`?`, `$1`, `:name`, `%(name)s`) become `?`, `IN` lists collapse to
/// `IN (?)`, whitespace is collapsed and the result is uppercased.
///
/// # Examples
///
/// ```
/// use fieldglass_debug_toolbar::utils::sql_normalization::normalize_sql;
///
/// assert_eq!(
///     normalize_sql("select * from users where id = 7"),
///     normalize_sql("SELECT *\n  FROM users WHERE id = $1"),
/// );
/// ```
pub fn normalize_sql(sql: &str) -> String {
	static COMMENT_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r"(?m)--.*$|/\*[\s\S]*?\*/").unwrap());
	static STRING_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r#"'([^'\\]|\\.|'')*'"#).unwrap());
	static PLACEHOLDER_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r"\$\d+|%\(\w+\)s|%s|:[A-Za-z_]\w*").unwrap());
	static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+(\.\d+)?\b").unwrap());
	static IN_LIST_RE: LazyLock<Regex> =
		LazyLock::new(|| Regex::new(r"(?i)\bIN\s*\(\s*\?(\s*,\s*\?)*\s*\)").unwrap());
	static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

	let sql = COMMENT_RE.replace_all(sql, " ");
	let sql = STRING_RE.replace_all(&sql, "?");
	let sql = PLACEHOLDER_RE.replace_all(&sql, "?");
	let sql = NUMERIC_RE.replace_all(&sql, "?");
	let sql = IN_LIST_RE.replace_all(&sql, "IN (?)");
	let sql = WHITESPACE_RE.replace_all(&sql, " ");

	sql.trim().to_uppercase()
}

/// Count how many times each fingerprint occurs
pub fn fingerprint_counts(queries: &[SqlQuery]) -> HashMap<String, usize> {
	let mut counts = HashMap::new();
	for query in queries {
		*counts.entry(normalize_sql(&query.sql)).or_insert(0) += 1;
	}
	counts
}

/// Fingerprints repeated more than [`N_PLUS_ONE_THRESHOLD`] times, in order of
/// first crossing the threshold.
pub fn detect_n_plus_one(queries: &[SqlQuery]) -> Vec<String> {
	let mut seen: HashMap<String, usize> = HashMap::new();
	let mut patterns = Vec::new();

	for query in queries {
		let fingerprint = normalize_sql(&query.sql);
		let count = seen.entry(fingerprint.clone()).or_insert(0);
		*count += 1;
		if *count == N_PLUS_ONE_THRESHOLD + 1 {
			patterns.push(fingerprint);
		}
	}

	patterns
}
