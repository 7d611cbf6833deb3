//! Statement signing for the SQL callback endpoints
//!
//! The SQL panel signs every captured statement so that the callback
//! endpoints only re-run statements the toolbar itself rendered.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hex-encoded SHA-256 over `secret ‖ statement ‖ params`
pub fn sign_statement(secret: &str, statement: &str, params: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(secret.as_bytes());
	hasher.update(statement.as_bytes());
	hasher.update(params.as_bytes());
	hex::encode(hasher.finalize())
}

/// Check a supplied hash against the expected signature in constant time
pub fn verify_statement(secret: &str, statement: &str, params: &str, hash: &str) -> bool {
	let expected = sign_statement(secret, statement, params);
	expected.as_bytes().ct_eq(hash.as_bytes()).into()
}

/// Whether a statement may be re-run: it must start with `select`, ignoring
/// leading whitespace and case
pub fn is_select_statement(statement: &str) -> bool {
	statement.trim().to_lowercase().starts_with("select")
}
