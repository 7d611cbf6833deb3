//! Toolbar error types

use thiserror::Error;

/// Result alias used throughout the toolbar
pub type ToolbarResult<T> = Result<T, ToolbarError>;

/// Errors raised while configuring or running the debug toolbar
#[derive(Debug, Error)]
pub enum ToolbarError {
	/// Debug mode is on but no secret key was configured
	#[error("the debug toolbar requires the 'SECRET_KEY' config var to be set")]
	MissingSecretKey,

	/// A configured panel identifier does not match any known panel
	#[error("unknown debug toolbar panel: {0}")]
	UnknownPanel(String),

	/// Invalid configuration value
	#[error("configuration error: {0}")]
	Config(String),

	/// Failure while reading or rebuilding an HTTP message
	#[error("HTTP error: {0}")]
	Http(String),

	/// Failure while rendering toolbar markup
	#[error("render error: {0}")]
	Render(String),

	/// Failure reported by the database driver
	#[error("database error: {0}")]
	Database(String),
}
