//! Common test fixtures for fieldglass-debug-toolbar tests
//!
//! This module provides reusable test fixtures using rstest framework.

use fieldglass_debug_toolbar::{
	context::{RequestInfo, ToolbarContext},
	middleware::ToolbarConfig,
	panels::PanelRegistry,
};
use rstest::*;

/// Secret used by every debug configuration in the suite
pub const TEST_SECRET: &str = "test-secret-key";

/// Debug-mode configuration with a secret key and the default panels
#[fixture]
pub fn debug_config() -> ToolbarConfig {
	ToolbarConfig::default()
		.with_debug(true)
		.with_secret_key(TEST_SECRET)
}

/// Request information for `GET /test?foo=bar`
#[fixture]
pub fn test_request_info() -> RequestInfo {
	let (parts, ()) = http::Request::builder()
		.method("GET")
		.uri("/test?foo=bar")
		.header("Content-Type", "application/json")
		.header("User-Agent", "Test Agent")
		.body(())
		.unwrap()
		.into_parts();
	RequestInfo::from_parts(&parts)
}

/// Toolbar context for [`test_request_info`]
#[fixture]
pub fn test_context(test_request_info: RequestInfo) -> ToolbarContext {
	ToolbarContext::new(test_request_info)
}

/// Registry resolved from [`debug_config`]
#[fixture]
pub fn default_registry(debug_config: ToolbarConfig) -> PanelRegistry {
	PanelRegistry::from_config(&debug_config, Vec::new()).unwrap()
}

/// Empty panel registry fixture
#[fixture]
pub fn empty_registry() -> PanelRegistry {
	PanelRegistry::new()
}
