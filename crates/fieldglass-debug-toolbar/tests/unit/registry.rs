//! Panel registry resolution

use crate::common::fixtures::{debug_config, default_registry, empty_registry};
use crate::common::mock_panel::MockPanel;
use fieldglass_debug_toolbar::panels::registry::DEFAULT_PANELS;
use fieldglass_debug_toolbar::{PanelRegistry, ToolbarConfig, ToolbarError};
use rstest::*;

#[rstest]
fn test_default_registry_order(default_registry: PanelRegistry) {
	assert_eq!(default_registry.dom_ids(), DEFAULT_PANELS);
	assert!(default_registry.get("sqlalchemy").unwrap().has_routes());
	assert!(!default_registry.get("headers").unwrap().has_routes());
}

#[rstest]
fn test_empty_registry(empty_registry: PanelRegistry) {
	assert!(empty_registry.is_empty());
	assert!(empty_registry.create_panels().is_empty());
}

#[rstest]
fn test_custom_panel_takes_configured_slot(debug_config: ToolbarConfig) {
	let config = debug_config.with_panels(vec![
		"timer".to_string(),
		"mock".to_string(),
		"logger".to_string(),
	]);
	let registry =
		PanelRegistry::from_config(&config, vec![MockPanel::default().registration()]).unwrap();

	assert_eq!(registry.dom_ids(), vec!["timer", "mock", "logger"]);
}

#[rstest]
fn test_unlisted_custom_panel_skipped(debug_config: ToolbarConfig) {
	let config = debug_config.with_panels(vec!["headers".to_string()]);
	let registry =
		PanelRegistry::from_config(&config, vec![MockPanel::default().registration()]).unwrap();

	assert_eq!(registry.dom_ids(), vec!["headers"]);
}

#[rstest]
#[case(vec!["headers", "flamegraph"], "flamegraph")]
#[case(vec!["mock"], "mock")]
fn test_unknown_panel(
	debug_config: ToolbarConfig,
	#[case] panels: Vec<&str>,
	#[case] missing: &str,
) {
	let config = debug_config.with_panels(panels.into_iter().map(String::from).collect());
	let result = PanelRegistry::from_config(&config, Vec::new());

	assert!(matches!(result, Err(ToolbarError::UnknownPanel(id)) if id == missing));
}

#[rstest]
fn test_duplicate_panel_rejected(debug_config: ToolbarConfig) {
	let config = debug_config.with_panels(vec!["headers".to_string(), "headers".to_string()]);
	assert!(matches!(
		PanelRegistry::from_config(&config, Vec::new()),
		Err(ToolbarError::Config(_))
	));
}
