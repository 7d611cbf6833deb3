//! Toolbar markup
//!
//! [`render_toolbar`] produces the `<div id="flDebug">` fragment that
//! [`injection`] places before `</body>`. The [`redirect`] module renders the
//! page shown in place of an intercepted redirect.

pub mod injection;
pub mod redirect;

pub use injection::inject_toolbar;
pub use redirect::intercept_redirect;

use crate::context::ToolbarContext;
use crate::toolbar::{PanelInstance, Toolbar};
use crate::utils::html::html_escape;
use std::fmt::Write;

/// Render the toolbar fragment for a request
pub fn render_toolbar(toolbar: &Toolbar) -> String {
	let ctx = toolbar.context();
	let static_path = html_escape(&toolbar.template_context().static_path);

	let mut html = String::new();
	let _ = write!(
		html,
		r#"<div id="flDebug" style="display:none;"><link rel="stylesheet" href="{0}css/toolbar.css" type="text/css"><script src="{0}js/toolbar.js"></script>"#,
		static_path
	);

	html.push_str(r#"<div id="flDebugToolbar"><ol id="flDebugPanelList">"#);
	html.push_str(
		r##"<li><a id="flHideToolBarButton" href="#" title="Hide Toolbar">Hide &raquo;</a></li>"##,
	);
	for instance in toolbar.panels() {
		render_nav_entry(&mut html, instance, ctx);
	}
	html.push_str("</ol></div>");

	html.push_str(
		r##"<div id="flDebugToolbarHandle" style="display:none;"><a title="Show Toolbar" id="flShowToolBarButton" href="#">&laquo;</a></div>"##,
	);

	for instance in toolbar.panels() {
		let panel = &instance.panel;
		if panel.url().is_some() || !panel.has_content(ctx) {
			continue;
		}

		let content = panel.content(ctx).unwrap_or_else(|e| {
			tracing::warn!(panel = panel.dom_id(), error = %e, "debug toolbar panel failed to render");
			format!(
				r#"<p class="flDebugError">This panel could not be rendered: {}</p>"#,
				html_escape(&e.to_string())
			)
		});

		let _ = write!(
			html,
			r#"<div id="{0}-content" class="panelContent"><div class="flDebugPanelTitle"><a href="" class="flDebugClose">Close</a><h3>{1}</h3></div><div class="flDebugPanelContentParent"><div class="flDebugPanelContent"><div class="flDebugScroll">{2}</div></div></div></div>"#,
			panel.dom_id(),
			html_escape(&panel.title()),
			content
		);
	}

	html.push_str("</div>");
	html
}

fn render_nav_entry(html: &mut String, instance: &PanelInstance, ctx: &ToolbarContext) {
	let panel = &instance.panel;
	let dom_id = panel.dom_id();
	let active_class = if instance.is_active { " flDebugActive" } else { "" };
	let checked = if instance.is_active { " checked" } else { "" };

	let _ = write!(
		html,
		r#"<li id="{0}" class="flDebugPanel{1}"><input type="checkbox" class="flDebugPanelToggle" data-panel="{0}" title="Toggle panel"{2}>"#,
		dom_id, active_class, checked
	);

	let label = match panel.nav_subtitle(ctx) {
		Some(subtitle) => format!(
			"{}<br><small>{}</small>",
			html_escape(&panel.nav_title()),
			html_escape(&subtitle)
		),
		None => html_escape(&panel.nav_title()),
	};

	if let Some(url) = panel.url() {
		let _ = write!(
			html,
			r#"<a href="{}" title="{}">{}</a>"#,
			html_escape(&url),
			html_escape(&panel.title()),
			label
		);
	} else if panel.has_content(ctx) {
		let _ = write!(
			html,
			r##"<a href="#" class="{} flDebugPanelLink" title="{}">{}</a>"##,
			dom_id,
			html_escape(&panel.title()),
			label
		);
	} else {
		let _ = write!(html, r#"<div class="contentless">{}</div>"#, label);
	}

	html.push_str("</li>");
}
