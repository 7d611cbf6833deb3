//! Log capture for the logging panel

use crate::context::{LogRecord, TOOLBAR_CONTEXT};
use chrono::Utc;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// `tracing` layer that copies events emitted during a toolbar request into
/// that request's context.
///
/// ```rust,ignore
/// use tracing_subscriber::prelude::*;
///
/// tracing_subscriber::registry()
///     .with(fieldglass_debug_toolbar::ToolbarLogLayer::new())
///     .init();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolbarLogLayer {
	_private: (),
}

impl ToolbarLogLayer {
	/// Create the layer
	pub fn new() -> Self {
		Self::default()
	}
}

impl<S> Layer<S> for ToolbarLogLayer
where
	S: Subscriber,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		// Skip the formatting work entirely outside toolbar requests
		if TOOLBAR_CONTEXT.try_with(|_| ()).is_err() {
			return;
		}

		let meta = event.metadata();
		let mut visitor = MessageVisitor::default();
		event.record(&mut visitor);

		let record = LogRecord {
			level: meta.level().to_string(),
			target: meta.target().to_string(),
			message: visitor.finish(),
			file: meta.file().map(str::to_string),
			line: meta.line(),
			timestamp: Utc::now(),
		};

		let _ = TOOLBAR_CONTEXT.try_with(|ctx| ctx.log_records.lock().push(record));
	}
}

/// Collects the `message` field plus any other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
	message: String,
	fields: Vec<String>,
}

impl MessageVisitor {
	fn finish(self) -> String {
		if self.fields.is_empty() {
			self.message
		} else if self.message.is_empty() {
			self.fields.join(" ")
		} else {
			format!("{} {}", self.message, self.fields.join(" "))
		}
	}
}

impl Visit for MessageVisitor {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message = value.to_string();
		} else {
			self.fields.push(format!("{}={}", field.name(), value));
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		if field.name() == "message" {
			self.message = format!("{:?}", value);
		} else {
			self.fields.push(format!("{}={:?}", field.name(), value));
		}
	}
}
