//! Middleware components
//!
//! This module provides Tower/Axum middleware integration for the debug toolbar.

pub mod config;
pub mod extension;
pub mod layer;
pub mod service;

pub use config::ToolbarConfig;
pub use extension::{DebugToolbarExtension, DebugToolbarExtensionBuilder};
pub use layer::DebugToolbarLayer;
pub use service::DebugToolbarService;
