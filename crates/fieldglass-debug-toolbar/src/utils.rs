//! Utility functions

pub mod cookies;
pub mod html;
pub mod signing;
pub mod sql_format;
pub mod sql_normalization;
